//! SMS alerting for denied unpaid attempts.
//!
//! The notifier always logs the attempt. If the `sms_enabled` setting is on,
//! an `admin_phone` is configured, and Twilio credentials were supplied, it
//! also texts the admin. Every failure along the way is logged and swallowed:
//! notification must never change the gate's answer.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};
use twilio::TwilioService;

use crate::kernel::traits::{BaseMemberStore, BaseNotifier};

pub struct SmsNotifier {
    twilio: Option<Arc<TwilioService>>,
    store: Arc<dyn BaseMemberStore>,
}

impl SmsNotifier {
    pub fn new(twilio: Option<Arc<TwilioService>>, store: Arc<dyn BaseMemberStore>) -> Self {
        Self { twilio, store }
    }

    async fn sms_enabled(&self) -> bool {
        match self.store.get_setting("sms_enabled").await {
            Ok(Some(v)) => v.eq_ignore_ascii_case("true"),
            Ok(None) => false,
            Err(e) => {
                warn!("could not read sms_enabled setting: {e:#}");
                false
            }
        }
    }

    async fn admin_phone(&self) -> Option<String> {
        match self.store.get_setting("admin_phone").await {
            Ok(v) => v.filter(|p| !p.is_empty()),
            Err(e) => {
                warn!("could not read admin_phone setting: {e:#}");
                None
            }
        }
    }
}

#[async_trait]
impl BaseNotifier for SmsNotifier {
    async fn notify_unpaid_attempt(
        &self,
        given_name: &str,
        family_name: &str,
        phone: Option<&str>,
    ) -> Result<()> {
        warn!("ALERT: {given_name} {family_name} attempted entry without payment");

        if !self.sms_enabled().await {
            return Ok(());
        }
        let Some(admin_phone) = self.admin_phone().await else {
            warn!("sms_enabled is on but no admin_phone is configured");
            return Ok(());
        };
        let Some(twilio) = &self.twilio else {
            warn!("sms_enabled is on but Twilio credentials are not configured");
            return Ok(());
        };

        let body = format!(
            "GYM ALERT: {given_name} {family_name} attempted entry without payment. Tel: {}",
            phone.unwrap_or("N/A")
        );
        match twilio.send_sms(&admin_phone, &body).await {
            Ok(msg) => info!(sid = %msg.sid, "sent unpaid-attempt SMS to {admin_phone}"),
            Err(e) => warn!("failed to send unpaid-attempt SMS: {e}"),
        }

        Ok(())
    }
}

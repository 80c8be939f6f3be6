//! SmsNotifier tests: the notifier must always succeed from the gate's
//! point of view, whatever the SMS configuration looks like.

use std::sync::Arc;

use desk_core::kernel::test_dependencies::MemoryMemberStore;
use desk_core::kernel::{BaseNotifier, SmsNotifier};

#[tokio::test]
async fn succeeds_with_sms_disabled() {
    let store = Arc::new(MemoryMemberStore::new().with_setting("sms_enabled", "false"));
    let notifier = SmsNotifier::new(None, store);

    notifier
        .notify_unpaid_attempt("Ana", "Gómez", Some("+15551234567"))
        .await
        .unwrap();
}

#[tokio::test]
async fn succeeds_with_sms_enabled_but_no_twilio_client() {
    // sms_enabled on and an admin phone configured, but no credentials:
    // the alert is logged and the call still succeeds
    let store = Arc::new(
        MemoryMemberStore::new()
            .with_setting("sms_enabled", "true")
            .with_setting("admin_phone", "+15559876543"),
    );
    let notifier = SmsNotifier::new(None, store);

    notifier
        .notify_unpaid_attempt("Ana", "Gómez", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn succeeds_with_no_settings_at_all() {
    let store = Arc::new(MemoryMemberStore::new());
    let notifier = SmsNotifier::new(None, store);

    notifier
        .notify_unpaid_attempt("Ana", "Gómez", None)
        .await
        .unwrap();
}

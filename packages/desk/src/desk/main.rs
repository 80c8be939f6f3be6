// Main entry point for the front-desk terminal

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

use desk_core::common::sanitize_text;
use desk_core::domains::access::{AccessError, AccessGate, Direction};
use desk_core::domains::member::actions::{
    deactivate_member, register_member, set_payment_status, RegisterMember,
};
use desk_core::domains::member::{MemberData, PaymentStatus};
use desk_core::domains::reporting::{daily_report_csv, daily_stats, member_report_csv};
use desk_core::kernel::{BaseMemberStore, DeskDeps, PgMemberStore, SmsNotifier};
use desk_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,desk_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting gym desk access control");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_pool_size)
        .connect(&config.database_url())
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Wire dependencies
    let store = Arc::new(PgMemberStore::new(pool));
    let twilio = match (
        &config.twilio_account_sid,
        &config.twilio_auth_token,
        &config.twilio_from_number,
    ) {
        (Some(sid), Some(token), Some(from)) => Some(Arc::new(TwilioService::new(
            TwilioOptions {
                account_sid: sid.clone(),
                auth_token: token.clone(),
                from_number: from.clone(),
            },
        ))),
        _ => {
            tracing::info!("Twilio not configured; SMS alerts will be logged only");
            None
        }
    };
    let notifier = Arc::new(SmsNotifier::new(twilio, store.clone()));
    let deps = DeskDeps::new(store.clone(), notifier);
    let gate = AccessGate::new(deps, config.direction_source);

    println!("Gym desk ready. Scan a code, or type :help for commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = input.strip_prefix(':') {
            if !run_command(command, store.as_ref()).await? {
                break;
            }
        } else {
            process_scan(&gate, input).await;
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Split a command line into arguments, honoring double quotes so
/// multi-word names can be entered: `:register "Ana María" "de la Torre"`.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Run one `:command` line. Returns false when the operator quits.
async fn run_command(command: &str, store: &dyn BaseMemberStore) -> Result<bool> {
    let tokens = split_args(command);
    let Some((verb, rest)) = tokens.split_first() else {
        return Ok(true);
    };
    let verb = verb.as_str();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match verb {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "today" => show_today(store).await?,
        "members" => show_members(store).await?,
        "report" => export_daily_report(store, args.first().copied()).await?,
        "roster" => export_member_report(store).await?,
        "register" => register(store, &args).await?,
        "paid" | "pending" => {
            let Some(code) = args.first() else {
                println!("usage: :{verb} CODE");
                return Ok(true);
            };
            let status = if verb == "paid" {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            };
            match set_payment_status(code, status, store).await {
                Ok(member) => println!("{} is now {}", member.full_name(), status),
                Err(e) => println!("error: {e:#}"),
            }
        }
        "deactivate" => {
            let Some(code) = args.first() else {
                println!("usage: :deactivate CODE");
                return Ok(true);
            };
            match deactivate_member(code, store).await {
                Ok(member) => println!("deactivated {}", member.full_name()),
                Err(e) => println!("error: {e:#}"),
            }
        }
        other => println!("unknown command :{other} (try :help)"),
    }
    Ok(true)
}

async fn process_scan(gate: &AccessGate, input: &str) {
    match gate.process(input).await {
        Ok(granted) => {
            let verdict = match granted.direction {
                Direction::Entry => "ENTRY AUTHORIZED",
                Direction::Exit => "EXIT RECORDED",
            };
            println!(
                "{verdict}: {} [{}] at {}",
                granted.member.full_name(),
                granted.member.code,
                Utc::now().format("%H:%M:%S")
            );
        }
        Err(AccessError::PaymentRequired { member }) => {
            println!(
                "ACCESS DENIED: {} has not paid this month's fee",
                member.full_name()
            );
        }
        Err(AccessError::Store(e)) => {
            println!("storage unavailable, try again: {e:#}");
        }
        Err(e) => println!("{e}"),
    }
}

async fn show_today(store: &dyn BaseMemberStore) -> Result<()> {
    let today = Utc::now().date_naive();
    let events = store.events_for_date(today).await?;
    let stats = daily_stats(today, &events);

    println!("=== TODAY'S ACCESS LOG ({today}) ===");
    for event in &events {
        let icon = match event.direction {
            Direction::Entry => "[E]",
            Direction::Exit => "[X]",
        };
        println!(
            "{icon} {} - {} {} ({})",
            event.occurred_at.format("%H:%M"),
            sanitize_text(&event.given_name),
            sanitize_text(&event.family_name),
            event.direction.as_str().to_uppercase()
        );
    }
    println!(
        "{} entries, {} exits, {} distinct members",
        stats.entries, stats.exits, stats.distinct_members
    );
    Ok(())
}

async fn show_members(store: &dyn BaseMemberStore) -> Result<()> {
    let members: Vec<MemberData> = store
        .list_members()
        .await?
        .into_iter()
        .map(MemberData::from)
        .collect();

    println!("=== MEMBERS ({}) ===", members.len());
    for m in &members {
        println!(
            "{} {} - {} ({})",
            m.code,
            m.full_name(),
            m.payment_status,
            m.phone.as_deref().unwrap_or("no phone")
        );
    }
    Ok(())
}

async fn export_daily_report(store: &dyn BaseMemberStore, date_arg: Option<&str>) -> Result<()> {
    let date = match date_arg {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .context("date must be YYYY-MM-DD")?,
        None => Utc::now().date_naive(),
    };
    let events = store.events_for_date(date).await?;
    let csv = daily_report_csv(date, &events, Utc::now());
    let path = format!("access_report_{date}.csv");
    std::fs::write(&path, csv).with_context(|| format!("failed to write {path}"))?;
    println!("report written to {path}");
    Ok(())
}

async fn export_member_report(store: &dyn BaseMemberStore) -> Result<()> {
    let members: Vec<MemberData> = store
        .list_members()
        .await?
        .into_iter()
        .map(MemberData::from)
        .collect();
    let csv = member_report_csv(&members, Utc::now());
    let path = format!("member_report_{}.csv", Utc::now().date_naive());
    std::fs::write(&path, csv).with_context(|| format!("failed to write {path}"))?;
    println!("report written to {path}");
    Ok(())
}

async fn register(store: &dyn BaseMemberStore, args: &[&str]) -> Result<()> {
    if args.len() < 2 {
        println!("usage: :register GIVEN FAMILY [PHONE] [EMAIL]");
        return Ok(());
    }
    let input = RegisterMember {
        given_name: args[0].to_string(),
        family_name: args[1].to_string(),
        phone: args.get(2).map(|s| s.to_string()),
        email: args.get(3).map(|s| s.to_string()),
        payment_status: PaymentStatus::Pending,
    };
    match register_member(input, store).await {
        Ok(member) => println!(
            "registered {} with code {} (payment pending)",
            member.full_name(),
            member.code
        ),
        Err(e) => println!("error: {e:#}"),
    }
    Ok(())
}

fn print_help() {
    println!("Scan or type a 10-character code to process an access.");
    println!("Commands:");
    println!("  :today              show today's access log");
    println!("  :members            list active members");
    println!("  :report [DATE]      export daily access CSV (default today)");
    println!("  :roster             export member roster CSV");
    println!("  :register G F [P] [E]  register a member (given, family, phone, email;");
    println!("                      quote multi-word names: :register \"Ana María\" Gómez)");
    println!("  :paid CODE          mark a member as paid");
    println!("  :pending CODE       mark a member as pending");
    println!("  :deactivate CODE    soft-deactivate a member");
    println!("  :quit               exit");
}

#[cfg(test)]
mod tests {
    use super::split_args;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split_args("paid AB12CD34EF"), vec!["paid", "AB12CD34EF"]);
    }

    #[test]
    fn quoted_arguments_keep_their_spaces() {
        assert_eq!(
            split_args("register \"Ana María\" \"de la Torre\" +15551234567"),
            vec!["register", "Ana María", "de la Torre", "+15551234567"]
        );
    }

    #[test]
    fn empty_input_yields_no_arguments() {
        assert!(split_args("").is_empty());
        assert!(split_args("   ").is_empty());
    }
}

//! Gate decision-procedure tests over the in-memory store.

use std::sync::Arc;

use desk_core::config::DirectionSource;
use desk_core::domains::access::{AccessError, AccessGate, Direction};
use desk_core::domains::member::{NewMember, PaymentStatus};
use desk_core::kernel::test_dependencies::{
    FailingNotifier, MemoryMemberStore, OutageMemberStore, SpyNotifier,
};
use desk_core::kernel::{BaseMemberStore, DeskDeps};

fn member(code: &str, given: &str, family: &str, status: PaymentStatus) -> NewMember {
    NewMember {
        code: code.to_string(),
        given_name: given.to_string(),
        family_name: family.to_string(),
        phone: Some("+15551234567".to_string()),
        email: None,
        payment_status: status,
    }
}

fn gate_over(
    store: Arc<MemoryMemberStore>,
    notifier: Arc<SpyNotifier>,
    source: DirectionSource,
) -> AccessGate {
    AccessGate::new(DeskDeps::new(store, notifier), source)
}

#[tokio::test]
async fn paid_member_toggles_entry_then_exit() {
    let store = Arc::new(
        MemoryMemberStore::new().with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Paid)),
    );
    let notifier = Arc::new(SpyNotifier::new());
    let gate = gate_over(store.clone(), notifier, DirectionSource::Volatile);

    let first = gate.process("AB12CD34EF").await.unwrap();
    assert_eq!(first.direction, Direction::Entry);

    let second = gate.process("AB12CD34EF").await.unwrap();
    assert_eq!(second.direction, Direction::Exit);

    let third = gate.process("AB12CD34EF").await.unwrap();
    assert_eq!(third.direction, Direction::Entry);
}

#[tokio::test]
async fn unpaid_member_is_denied_and_notified_once() {
    let store = Arc::new(
        MemoryMemberStore::new()
            .with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Pending)),
    );
    let notifier = Arc::new(SpyNotifier::new());
    let gate = gate_over(store.clone(), notifier.clone(), DirectionSource::Volatile);

    let ana = store.find_by_code("AB12CD34EF").await.unwrap().unwrap();
    let before = store.event_count_for_member(ana.id).await.unwrap();
    let result = gate.process("AB12CD34EF").await;

    assert!(matches!(result, Err(AccessError::PaymentRequired { .. })));
    assert_eq!(notifier.call_count(), 1);

    let call = &notifier.calls()[0];
    assert_eq!(call.given_name, "Ana");
    assert_eq!(call.family_name, "Gómez");
    assert_eq!(call.phone.as_deref(), Some("+15551234567"));

    // event count for the member unchanged by the denied attempt
    assert_eq!(
        store.event_count_for_member(ana.id).await.unwrap(),
        before
    );
}

#[tokio::test]
async fn unknown_code_writes_nothing() {
    let store = Arc::new(MemoryMemberStore::new());
    let notifier = Arc::new(SpyNotifier::new());
    let gate = gate_over(store.clone(), notifier.clone(), DirectionSource::Volatile);

    let result = gate.process("ZZ99ZZ99ZZ").await;

    assert!(matches!(result, Err(AccessError::UnknownMember { code }) if code == "ZZ99ZZ99ZZ"));
    assert!(store.events().is_empty());
    assert_eq!(notifier.call_count(), 0);
}

#[tokio::test]
async fn malformed_code_stops_before_the_store() {
    let store = Arc::new(MemoryMemberStore::new());
    let notifier = Arc::new(SpyNotifier::new());
    let gate = gate_over(store.clone(), notifier, DirectionSource::Volatile);

    let result = gate.process("not a code").await;

    assert!(matches!(result, Err(AccessError::Validation(_))));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn inactive_member_reads_as_unknown() {
    let store = Arc::new(
        MemoryMemberStore::new().with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Paid)),
    );
    let ana = store.find_by_code("AB12CD34EF").await.unwrap().unwrap();
    store.set_active(ana.id, false).await.unwrap();

    let notifier = Arc::new(SpyNotifier::new());
    let gate = gate_over(store.clone(), notifier, DirectionSource::Volatile);

    let result = gate.process("AB12CD34EF").await;
    assert!(matches!(result, Err(AccessError::UnknownMember { .. })));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn notifier_failure_does_not_change_the_verdict() {
    let store = Arc::new(
        MemoryMemberStore::new()
            .with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Pending)),
    );
    let gate = AccessGate::new(
        DeskDeps::new(store.clone(), Arc::new(FailingNotifier)),
        DirectionSource::Volatile,
    );

    let result = gate.process("AB12CD34EF").await;
    assert!(matches!(result, Err(AccessError::PaymentRequired { .. })));
    assert!(store.events().is_empty());
}

#[tokio::test]
async fn append_failure_leaves_volatile_state_untouched() {
    let store = Arc::new(OutageMemberStore::new(
        MemoryMemberStore::new().with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Paid)),
    ));
    let notifier = Arc::new(SpyNotifier::new());
    let gate = AccessGate::new(
        DeskDeps::new(store.clone(), notifier),
        DirectionSource::Volatile,
    );

    store.set_append_failure(true);
    let result = gate.process("AB12CD34EF").await;
    assert!(matches!(result, Err(AccessError::Store(_))));
    assert!(store.events().is_empty());

    // once storage recovers the member still reads as outside
    store.set_append_failure(false);
    assert_eq!(
        gate.process("AB12CD34EF").await.unwrap().direction,
        Direction::Entry
    );
    assert_eq!(store.events().len(), 1);
}

#[tokio::test]
async fn volatile_state_resets_with_a_new_gate() {
    let store = Arc::new(
        MemoryMemberStore::new().with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Paid)),
    );
    let notifier = Arc::new(SpyNotifier::new());

    let gate = gate_over(store.clone(), notifier.clone(), DirectionSource::Volatile);
    assert_eq!(gate.process("AB12CD34EF").await.unwrap().direction, Direction::Entry);

    // simulated restart: everyone reads as outside again
    let restarted = gate_over(store.clone(), notifier, DirectionSource::Volatile);
    assert_eq!(
        restarted.process("AB12CD34EF").await.unwrap().direction,
        Direction::Entry
    );
}

#[tokio::test]
async fn derived_mode_continues_the_toggle_across_gates() {
    let store = Arc::new(
        MemoryMemberStore::new().with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Paid)),
    );
    let notifier = Arc::new(SpyNotifier::new());

    let gate = gate_over(store.clone(), notifier.clone(), DirectionSource::Derived);
    assert_eq!(gate.process("AB12CD34EF").await.unwrap().direction, Direction::Entry);

    // a fresh gate over the same store picks up where the log left off
    let restarted = gate_over(store.clone(), notifier, DirectionSource::Derived);
    assert_eq!(
        restarted.process("AB12CD34EF").await.unwrap().direction,
        Direction::Exit
    );
}

#[tokio::test]
async fn end_to_end_scan_day() {
    // Register Ana Gómez paid with code AB12CD34EF, scan twice, read the log.
    let store = Arc::new(
        MemoryMemberStore::new().with_member(member("AB12CD34EF", "Ana", "Gómez", PaymentStatus::Paid)),
    );
    let notifier = Arc::new(SpyNotifier::new());
    let gate = gate_over(store.clone(), notifier, DirectionSource::Volatile);

    assert_eq!(gate.process("ab12cd34ef").await.unwrap().direction, Direction::Entry);
    assert_eq!(gate.process("AB12CD34EF").await.unwrap().direction, Direction::Exit);

    let today = chrono::Utc::now().date_naive();
    let mut log = store.events_for_date(today).await.unwrap();
    log.reverse(); // chronological order

    assert_eq!(log.len(), 2);
    assert_eq!(log[0].direction, Direction::Entry);
    assert_eq!(log[1].direction, Direction::Exit);
    assert_eq!(log[0].given_name, "Ana");
    assert_eq!(log[0].family_name, "Gómez");
}

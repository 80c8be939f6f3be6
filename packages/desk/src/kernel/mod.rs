// Infrastructure: dependency traits, the deps container, and notifier impls

pub mod deps;
pub mod notifier;
pub mod test_dependencies;
pub mod traits;

pub use deps::{DeskDeps, PgMemberStore};
pub use notifier::SmsNotifier;
pub use traits::{BaseMemberStore, BaseNotifier};

use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

/// Source of submission and creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// What a mutation touched, so views know which state to refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeScope {
    Live,
    Survey(String),
}

/// "Refetch now" signal for views. Carries no state.
pub trait ChangeNotifier: Send + Sync {
    fn notify(&self, scope: ChangeScope);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

pub struct LoggingNotifier;

impl ChangeNotifier for LoggingNotifier {
    fn notify(&self, scope: ChangeScope) {
        match scope {
            ChangeScope::Live => debug!("Live survey changed, views should refetch"),
            ChangeScope::Survey(id) => debug!("Survey {} changed, views should refetch", id),
        }
    }
}

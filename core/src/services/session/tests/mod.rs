mod one_time_tests;
mod service_tests;

use std::sync::Arc;

use crate::repositories::{InMemoryKeyValueStore, ManualClock};
use crate::services::session::{OneTimeTokenPolicy, SessionConfig, SessionService};

pub(super) const SECRET: &str = "test-secret-for-session-service";

/// Session service over an in-memory store driven by a manual clock
pub(super) fn service_with_policy(
    policy: OneTimeTokenPolicy,
) -> (SessionService, Arc<InMemoryKeyValueStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(InMemoryKeyValueStore::with_clock(clock.clone()));
    let config = SessionConfig::new(SECRET).with_policy(policy);
    let service = SessionService::new(store.clone(), config).unwrap();
    (service, store, clock)
}

pub(super) fn service() -> (SessionService, Arc<InMemoryKeyValueStore>, Arc<ManualClock>) {
    service_with_policy(OneTimeTokenPolicy::Replayable)
}

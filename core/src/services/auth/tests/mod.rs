
use std::sync::Arc;

use crate::repositories::{InMemoryKeyValueStore, InMemoryUserRepository, ManualClock};
use crate::services::auth::{AuthService, BcryptPasswordHasher, RecordingMailer};
use crate::services::session::{OneTimeTokenPolicy, SessionConfig, SessionService};

/// Lowest cost bcrypt accepts
pub(super) const TEST_BCRYPT_COST: u32 = 4;

pub(super) struct Fixture {
    pub service: AuthService,
    pub users: Arc<InMemoryUserRepository>,
    pub store: Arc<InMemoryKeyValueStore>,
    pub mailer: Arc<RecordingMailer>,
    pub clock: Arc<ManualClock>,
}

pub(super) fn fixture_with_policy(policy: OneTimeTokenPolicy) -> Fixture {
    let clock = Arc::new(ManualClock::default());
    let store = Arc::new(InMemoryKeyValueStore::with_clock(clock.clone()));
    let users = Arc::new(InMemoryUserRepository::new());
    let mailer = Arc::new(RecordingMailer::new());

    let session = SessionService::new(
        store.clone(),
        SessionConfig::new("auth-service-test-secret").with_policy(policy),
    )
    .unwrap();

    let service = AuthService::new(
        users.clone(),
        Arc::new(session),
        Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST)),
        mailer.clone(),
    );

    Fixture {
        service,
        users,
        store,
        mailer,
        clock,
    }
}

pub(super) fn fixture() -> Fixture {
    fixture_with_policy(OneTimeTokenPolicy::Replayable)
}

/// Pulls the one-time token out of a rendered email body
pub(super) fn token_from_mail(body: &str) -> String {
    let marker = "letter-spacing: 2px;\">";
    let start = body.find(marker).map(|i| i + marker.len()).unwrap();
    let end = body[start..].find('<').unwrap() + start;
    body[start..end].to_string()
}

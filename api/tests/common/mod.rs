#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use lr_api::AppState;
use lr_core::repositories::{InMemoryKeyValueStore, InMemoryUserRepository};
use lr_core::services::{
    AuthService, BcryptPasswordHasher, FileService, FileServiceConfig, InMemoryObjectStorage,
    RecordingMailer, SessionConfig, SessionService,
};

pub const SECRET: &str = "api-integration-test-secret";
pub const CDN_URL: &str = "https://cdn.lightroom.test";
pub const BUCKET_URL: &str = "https://account.r2.cloudflarestorage.com";
pub const BOUNDARY: &str = "light-room-boundary";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<InMemoryUserRepository>,
    pub store: Arc<InMemoryKeyValueStore>,
    pub mailer: Arc<RecordingMailer>,
    pub storage: Arc<InMemoryObjectStorage>,
}

pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let store = Arc::new(InMemoryKeyValueStore::new());
    let mailer = Arc::new(RecordingMailer::new());
    let storage = Arc::new(InMemoryObjectStorage::new());

    let session = Arc::new(SessionService::new(store.clone(), SessionConfig::new(SECRET)).unwrap());
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        session,
        Arc::new(BcryptPasswordHasher::new(4)),
        mailer.clone(),
    ));
    let file_service = Arc::new(FileService::new(
        storage.clone(),
        FileServiceConfig {
            environment: "test".to_string(),
            cdn_url: CDN_URL.to_string(),
            bucket_url: BUCKET_URL.to_string(),
        },
    ));

    let state = web::Data::new(
        AppState::new(auth_service, file_service).with_max_upload_bytes(1024),
    );

    TestContext {
        state,
        users,
        store,
        mailer,
        storage,
    }
}

/// Pulls the one-time token out of a rendered email body
pub fn token_from_mail(body: &str) -> String {
    let marker = "letter-spacing: 2px;\">";
    let start = body.find(marker).map(|i| i + marker.len()).unwrap();
    let end = body[start..].find('<').unwrap() + start;
    body[start..end].to_string()
}

/// Single-part multipart body for the `files` field
pub fn multipart_body(file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

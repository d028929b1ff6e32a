mod common;

use actix_web::{http::header, http::StatusCode, test};
use lr_api::create_app;
use lr_shared::ErrorResponse;
use serde_json::json;
use uuid::Uuid;

use common::{multipart_body, multipart_content_type, test_context, CDN_URL};

fn bearer(ctx: &common::TestContext) -> String {
    let access = ctx
        .state
        .session_service
        .issue_access_token(Uuid::new_v4())
        .unwrap();
    format!("Bearer {}", access)
}

#[actix_web::test]
async fn test_upload_and_delete_file() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let auth = bearer(&ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/misc/upload-file?fileType=PROFILE")
        .insert_header((header::AUTHORIZATION, auth.clone()))
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(multipart_body("avatar.png", "image/png", b"png-bytes"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let urls: Vec<String> = test::read_body_json(resp).await;
    assert_eq!(urls, vec![format!("{}/test/PROFILE/avatar.png", CDN_URL)]);

    let stored = ctx.storage.object("test/PROFILE/avatar.png").unwrap();
    assert_eq!(stored.body, b"png-bytes".to_vec());
    assert_eq!(stored.content_type, "image/png");

    let req = test::TestRequest::post()
        .uri("/api/v1/misc/delete-file")
        .insert_header((header::AUTHORIZATION, auth))
        .set_json(json!({ "file": urls[0] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.storage.keys().is_empty());
}

#[actix_web::test]
async fn test_upload_requires_file_type() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let auth = bearer(&ctx);

    for uri in ["/api/v1/misc/upload-file", "/api/v1/misc/upload-file?fileType=AVATAR"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header((header::AUTHORIZATION, auth.clone()))
            .insert_header((header::CONTENT_TYPE, multipart_content_type()))
            .set_payload(multipart_body("avatar.png", "image/png", b"png-bytes"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert!(ctx.storage.keys().is_empty());
}

#[actix_web::test]
async fn test_upload_over_limit_is_rejected() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/misc/upload-file?fileType=PORTFOLIO")
        .insert_header((header::AUTHORIZATION, bearer(&ctx)))
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(multipart_body("big.png", "image/png", &vec![7u8; 2048]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "PAYLOAD_TOO_LARGE");
    assert!(ctx.storage.keys().is_empty());
}

#[actix_web::test]
async fn test_upload_requires_authentication() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/misc/upload-file?fileType=PROFILE")
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(multipart_body("avatar.png", "image/png", b"png-bytes"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_delete_rejects_foreign_url() {
    let ctx = test_context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/misc/delete-file")
        .insert_header((header::AUTHORIZATION, bearer(&ctx)))
        .set_json(json!({ "file": "https://elsewhere.example.com/test/PROFILE/a.png" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

use actix_web::http::{header, StatusCode};
use actix_web::test::TestRequest;
use actix_web::{test, web, App};
use httpmock::prelude::*;
use httpmock::prelude::HttpMockRequest;
use serde_json::{json, Value};

use nodde_community::api;

mod support;

fn body_json(req: &HttpMockRequest) -> Value {
    req.body
        .as_deref()
        .and_then(|b| serde_json::from_slice(b).ok())
        .unwrap_or(Value::Null)
}

#[actix_web::test]
async fn sign_in_forwards_cookie_and_relays_set_cookie() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/sign_in")
                .header("cookie", "sid=old")
                .json_body(json!({ "message": "msg", "signature": "0xsig" }));
            then.status(200)
                .header("set-cookie", "sid=new; Path=/; HttpOnly")
                .json_body(json!({ "ok": true }));
        })
        .await;

    let state = web::Data::new(support::build_state(support::test_config(&server.base_url())));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let req = TestRequest::post()
        .uri("/api/auth/signIn")
        .insert_header((header::COOKIE, "sid=old"))
        .set_json(json!({ "message": "msg", "signature": "0xsig" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<String> = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    assert_eq!(cookies, vec!["sid=new; Path=/; HttpOnly".to_string()]);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    mock.assert_async().await;
}

#[actix_web::test]
async fn sign_out_expires_every_sent_cookie() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/sign_out");
            then.status(200).json_body(json!({}));
        })
        .await;

    let state = web::Data::new(support::build_state(support::test_config(&server.base_url())));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let req = TestRequest::post()
        .uri("/api/auth/signOut")
        .insert_header((header::COOKIE, "sid=abc; theme=dark"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookies: Vec<&str> = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cookies.contains(&"sid=; Path=/; Max-Age=0"));
    assert!(cookies.contains(&"theme=; Path=/; Max-Age=0"));
}

#[actix_web::test]
async fn auth_status_reflects_cookie_presence() {
    let state = web::Data::new(support::build_state(support::test_config("http://127.0.0.1:9")));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/api/auth/status").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "authStatus": "unauthenticated" }));

    let req = TestRequest::get()
        .uri("/api/auth/status")
        .insert_header((header::COOKIE, "sid=abc"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body, json!({ "authStatus": "authenticated" }));
}

#[actix_web::test]
async fn subscription_images_are_replaced_by_keys() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subscription/update")
                .matches(|req: &HttpMockRequest| {
                    let body = body_json(req);
                    body.get("newMainBase64Image").is_none()
                        && body.get("newPreviewBase64Image").is_none()
                        && body["mainImageId"].as_str().map_or(false, |k| k.len() == 36)
                        && body["previewImageId"] == "kept-preview"
                        && body["title"] == "Gold"
                });
            then.status(200).json_body(json!({ "status": "success" }));
        })
        .await;

    let state = web::Data::new(support::build_state(support::test_config(&server.base_url())));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let req = TestRequest::post()
        .uri("/api/subscription/update")
        .set_json(json!({
            "id": "0xabc",
            "ownerId": "7",
            "status": "DRAFT",
            "title": "Gold",
            "description": "desc",
            "newMainBase64Image": support::data_uri(b"main image"),
            "previewImageId": "kept-preview",
            "price": "5",
            "coin": "KUSH"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[actix_web::test]
async fn broken_image_payload_is_rejected_before_backend() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/profile/update");
            then.status(200);
        })
        .await;

    let state = web::Data::new(support::build_state(support::test_config(&server.base_url())));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let req = TestRequest::post()
        .uri("/api/profile/update")
        .set_json(json!({
            "id": "7",
            "title": "Club",
            "description": "About",
            "newBase64Image": "not-a-data-uri",
            "socialMediaLinks": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.hits_async().await, 0);
}

#[actix_web::test]
async fn oversized_profile_body_is_refused() {
    let state = web::Data::new(support::build_state(support::test_config("http://127.0.0.1:9")));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let padding = "a".repeat(4 * 1024 * 1024);
    let req = TestRequest::post()
        .uri("/api/profile/update")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(format!("{{\"id\":\"7\",\"title\":\"{padding}\"}}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn backend_error_status_is_relayed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subscription/publish")
                .json_body(json!({ "subscriptionId": "0xabc" }));
            then.status(403).json_body(json!({ "message": "not owner" }));
        })
        .await;

    let state = web::Data::new(support::build_state(support::test_config(&server.base_url())));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let req = TestRequest::post()
        .uri("/api/subscription/publish")
        .set_json(json!({ "subscriptionId": "0xabc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "not owner");
}

#[actix_web::test]
async fn unreachable_backend_is_bad_gateway() {
    let state = web::Data::new(support::build_state(support::test_config("http://127.0.0.1:9")));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let req = TestRequest::post()
        .uri("/api/integration/telegramChat")
        .set_json(json!({ "subscriptionId": "0xabc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn featured_profiles_skip_failures() {
    let server = MockServer::start_async().await;
    for (id, title) in [("7", "Seven"), ("1", "One")] {
        server
            .mock_async(move |when, then| {
                when.method(POST)
                    .path("/profile/")
                    .json_body(json!({ "profileId": id }));
                then.status(200).json_body(json!({
                    "status": "success",
                    "data": {
                        "id": id,
                        "title": title,
                        "description": "d",
                        "logoId": format!("logo-{id}")
                    }
                }));
            })
            .await;
    }
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/profile/")
                .json_body(json!({ "profileId": "2" }));
            then.status(500);
        })
        .await;

    let state = web::Data::new(support::build_state(support::test_config(&server.base_url())));
    let app = test::init_service(App::new().app_data(state.clone()).configure(api::configure)).await;

    let resp = test::call_service(&app, TestRequest::get().uri("/api/profile/featured").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let ids: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["1", "7"]);
    assert_eq!(
        body[0]["logoUrl"],
        format!("http://localhost:9000/{}/logo-1", support::PROFILE_BUCKET)
    );
}

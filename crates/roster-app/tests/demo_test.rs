//! Runs the console walk-through against a mock directory API.

use roster_app::demo::run_demo;
use roster_app::di::{build_module, ServiceResolver};
use roster_config::AppConfig;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: i64, first: &str, last: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        "first_name": first,
        "last_name": last,
        "avatar": format!("https://reqres.in/img/faces/{}-image.jpg", id),
    })
}

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.api.api_key = "demo-key".to_string();
    config.validate().expect("valid config");
    config
}

#[tokio::test]
async fn second_round_is_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "1"))
        .and(header("x-api-key", "demo-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 2,
            "data": [user_json(1, "George", "Bluth"), user_json(2, "Janet", "Weaver")],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "total_pages": 2,
            "data": [user_json(3, "Emma", "Wong")],
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": user_json(2, "Janet", "Weaver") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let module = build_module(&config_for(&server)).expect("module");
    let directory = module.directory_service();
    let cancel = CancellationToken::new();
    let mut out = Vec::new();

    run_demo(directory.as_ref(), &cancel, &mut out).await.expect("demo");

    let output = String::from_utf8(out).expect("utf-8 output");
    let expected = "\
Fetching all users...
User ID: 1, Name: George Bluth
User ID: 2, Name: Janet Weaver
User ID: 3, Name: Emma Wong

Fetching details for user with ID 2...
User ID: 2, Name: Janet Weaver

Fetching all users from cache...
User ID: 1, Name: George Bluth
User ID: 2, Name: Janet Weaver
User ID: 3, Name: Emma Wong

Fetching details for user with ID 2 from cache...
User ID: 2, Name: Janet Weaver

";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn api_failure_surfaces_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let module = build_module(&config_for(&server)).expect("module");
    let directory = module.directory_service();
    let cancel = CancellationToken::new();
    let mut out = Vec::new();

    let err = run_demo(directory.as_ref(), &cancel, &mut out)
        .await
        .expect_err("401 fails the walk-through");

    assert_eq!(err.to_string(), "Error in getting all users");
    assert_eq!(err.root_cause().error_code(), "API_ERROR");
}

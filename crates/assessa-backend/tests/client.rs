use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assessa_backend::client::{BackendClient, BackendConfig};
use assessa_backend::error::BackendError;
use assessa_backend::reference::{FormKind, load_options};
use assessa_core::api_paths::Resource;
use assessa_core::models::assignment::AssignmentStatus;
use assessa_core::models::club::Club;
use assessa_core::models::test::Test;

fn client(server: &MockServer) -> BackendClient {
    BackendClient::new(&BackendConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn find_all_decodes_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clubs/findAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "研发部" },
            { "id": 2, "name": "市场部", "user": [{ "id": 3, "name": "李四", "role": "MANAGER" }] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let clubs: Vec<Club> = client(&server).find_all(Resource::Clubs).await.unwrap();
    assert_eq!(clubs.len(), 2);
    assert_eq!(clubs[1].user[0].name, "李四");
}

#[tokio::test]
async fn body_keyed_lookup_posts_the_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clubs/findOne"))
        .and(body_json(json!({ "name": "研发部" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1, "name": "研发部" })))
        .expect(1)
        .mount(&server)
        .await;

    let club: Club = client(&server).find_one(Resource::Clubs, "研发部").await.unwrap();
    assert_eq!(club.id, 1);
}

#[tokio::test]
async fn path_keyed_lookup_encodes_the_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tests/findOne/%E5%AD%A3%E5%BA%A6%20A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4, "name": "季度 A" })))
        .expect(1)
        .mount(&server)
        .await;

    let test: Test = client(&server).find_one(Resource::Tests, "季度 A").await.unwrap();
    assert_eq!(test.name, "季度 A");
}

#[tokio::test]
async fn missing_entity_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tests/findOne/nope"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server)
        .find_one::<Test>(Resource::Tests, "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::NotFound { .. }));
}

#[tokio::test]
async fn create_surfaces_message_as_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clubs/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "部门已存在" })))
        .mount(&server)
        .await;

    let err = client(&server)
        .create::<_, Value>(Resource::Clubs, &json!({ "name": "研发部" }))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Rejected(ref m) if m == "部门已存在"));
}

#[tokio::test]
async fn body_keyed_update_carries_the_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/positions/update"))
        .and(body_json(json!({ "id": 5, "name": "高级工程师", "clubs": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_with_id::<_, Value>(Resource::Positions, 5, &json!({ "name": "高级工程师", "clubs": [] }))
        .await
        .unwrap();
}

#[tokio::test]
async fn path_keyed_update_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/questions/update/q1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .update_by_name::<_, Value>(Resource::Questions, "q1", &json!({ "name": "q1", "content": "c" }))
        .await
        .unwrap();
}

#[tokio::test]
async fn state_and_score_updates_post_the_expected_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assignments/update/state"))
        .and(body_json(json!({ "id": 7, "state": "IN_PROGRESS" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/assignments/update/score"))
        .and(body_json(json!({ "id": 7, "scoreSet": [5.0, null, 3.0] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.update_state(7, AssignmentStatus::InProgress).await.unwrap();
    client.update_score(7, &[Some(5.0), None, Some(3.0)]).await.unwrap();
}

#[tokio::test]
async fn delete_accepts_an_empty_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/assignments/delete/12"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).delete_by_id(Resource::Assignments, 12).await.unwrap();
    assert_eq!(reply, Value::Null);
}

#[tokio::test]
async fn form_options_load_every_list_the_form_needs() {
    let server = MockServer::start().await;
    for (resource, name) in [("clubs", "研发部"), ("miniClubs", "前端组"), ("positions", "工程师")] {
        Mock::given(method("GET"))
            .and(path(format!("/{resource}/findAll")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": name }])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let options = load_options(&client(&server), FormKind::User).await.unwrap();
    assert_eq!(options.clubs, vec!["研发部"]);
    assert_eq!(options.mini_clubs, vec!["前端组"]);
    assert_eq!(options.positions, vec!["工程师"]);
    assert!(options.tests.is_empty());
}

#[tokio::test]
async fn one_failed_list_fails_the_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/questions/findAll"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = load_options(&client(&server), FormKind::MiniTest).await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 500, .. }));
}

#[test]
fn base_path_is_kept_when_joining() {
    let client = BackendClient::new(&BackendConfig::new("http://backend.local/api/")).unwrap();
    let url = client
        .url(&assessa_core::api_paths::delete_by_name(Resource::Clubs, "a/b"))
        .unwrap();
    assert_eq!(url.as_str(), "http://backend.local/api/clubs/delete/name/a%2Fb");
}

use ::common::config::GameConfig;
use serde_json::json;

use crate::common::{TestApp, routes};

fn single_pair_document(done: bool) -> serde_json::Value {
    json!({
        "providers": [{ "id": "aws", "name": "AWS", "color": "#FF9900" }],
        "deployments": [{ "id": "vm", "name": "VM" }],
        "challenges": [{
            "id": "c1",
            "provider_id": "aws",
            "deployment_id": "vm",
            "is_done": done,
            "created_at": "2024-01-01T00:00:00Z"
        }]
    })
}

#[tokio::test]
async fn provider_spin_ends_on_pick() {
    let app = TestApp::spawn().await;
    let res = app.post_empty(routes::SPIN_PROVIDER).await;

    assert_eq!(res.status, 200);
    let id = res.body["provider"]["id"].as_str().unwrap();
    assert!(["aws", "gcp", "azure", "oracle"].contains(&id));

    let frames = res.body["animation"]["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 10);
    assert_eq!(frames.last().unwrap(), id);
    assert_eq!(res.body["animation"]["reveal_after_ms"], 6000);
}

#[tokio::test]
async fn deployment_spin_records_challenge() {
    let app = TestApp::spawn().await;
    let res = app
        .post(routes::SPIN_DEPLOYMENT, &json!({ "provider_id": "gcp" }))
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["challenge"]["provider_name"], "GCP");
    assert_eq!(res.body["challenge"]["deployment_name"], res.body["deployment"]["name"]);
    assert_eq!(res.body["challenge"]["is_done"], false);

    let listed = app.get(routes::CHALLENGES).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn deployment_spin_for_unknown_provider_is_not_found() {
    let app = TestApp::spawn().await;
    let res = app
        .post(routes::SPIN_DEPLOYMENT, &json!({ "provider_id": "ibm" }))
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn exclusion_can_leave_nothing_to_draw() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::IMPORT, &single_pair_document(true)).await;
    assert_eq!(res.status, 200, "import failed: {}", res.text);

    let res = app
        .post(
            routes::SPIN_DEPLOYMENT,
            &json!({ "provider_id": "aws", "exclude_completed": true }),
        )
        .await;
    assert_eq!(res.status, 404);

    let res = app
        .post(
            routes::SPIN_DEPLOYMENT,
            &json!({ "provider_id": "aws", "exclude_completed": false }),
        )
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["deployment"]["id"], "vm");
}

#[tokio::test]
async fn exclusion_defaults_to_server_setting() {
    let app = TestApp::spawn_with_game(GameConfig {
        exclude_completed: true,
        ..GameConfig::default()
    })
    .await;
    app.post(routes::IMPORT, &single_pair_document(true)).await;

    let res = app
        .post(routes::SPIN_DEPLOYMENT, &json!({ "provider_id": "aws" }))
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn open_attempts_do_not_exclude() {
    let app = TestApp::spawn().await;
    app.post(routes::IMPORT, &single_pair_document(false)).await;

    let res = app
        .post(
            routes::SPIN_DEPLOYMENT,
            &json!({ "provider_id": "aws", "exclude_completed": true }),
        )
        .await;
    assert_eq!(res.status, 200);
}

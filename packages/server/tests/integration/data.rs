use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn export_is_a_json_attachment() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::EXPORT).await;

    assert_eq!(res.status, 200);
    let disposition = res.disposition.unwrap();
    assert!(disposition.starts_with("attachment; filename=\"cloud-roulette-"));
    assert_eq!(res.body["providers"].as_array().unwrap().len(), 4);
    assert_eq!(res.body["deployments"].as_array().unwrap().len(), 11);
    assert_eq!(res.body["challenges"].as_array().unwrap().len(), 4);
    assert!(res.text.contains("\n  \"providers\""));
}

#[tokio::test]
async fn export_then_import_round_trips() {
    let app = TestApp::spawn().await;
    let id = app.create_challenge("aws", "eck-stack").await;
    app.post_empty(&routes::challenge_toggle(&id)).await;
    let exported = app.get(routes::EXPORT).await.text;

    let other = TestApp::spawn().await;
    let res = other.post_raw(routes::IMPORT, &exported).await;
    assert_eq!(res.status, 200, "import failed: {}", res.text);
    assert_eq!(res.body["challenges"], 5);

    assert_eq!(other.get(routes::EXPORT).await.text, exported);
}

#[tokio::test]
async fn import_persists_to_store_file() {
    let app = TestApp::spawn().await;
    assert!(!app.store_path.exists());

    let document = json!({
        "providers": [{ "id": "aws", "name": "AWS", "color": "#FF9900" }],
        "deployments": [],
        "challenges": []
    });
    app.post(routes::IMPORT, &document).await;

    let saved = std::fs::read_to_string(&app.store_path).unwrap();
    assert!(saved.contains("\"AWS\""));
}

#[tokio::test]
async fn dangling_reference_is_imported_as_unknown() {
    let app = TestApp::spawn().await;
    let document = json!({
        "providers": [{ "id": "aws", "name": "AWS", "color": "#FF9900" }],
        "deployments": [],
        "challenges": [{
            "id": "c1",
            "provider_id": "aws",
            "deployment_id": "vm",
            "is_done": false,
            "created_at": "2024-01-01T00:00:00Z"
        }]
    });
    let res = app.post(routes::IMPORT, &document).await;
    assert_eq!(res.status, 200, "import failed: {}", res.text);

    let challenges = app.get(routes::CHALLENGES).await;
    assert_eq!(challenges.body[0]["provider_name"], "AWS");
    assert_eq!(challenges.body[0]["deployment_name"], "Unknown");
}

#[tokio::test]
async fn duplicate_ids_are_rejected_and_data_kept() {
    let app = TestApp::spawn().await;
    let document = json!({
        "providers": [
            { "id": "aws", "name": "AWS", "color": "#FF9900" },
            { "id": "aws", "name": "AWS again", "color": "#000000" }
        ],
        "deployments": [],
        "challenges": []
    });
    let res = app.post(routes::IMPORT, &document).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    let providers = app.get(routes::PROVIDERS).await;
    assert_eq!(providers.body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn malformed_body_is_validation_error() {
    let app = TestApp::spawn().await;
    let res = app.post_raw(routes::IMPORT, "{ not json").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

use serde_json::json;

use crate::common::{TestApp, routes};

/// Index of a column by provider name.
fn column(body: &serde_json::Value, provider: &str) -> usize {
    body["columns"]
        .as_array()
        .unwrap()
        .iter()
        .position(|c| c["name"] == provider)
        .unwrap()
}

/// Cell of the row whose deployment is `deployment`.
fn cell(body: &serde_json::Value, deployment: &str, provider: &str) -> serde_json::Value {
    let column = column(body, provider);
    body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["deployment_name"] == deployment)
        .unwrap()["cells"][column]
        .clone()
}

async fn scenario_app() -> TestApp {
    let app = TestApp::spawn().await;
    let document = json!({
        "providers": [
            { "id": "aws", "name": "AWS", "color": "#FF9900" },
            { "id": "gcp", "name": "GCP", "color": "#4285F4" }
        ],
        "deployments": [
            { "id": "vm", "name": "VM" },
            { "id": "db", "name": "Database" }
        ],
        "challenges": []
    });
    let res = app.post(routes::IMPORT, &document).await;
    assert_eq!(res.status, 200, "import failed: {}", res.text);
    app
}

#[tokio::test]
async fn empty_store_gives_empty_cells() {
    let app = scenario_app().await;
    let res = app.get(routes::TRACKER).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["mode"], "deployment");
    assert_eq!(res.body["rows"].as_array().unwrap().len(), 2);
    for deployment in ["VM", "Database"] {
        for provider in ["AWS", "GCP"] {
            let cell = cell(&res.body, deployment, provider);
            assert_eq!(cell["attempted"], false);
            assert_eq!(cell["done"], false);
        }
    }
}

#[tokio::test]
async fn aws_vm_scenario() {
    let app = scenario_app().await;
    let id = app.create_challenge("aws", "vm").await;

    let res = app.get(routes::TRACKER).await;
    assert_eq!(cell(&res.body, "VM", "AWS")["attempted"], true);
    assert_eq!(cell(&res.body, "VM", "AWS")["done"], false);

    let toggled = app.post_empty(&routes::challenge_toggle(&id)).await;
    assert_eq!(toggled.body["is_done"], true);

    let res = app.get(routes::TRACKER).await;
    assert_eq!(cell(&res.body, "VM", "AWS")["done"], true);
    assert_eq!(cell(&res.body, "VM", "GCP")["done"], false);
    assert_eq!(cell(&res.body, "Database", "AWS")["done"], false);
}

#[tokio::test]
async fn challenge_mode_lists_each_challenge() {
    let app = scenario_app().await;
    let first = app.create_challenge("aws", "vm").await;
    app.create_challenge("gcp", "vm").await;

    let res = app.get(&routes::tracker_mode("challenge")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["mode"], "challenge");
    let rows = res.body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["challenge_id"], first.as_str());
}

#[tokio::test]
async fn unknown_mode_is_rejected() {
    let app = scenario_app().await;
    let res = app.get(&routes::tracker_mode("grid")).await;
    assert_eq!(res.status, 400);
}

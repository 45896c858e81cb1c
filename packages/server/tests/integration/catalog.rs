use crate::common::{TestApp, routes};

#[tokio::test]
async fn lists_default_providers_in_order() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::PROVIDERS).await;

    assert_eq!(res.status, 200);
    let providers = res.body.as_array().unwrap();
    let names: Vec<_> = providers.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["AWS", "GCP", "Azure", "Oracle"]);
    assert_eq!(providers[0]["color"], "#FF9900");
    assert_eq!(providers[1]["color"], "#4285F4");
}

#[tokio::test]
async fn lists_default_deployments() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::DEPLOYMENTS).await;

    assert_eq!(res.status, 200);
    let deployments = res.body.as_array().unwrap();
    assert_eq!(deployments.len(), 11);
    assert_eq!(deployments[0]["id"], "kubernetes-cluster");
    assert!(deployments.iter().any(|d| d["name"] == "Basic VM"));
}

#[tokio::test]
async fn serves_openapi_document() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["info"]["title"], "Cloud Roulette API");
    assert!(res.body["paths"]["/api/v1/challenges/{id}/toggle"].is_object());
}

use serde_json::json;

use crate::common::{TestApp, routes};

mod challenge_creation {
    use super::*;

    #[tokio::test]
    async fn creates_open_challenge_with_names() {
        let app = TestApp::spawn().await;
        let body = json!({ "provider_id": "aws", "deployment_id": "database" });
        let res = app.post(routes::CHALLENGES, &body).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["provider_name"], "AWS");
        assert_eq!(res.body["deployment_name"], "Database");
        assert_eq!(res.body["is_done"], false);
        assert!(res.body["created_at"].is_string());
    }

    #[tokio::test]
    async fn created_challenge_is_listed() {
        let app = TestApp::spawn().await;
        let id = app.create_challenge("oracle", "argocd").await;

        let res = app.get(routes::CHALLENGES).await;
        assert_eq!(res.status, 200);
        let challenges = res.body.as_array().unwrap();
        assert_eq!(challenges.len(), 5);
        let created = challenges.iter().find(|c| c["id"] == id.as_str()).unwrap();
        assert_eq!(created["provider_name"], "Oracle");
        assert_eq!(created["deployment_name"], "K8S: ArgoCD");
        assert_eq!(created["is_done"], false);
    }

    #[tokio::test]
    async fn unknown_provider_is_not_found() {
        let app = TestApp::spawn().await;
        let body = json!({ "provider_id": "ibm", "deployment_id": "database" });
        let res = app.post(routes::CHALLENGES, &body).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn missing_field_is_validation_error() {
        let app = TestApp::spawn().await;
        let res = app
            .post(routes::CHALLENGES, &json!({ "provider_id": "aws" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod challenge_completion {
    use super::*;

    #[tokio::test]
    async fn patch_sets_completion_state() {
        let app = TestApp::spawn().await;
        let id = app.create_challenge("gcp", "basic-vm").await;

        let res = app
            .patch(&routes::challenge(&id), &json!({ "is_done": true }))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["is_done"], true);

        let res = app
            .patch(&routes::challenge(&id), &json!({ "is_done": false }))
            .await;
        assert_eq!(res.body["is_done"], false);
    }

    #[tokio::test]
    async fn patch_unknown_challenge_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app
            .patch(&routes::challenge("missing"), &json!({ "is_done": true }))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn double_toggle_restores_state() {
        let app = TestApp::spawn().await;
        let id = app.create_challenge("azure", "message-queue").await;

        let first = app.post_empty(&routes::challenge_toggle(&id)).await;
        assert_eq!(first.status, 200);
        assert_eq!(first.body["is_done"], true);

        let second = app.post_empty(&routes::challenge_toggle(&id)).await;
        assert_eq!(second.body["is_done"], false);

        let res = app.get(routes::CHALLENGES).await;
        let listed = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == id.as_str())
            .unwrap()
            .clone();
        assert_eq!(listed["is_done"], false);
    }

    #[tokio::test]
    async fn toggle_unknown_challenge_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.post_empty(&routes::challenge_toggle("missing")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

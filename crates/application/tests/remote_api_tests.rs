//! API client against a stubbed remote backend

use application::config::ApiConfig;
use application::{ApiClient, ApiError, FixedRandom, MatchWeights, RecommendationScorer};
use domain::{fixtures, Post, PostType};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use storage::LocalDb;

fn remote_client(base_url: String, db: LocalDb) -> ApiClient {
    let config = ApiConfig {
        base_url: Some(base_url),
        ..ApiConfig::instant()
    };
    let scorer = RecommendationScorer::new(MatchWeights::default(), Arc::new(FixedRandom(0)));
    ApiClient::new(config, db, scorer)
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/posts")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::to_string(&fixtures::posts()).unwrap())
        .create_async()
        .await;

    let db = LocalDb::in_memory();
    db.set_token(Some("tok-123")).unwrap();
    let api = remote_client(server.url(), db);

    let posts = api.get_posts().await.unwrap();
    assert_eq!(posts.len(), fixtures::posts().len());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_token_means_no_auth_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/communities")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api = remote_client(server.url(), LocalDb::in_memory());
    assert!(api.get_communities().await.unwrap().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/owner_me")
        .with_status(502)
        .create_async()
        .await;

    let api = remote_client(server.url(), LocalDb::in_memory());
    let err = api.get_current_user("owner_me").await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 502 }));
    assert_eq!(err.to_string(), "HTTP Error: 502");
}

#[tokio::test]
async fn test_post_body_and_empty_put_response() {
    let mut server = Server::new_async().await;
    let post = Post::new("owner_me", "cat_mochi", PostType::Daily, "Zoomies at 3am");
    let create = server
        .mock("POST", "/posts")
        .match_body(Matcher::PartialJson(json!({
            "content": "Zoomies at 3am",
            "type": "DAILY"
        })))
        .with_status(201)
        .with_body(serde_json::to_string(&post).unwrap())
        .create_async()
        .await;
    let update = server
        .mock("PUT", "/users/owner_me")
        .with_status(204)
        .create_async()
        .await;

    let db = LocalDb::in_memory();
    let api = remote_client(server.url(), db.clone());

    assert_eq!(api.create_post(&post).await.unwrap().id, post.id);
    api.update_user(&fixtures::owner_me()).await.unwrap();
    create.assert_async().await;
    update.assert_async().await;

    // the remote path leaves local storage alone
    assert!(db.posts().unwrap().is_empty());
}

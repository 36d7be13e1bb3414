//! HTTP behaviour of the remote client against a mock server.

use mockito::{Matcher, Server};
use tagsift::domain::models::RemoteConfig;
use tagsift::domain::ports::{CandidateSource, PublishTarget};
use tagsift::infrastructure::remote::{RemoteClient, RemoteError};

/// base64("curator:secret-key")
const BASIC_AUTH: &str = "Basic Y3VyYXRvcjpzZWNyZXQta2V5";

fn config(base_url: String) -> RemoteConfig {
    RemoteConfig {
        base_url,
        login: "curator".to_string(),
        api_key: "secret-key".to_string(),
        user_agent: "tagsift-tests/1.0".to_string(),
        max_retries: 0,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        ..RemoteConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_page_sends_query_and_auth() {
    let mut server = Server::new_async().await;
    let body = serde_json::json!({
        "posts": [{
            "id": 100,
            "created_at": "2024-01-02T03:04:05.000+00:00",
            "tags": {"general": ["wolf", "snow"], "species": ["canine"]},
            "file": {"url": "https://static.example/100.png", "ext": "png", "width": 10, "height": 20}
        }]
    });
    let mock = server
        .mock("GET", "/posts.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "320".into()),
            Matcher::UrlEncoded("tags".into(), "wolf -comic".into()),
            Matcher::UrlEncoded("page".into(), "2".into()),
        ]))
        .match_header("authorization", BASIC_AUTH)
        .match_header("user-agent", "tagsift-tests/1.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = RemoteClient::new(&config(server.url())).unwrap();
    let posts = client.fetch_page("wolf -comic", 2, 320).await.unwrap();

    mock.assert_async().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 100);
    assert_eq!(posts[0].flattened_tags(), vec!["wolf", "snow", "canine"]);
}

#[tokio::test]
async fn test_vote_uses_no_unvote() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/posts/5/votes.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("no_unvote".into(), "true".into()),
            Matcher::UrlEncoded("score".into(), "-1".into()),
        ]))
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body(r#"{"score": -1}"#)
        .create_async()
        .await;

    let client = RemoteClient::new(&config(server.url())).unwrap();
    client.vote(5, false).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_favorite_already_present_is_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/favorites.json")
        .match_query(Matcher::UrlEncoded("post_id".into(), "5".into()))
        .with_status(422)
        .with_body(r#"{"success": false, "message": "You have already favorited this post"}"#)
        .create_async()
        .await;

    let client = RemoteClient::new(&config(server.url())).unwrap();
    client.favorite(5).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unfavorite_missing_is_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/favorites/5.json")
        .with_status(404)
        .create_async()
        .await;

    let client = RemoteClient::new(&config(server.url())).unwrap();
    client.unfavorite(5).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_credentials_are_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/posts/5/votes.json")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let mut cfg = config(server.url());
    cfg.max_retries = 3;
    let client = RemoteClient::new(&cfg).unwrap();

    let err = client.vote(5, true).await.unwrap_err();
    mock.assert_async().await;
    assert!(matches!(
        err.downcast_ref::<RemoteError>(),
        Some(RemoteError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/favorites.json")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let mut cfg = config(server.url());
    cfg.max_retries = 2;
    let client = RemoteClient::new(&cfg).unwrap();

    let err = client.favorite(5).await.unwrap_err();
    mock.assert_async().await;
    assert!(err
        .downcast_ref::<RemoteError>()
        .is_some_and(RemoteError::is_transient));
}

#[tokio::test]
async fn test_download_sends_no_credentials() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/media/77.png")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(b"\x89PNG fake")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = RemoteClient::new(&config(server.url())).unwrap();
    let url = format!("{}/media/77.png", server.url());

    let path = client.download(77, &url, dir.path()).await.unwrap();
    mock.assert_async().await;
    assert_eq!(std::fs::read(path).unwrap(), b"\x89PNG fake");
}

#[test]
fn test_credentials_detection() {
    let mut cfg = config("http://localhost".to_string());
    assert!(RemoteClient::new(&cfg).unwrap().has_credentials());
    cfg.api_key = String::new();
    assert!(!RemoteClient::new(&cfg).unwrap().has_credentials());
}

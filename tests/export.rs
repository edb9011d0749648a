mod common;

use clap::Parser;
use common::{mock_client_config, page_body};
use mockito::{Matcher, Server};
use serde_json::json;
use stargazer_export::cli::Cli;
use stargazer_export::config::Config;
use stargazer_export::run;
use tempfile::TempDir;

const HEADER: &str = "url,login,email,websiteUrl,twitterUsername";

#[tokio::test]
async fn test_single_repository_export() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["alice", "bob", "carol"], None))
        .expect(1)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("result.csv");
    let config = Config {
        token: "test_token".to_string(),
        repositories: vec!["octocat/Hello-World".parse().unwrap()],
        output: output.clone(),
        client: mock_client_config(&server.url()),
        concurrency: 1,
    };

    let result = run(config).await.unwrap();
    mock.assert_async().await;

    assert_eq!(result.stargazers.len(), 3);
    let csv = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "https://github.com/alice,alice,,,");
}

#[tokio::test]
async fn test_duplicate_across_repositories_written_once() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "variables": { "owner": "first" } })))
        .with_status(200)
        .with_body(page_body(&["alice", "bob"], None))
        .create_async()
        .await;
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "variables": { "owner": "second" } })))
        .with_status(200)
        .with_body(page_body(&["carol", "alice"], None))
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("result.csv");
    let config = Config {
        token: "test_token".to_string(),
        repositories: vec!["first/repo".parse().unwrap(), "second/repo".parse().unwrap()],
        output: output.clone(),
        client: mock_client_config(&server.url()),
        concurrency: 2,
    };

    let result = run(config).await.unwrap();
    assert_eq!(result.fetched, 4);

    let csv = std::fs::read_to_string(&output).unwrap();
    let logins: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|line| line.split(',').nth(1).unwrap())
        .collect();
    assert_eq!(logins, vec!["alice", "bob", "carol"]);
}

#[tokio::test]
async fn test_failed_run_writes_nothing() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/graphql")
        .with_status(401)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("result.csv");
    let config = Config {
        token: "bad_token".to_string(),
        repositories: vec!["octocat/Hello-World".parse().unwrap()],
        output: output.clone(),
        client: mock_client_config(&server.url()),
        concurrency: 1,
    };

    assert!(run(config).await.is_err());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_malformed_repository_rejected_before_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let endpoint = format!("{}/graphql", server.url());
    let cli = Cli::parse_from([
        "stargazer-export",
        "--token",
        "test_token",
        "--endpoint",
        endpoint.as_str(),
        "--repositories",
        "owner-only",
    ]);

    let err = Config::from_cli(cli).unwrap_err();
    assert!(err.is_validation());
    mock.assert_async().await;
}

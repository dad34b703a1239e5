//! Integration tests for the rflow CLI commands.
//!
//! Each test stands up its own mock arXiv endpoint and points the binary at it with `--base-url`.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::{
  matchers::{method, path, query_param},
  Mock, MockServer, ResponseTemplate,
};

// Helper function to create a clean command instance
fn rflow() -> Result<Command> { Ok(Command::cargo_bin("rflow")?) }

// Helper to build an Atom document holding `count` entries numbered from `first`
fn atom(first: usize, count: usize) -> String {
  let entries: String = (first..first + count)
    .map(|n| {
      format!(
        "<entry><id>http://arxiv.org/abs/2411.{n:05}v1</id><title>Paper number {n}</title>\
         <summary>Abstract of paper {n}.</summary></entry>"
      )
    })
    .collect();
  format!(
    r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">{entries}</feed>"#
  )
}

// Helper to serve `count` entries for the page starting at `start`
async fn serve_page(server: &MockServer, start: usize, count: usize) {
  Mock::given(method("GET"))
    .and(path("/api/query"))
    .and(query_param("start", start.to_string()))
    .respond_with(ResponseTemplate::new(200).set_body_string(atom(start, count)))
    .mount(server)
    .await;
}

fn endpoint(server: &MockServer) -> String { format!("{}/api/query", server.uri()) }

#[tokio::test(flavor = "multi_thread")]
async fn test_list_pages_until_exhausted() -> Result<()> {
  let server = MockServer::start().await;
  serve_page(&server, 0, 5).await;
  serve_page(&server, 5, 3).await;

  rflow()?
    .args(["list", "--pages", "5", "--base-url", &endpoint(&server)])
    .assert()
    .success()
    .stdout(predicate::str::contains("Paper number 0"))
    .stdout(predicate::str::contains("Paper number 7"))
    .stdout(predicate::str::contains("[8/8]"))
    .stdout(predicate::str::contains("No more papers to load"));

  // Two pages were enough to exhaust the feed.
  assert_eq!(server.received_requests().await.unwrap_or_default().len(), 2);
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_stops_at_page_limit() -> Result<()> {
  let server = MockServer::start().await;
  serve_page(&server, 0, 5).await;
  serve_page(&server, 5, 5).await;

  rflow()?
    .args(["list", "--pages", "1", "--base-url", &endpoint(&server)])
    .assert()
    .success()
    .stdout(predicate::str::contains("Paper number 4"))
    .stdout(predicate::str::contains("Paper number 5").not())
    .stdout(predicate::str::contains("Loaded 5 papers"));

  assert_eq!(server.received_requests().await.unwrap_or_default().len(), 1);
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_lines() -> Result<()> {
  let server = MockServer::start().await;
  serve_page(&server, 0, 2).await;

  let output = rflow()?
    .args(["list", "--json", "--base-url", &endpoint(&server)])
    .output()?;
  assert!(output.status.success());

  let stdout = String::from_utf8(output.stdout)?;
  let lines = stdout
    .lines()
    .map(serde_json::from_str::<serde_json::Value>)
    .collect::<Result<Vec<_>, _>>()?;
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0]["title"], "Paper number 0");
  assert_eq!(lines[1]["abstract"], "Abstract of paper 1.");
  assert_eq!(lines[0]["topic"], lines[1]["topic"]);
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_survives_upstream_failure() -> Result<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  rflow()?
    .args(["list", "--pages", "2", "--base-url", &endpoint(&server)])
    .env("RUST_LOG", "warn")
    .assert()
    .success()
    .stdout(predicate::str::contains("No papers loaded"))
    .stderr(predicate::str::contains("Error loading papers"));

  // The failed first page is retried once by the near-end signal, then the limit stops it.
  assert_eq!(server.received_requests().await.unwrap_or_default().len(), 2);
  Ok(())
}

#[test]
fn test_invalid_base_url_is_rejected() -> Result<()> {
  rflow()?.args(["list", "--base-url", "not a url"]).assert().failure();
  Ok(())
}

#[test]
fn test_browse_needs_a_terminal() -> Result<()> {
  rflow()?
    .args(["browse", "--base-url", "http://127.0.0.1:9/api"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("NotATerminal"));
  Ok(())
}

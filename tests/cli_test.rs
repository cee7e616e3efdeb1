use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

const ARGS: &str = "app: myApp\ncluster: myCluster\ndomain: myDomain\nenvironment: test";
const SHA: &str = "734713bc047d87bf7eac9674765ae793478c50d3";

fn trigger(command: &str, args: &str, host: &str) -> Command {
    let mut cmd = Command::cargo_bin("deploy-trigger").unwrap();
    cmd.env_remove("GITHUB_EVENT_PATH")
        .env("INPUT_COMMAND", command)
        .env("INPUT_ARGS", args)
        .env("INPUT_HOST", host)
        .env("INPUT_TOKEN", "secret")
        .env("GITHUB_REF", "refs/heads/mybranch")
        .env("GITHUB_SHA", SHA);
    cmd
}

#[test]
fn deploy_posts_to_deployments() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/mou/deployments")
        .match_header("authorization", "Bearer secret")
        .match_body(Matcher::Json(json!({
            "app": "myApp",
            "branch": "mybranch",
            "cluster": "myCluster",
            "domain": "myDomain",
            "environment": "test",
            "sha": SHA,
        })))
        .with_status(200)
        .expect(1)
        .create();

    trigger("deploy", ARGS, &format!("{}/api/mou", server.url()))
        .assert()
        .success();

    mock.assert();
}

#[test]
fn deploy_with_tag_ref_and_event_commits() {
    let mut event = NamedTempFile::new().unwrap();
    event
        .write_all(
            br#"{"commits": [{"message": "Normal commit"}, {"message": "Bump #MAJOR"}, {"message": "Bump #MINOR"}]}"#,
        )
        .unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/deployments")
        .match_body(Matcher::Json(json!({
            "app": "myApp",
            "branch": "master",
            "changeType": "major",
            "cluster": "myCluster",
            "domain": "myDomain",
            "environment": "test",
            "tag": "myapp@1.0.0-rc.1",
        })))
        .with_status(201)
        .expect(1)
        .create();

    trigger("deploy", ARGS, &format!("{}/", server.url()))
        .env("GITHUB_REF", "refs/tags/myapp@1.0.0-rc.1")
        .env("GITHUB_EVENT_PATH", event.path())
        .assert()
        .success();

    mock.assert();
}

#[test]
fn deploy_reports_service_failure() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/deployments")
        .with_status(500)
        .create();

    trigger("deploy", ARGS, &server.url())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Request failed with status code 500",
        ));
}

#[test]
fn undeploy_makes_no_call() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    trigger("undeploy", ARGS, &server.url()).assert().success();

    mock.assert();
}

#[test]
fn invalid_command_fails() {
    trigger("wrong", ARGS, "http://127.0.0.1:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Invalid command \"wrong\"."));
}

#[test]
fn invalid_args_fail_with_raw_content() {
    trigger("deploy", "%@", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Unable to parse args. Found content: \"%25@\"",
        ));
}

#[test]
fn missing_token_fails() {
    trigger("deploy", ARGS, "http://127.0.0.1:1")
        .env_remove("INPUT_TOKEN")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Input required and not supplied: token",
        ));
}

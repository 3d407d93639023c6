use std::{fs, path::Path};

use assert_cmd::Command;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use tempfile::TempDir;

const PATH: &str = "/data/2.5/weather";

/// Runs `weather` against `server` with a scrubbed environment and an empty
/// working directory, so no real `.env` or settings file leaks in.
fn weather(server: &ServerGuard, workdir: &TempDir) -> Command {
    weather_with_config(server, workdir, &workdir.path().join("missing.toml"))
}

fn weather_with_config(server: &ServerGuard, workdir: &TempDir, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("weather").expect("binary should be built");
    cmd.current_dir(workdir.path())
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config)
        .arg("--endpoint")
        .arg(format!("{}{PATH}", server.url()))
        .arg("--timeout")
        .arg("5");
    cmd
}

fn query(city: &str, key: &str, units: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("q".into(), city.into()),
        Matcher::UrlEncoded("appid".into(), key.into()),
        Matcher::UrlEncoded("units".into(), units.into()),
    ])
}

#[test]
fn prints_metric_weather_for_london() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", PATH)
        .match_query(query("London", "test-api-key", "metric"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":15.5},"weather":[{"description":"cloudy"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir)
        .args(["--metric", "--api-key", "test-api-key", "London"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15.5").and(predicate::str::contains("cloudy")));

    mock.assert();
}

#[test]
fn no_emoji_uses_plain_format() {
    let mut server = Server::new();
    server
        .mock("GET", PATH)
        .match_query(query("TestCity", "test-api-key", "imperial"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":68.0},"weather":[{"description":"sunny","icon":"01d"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir)
        .args(["-n", "-k", "test-api-key", "TestCity"])
        .assert()
        .success()
        .stdout("68.0°F (sunny)\n");
}

#[test]
fn missing_api_key_fails_before_any_request() {
    let mut server = Server::new();
    let mock = server.mock("GET", PATH).match_query(Matcher::Any).expect(0).create();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir)
        .arg("London")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("API key"));

    mock.assert();
}

#[test]
fn missing_city_is_a_usage_error() {
    let server = Server::new();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir).args(["-k", "test-api-key"]).assert().failure();
}

#[test]
fn unknown_city_fails_without_output() {
    let mut server = Server::new();
    server
        .mock("GET", PATH)
        .match_query(query("InvalidCity", "test-api-key", "metric"))
        .with_status(404)
        .with_body(r#"{"cod":"404","message":"city not found"}"#)
        .create();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir)
        .args(["-m", "-k", "test-api-key", "InvalidCity"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:").and(predicate::str::contains("city not found")));
}

#[test]
fn unresolvable_host_is_a_network_error() {
    let workdir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("weather").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("OPENWEATHER_API_KEY")
        .arg("--config")
        .arg(workdir.path().join("missing.toml"))
        .args(["--endpoint", "http://non-existent-server.invalid/data/2.5/weather"])
        .args(["-t", "5", "-k", "test-api-key", "London"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to fetch weather data"));
}

#[test]
fn api_key_from_dotenv_file() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", PATH)
        .match_query(query("Paris", "dotenv-key", "imperial"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":50.0},"weather":[{"description":"light rain"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();
    fs::write(workdir.path().join(".env"), "OPENWEATHER_API_KEY=dotenv-key\n").unwrap();

    weather(&server, &workdir)
        .args(["--no-emoji", "Paris"])
        .assert()
        .success()
        .stdout("50.0°F (light rain)\n");

    mock.assert();
}

#[test]
fn settings_file_supplies_key_and_units() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", PATH)
        .match_query(query("Oslo", "file-key", "metric"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":-2.0},"weather":[{"description":"snow","id":601}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();
    let config = workdir.path().join("config.toml");
    fs::write(&config, "api_key = \"file-key\"\nmetric = true\nemoji = false\n").unwrap();

    weather_with_config(&server, &workdir, &config)
        .arg("Oslo")
        .assert()
        .success()
        .stdout("-2.0°C (snow)\n");

    mock.assert();
}

#[test]
fn blank_key_flag_falls_back_to_environment() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", PATH)
        .match_query(query("London", "env-key", "imperial"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":59.0},"weather":[{"description":"overcast clouds"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir)
        .env("OPENWEATHER_API_KEY", "env-key")
        .args(["-n", "-k", "", "London"])
        .assert()
        .success()
        .stdout("59.0°F (overcast clouds)\n");

    mock.assert();
}

#[test]
fn environment_key_wins_over_settings_file() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", PATH)
        .match_query(query("Berlin", "env-key", "metric"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":11.0},"weather":[{"description":"drizzle"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();
    let config = workdir.path().join("config.toml");
    fs::write(&config, "api_key = \"file-key\"\nmetric = true\nemoji = false\n").unwrap();

    weather_with_config(&server, &workdir, &config)
        .env("OPENWEATHER_API_KEY", "env-key")
        .arg("Berlin")
        .assert()
        .success()
        .stdout("11.0°C (drizzle)\n");

    mock.assert();
}

#[test]
fn log_filter_from_dotenv_file_is_honoured() {
    let mut server = Server::new();
    server
        .mock("GET", PATH)
        .match_query(query("Rome", "test-api-key", "imperial"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":75.0},"weather":[{"description":"clear sky"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();
    fs::write(workdir.path().join(".env"), "RUST_LOG=debug\n").unwrap();

    weather(&server, &workdir)
        .args(["-n", "-k", "test-api-key", "Rome"])
        .assert()
        .success()
        .stdout("75.0°F (clear sky)\n")
        .stderr(predicate::str::contains("requesting current weather"));
}

#[test]
fn units_option_selects_metric() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", PATH)
        .match_query(query("Madrid", "test-api-key", "metric"))
        .with_status(200)
        .with_body(r#"{"main":{"temp":28.3},"weather":[{"description":"sunny"}]}"#)
        .create();
    let workdir = TempDir::new().unwrap();

    weather(&server, &workdir)
        .args(["-n", "--units", "METRIC", "-k", "test-api-key", "Madrid"])
        .assert()
        .success()
        .stdout("28.3°C (sunny)\n");

    mock.assert();
}

#[test]
fn zero_timeout_is_rejected_before_any_request() {
    let mut server = Server::new();
    let mock = server.mock("GET", PATH).match_query(Matcher::Any).expect(0).create();
    let workdir = TempDir::new().unwrap();
    let config = workdir.path().join("config.toml");
    fs::write(&config, "timeout_secs = 0\n").unwrap();

    let mut cmd = Command::cargo_bin("weather").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("OPENWEATHER_API_KEY")
        .arg("--config")
        .arg(&config)
        .arg("--endpoint")
        .arg(format!("{}{PATH}", server.url()))
        .args(["-k", "test-api-key", "London"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs must be at least 1"));

    mock.assert();
}

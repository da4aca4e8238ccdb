//! Shared fixtures for workflow tests
//!
//! Archives are built in memory and served from a wiremock server laid out
//! the way [`MineConfig::with_base`] expects: `/archive`, `/raw` and the API
//! at the root.

#![allow(dead_code)]

use mine_core::MineConfig;
use std::io::{Cursor, Write};
use std::path::Path;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const REPOSITORY: &str = "mineadmin/mineadmin";

pub const COMPOSER_JSON: &str = r#"{
    "name": "mineadmin/mineadmin",
    "require": {
        "php": ">=8.1",
        "ext-swoole": ">=5.0",
        "hyperf/framework": "~3.1.0"
    }
}
"#;

/// Swow file paths in the upstream repository
pub const SWOW_SOURCES: [&str; 3] = [
    ".github/ci/swow/Dockerfile",
    ".github/ci/swow/bin/hyperf.php",
    ".github/ci/swow/config/autoload/server.php",
];

pub fn config_for(server: &MockServer) -> MineConfig {
    MineConfig::with_base(&server.uri()).unwrap()
}

/// Zip with every entry under one synthetic root folder, like a tagged source export
pub fn source_archive(root: &str, entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.add_directory(format!("{}/", root), options).unwrap();
    for (name, content) in entries {
        zip.start_file(format!("{}/{}", root, name), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// A minimal PHP project as published for `version`
pub fn php_archive(version: &str) -> Vec<u8> {
    let root = format!("mineadmin-{}", version.trim_start_matches('v'));
    source_archive(
        &root,
        &[
            ("composer.json", COMPOSER_JSON),
            ("bin/hyperf.php", "<?php // swoole entry"),
            ("config/autoload/server.php", "<?php return ['type' => 'swoole'];"),
            ("Dockerfile", "FROM hyperf/hyperf:8.1-alpine-v3.18-swoole"),
            (".env.example", "APP_NAME=MineAdmin"),
        ],
    )
}

pub async fn mock_archive(server: &MockServer, url_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Serve the swow variant of every patched file at `version`
pub async fn mock_swow_files(server: &MockServer, version: &str) {
    for source in SWOW_SOURCES {
        Mock::given(method("GET"))
            .and(path(format!("/raw/{}/{}/{}", REPOSITORY, version, source)))
            .respond_with(ResponseTemplate::new(200).set_body_string(swow_content(source)))
            .expect(1)
            .mount(server)
            .await;
    }
}

pub fn swow_content(source: &str) -> String {
    format!("swow variant of {}", source)
}

/// Fail the test if anything is requested from the raw content endpoint
pub async fn forbid_raw_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex("^/raw/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn mock_releases(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases", REPOSITORY)))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

pub fn releases_body(tags: &[&str]) -> serde_json::Value {
    serde_json::Value::Array(
        tags.iter()
            .map(|tag| serde_json::json!({ "tag_name": tag, "name": tag, "draft": false }))
            .collect(),
    )
}

/// Value of `key` in a `KEY=value` document
pub fn env_value<'a>(env: &'a str, key: &str) -> Option<&'a str> {
    env.lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
}

/// Files under `dir`, relative and `/`-separated, sorted
pub fn files_under(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}

pub fn read_json(file: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap()
}

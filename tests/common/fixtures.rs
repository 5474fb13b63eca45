//! Oracle output and workspace fixtures for integration tests.
#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// `describe` output for an identifier whose definition is known.
pub fn identifier_output(objpos: &str) -> String {
    json!({
        "mode": "describe",
        "describe": {
            "desc": "identifier",
            "pos": "/go/src/example.com/app/main.go:12:3",
            "detail": "value",
            "value": { "type": "func(s string) int", "objpos": objpos }
        }
    })
    .to_string()
}

/// `describe` output for an identifier without a recorded definition position.
pub fn identifier_without_objpos() -> String {
    json!({
        "describe": {
            "desc": "identifier",
            "detail": "value",
            "value": { "type": "int", "value": "42" }
        }
    })
    .to_string()
}

pub fn source_file_output() -> String {
    json!({
        "describe": {
            "desc": "source file",
            "pos": "/go/src/example.com/app/main.go:1:1",
            "detail": "package",
            "package": { "path": "example.com/app" }
        }
    })
    .to_string()
}

pub fn type_output(desc: &str, namepos: Option<&str>) -> String {
    let mut ty = json!({ "type": "example.com/app.Server" });
    if let Some(pos) = namepos {
        ty["namepos"] = Value::String(pos.to_string());
    }
    json!({
        "describe": { "desc": desc, "detail": "type", "type": ty }
    })
    .to_string()
}

pub fn other_output(desc: &str) -> String {
    json!({ "describe": { "desc": desc, "detail": "value", "value": {} } }).to_string()
}

/// Workspace with two projects:
///
/// ```text
/// hello/            cmd/{cli,server}/main.go, internal/greet.go, go.mod
/// lib/              lib.go
/// .cache/           hidden, not a project
/// ```
pub fn write_workspace(root: &Path) {
    fs::create_dir_all(root.join("hello/cmd/server")).unwrap();
    fs::create_dir_all(root.join("hello/cmd/cli")).unwrap();
    fs::create_dir_all(root.join("hello/internal")).unwrap();
    fs::write(root.join("hello/cmd/server/main.go"), "package main\n").unwrap();
    fs::write(root.join("hello/cmd/cli/main.go"), "package main\n").unwrap();
    fs::write(root.join("hello/internal/greet.go"), "package internal\n").unwrap();
    fs::write(root.join("hello/go.mod"), "module example.com/hello\n").unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("lib/lib.go"), "package lib\n").unwrap();
    fs::create_dir_all(root.join(".cache")).unwrap();
}

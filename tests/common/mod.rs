// Common test utilities and helpers

use k8s_openapi::api::core::v1::{
    ContainerState, ContainerStateWaiting, ContainerStatus, Pod, PodCondition, PodStatus,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temp SQLite metadata database seeded with `(key, type, value)`
/// rows, the way the edgecore agent lays out its `meta` table.
pub fn meta_db(records: &[(&str, &str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edgecore.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE meta (key TEXT PRIMARY KEY, type TEXT, value TEXT);")
        .unwrap();
    for (key, kind, value) in records {
        conn.execute(
            "INSERT INTO meta (key, type, value) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, kind, value],
        )
        .unwrap();
    }
    (dir, path)
}

/// Serialized pod object with an embedded status, as stored under
/// `<ns>/pod/<name>`.
pub fn pod_record(name: &str, namespace: &str, phase: &str) -> String {
    let pod = Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        status: Some(PodStatus {
            phase: Some(phase.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    serde_json::to_string(&pod).unwrap()
}

/// Serialized dedicated status record, as stored under
/// `<ns>/podstatus/<name>`.
pub fn podstatus_record(name: &str, namespace: &str, phase: &str) -> String {
    serde_json::json!({
        "name": name,
        "namespace": namespace,
        "status": { "phase": phase },
    })
    .to_string()
}

pub fn condition(type_: &str, status: &str) -> PodCondition {
    PodCondition {
        type_: type_.to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

pub fn waiting_container(name: &str, reason: &str, restarts: i32) -> ContainerStatus {
    ContainerStatus {
        name: name.to_string(),
        ready: false,
        restart_count: restarts,
        state: Some(ContainerState {
            waiting: Some(ContainerStateWaiting {
                reason: Some(reason.to_string()),
                message: Some("container is waiting".to_string()),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

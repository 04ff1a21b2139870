//! Pod status resolution and readiness evaluation
//!
//! A pod's runtime status lives in the metadata store under one of two keys:
//! the raw pod object (`<ns>/pod/<name>`, status embedded) and an optional
//! dedicated status record (`<ns>/podstatus/<name>`). The dedicated record,
//! when present, is assumed more recent and always wins.

use crate::diagnose::report;
use crate::error::{DiagError, Result};
use crate::store::MetaStore;
use k8s_openapi::api::core::v1::{Pod, PodStatus};
use serde::Deserialize;
use tracing::debug;

/// Shape of the dedicated status record the agent uploads for a pod.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodStatusRequest {
    pub uid: String,
    pub name: String,
    pub namespace: String,
    pub status: PodStatus,
}

/// Reconstruct the runtime status of `pod_name` from the store.
///
/// Decode failures surface as [`DiagError::Decode`], which still carries the
/// status value the failed attempt produced (the zero value) — callers that
/// want the attempted value can read it from the error.
pub fn resolve_pod(store: &MetaStore, namespace: &str, pod_name: &str) -> Result<PodStatus> {
    let pod_key = format!("{namespace}/pod/{pod_name}");
    let pod_rows = store.query("key", &pod_key)?;
    if pod_rows.is_empty() {
        return Err(DiagError::PodNotFound(pod_key));
    }
    report::step(format!("pod {pod_name} found in metadata store"));

    let status_key = format!("{namespace}/podstatus/{pod_name}");
    let status_rows = store.query("key", &status_key)?;
    if status_rows.is_empty() {
        debug!(key = %status_key, "no dedicated status record, using embedded pod status");
        return match serde_json::from_str::<Pod>(&pod_rows[0]) {
            Ok(pod) => Ok(pod.status.unwrap_or_default()),
            Err(source) => Err(DiagError::Decode {
                partial: Box::default(),
                source,
            }),
        };
    }
    report::step(format!("podstatus {pod_name} found in metadata store"));

    match serde_json::from_str::<PodStatusRequest>(&status_rows[0]) {
        Ok(request) => Ok(request.status),
        Err(source) => Err(DiagError::Decode {
            partial: Box::default(),
            source,
        }),
    }
}

/// Decide whether the pod is Ready and report what stands out.
///
/// Ready means phase `Running` plus a `Ready` condition with status `True`.
/// Non-`True` conditions and non-ready containers are reported for
/// visibility but do not themselves decide the outcome; this mirrors the
/// agent's own readiness policy.
pub fn evaluate_readiness(pod_name: &str, status: &PodStatus) -> Result<()> {
    let phase = status.phase.as_deref().unwrap_or("Unknown");
    report::step(format!("pod {pod_name} phase is {phase}"));

    let conditions = status.conditions.as_deref().unwrap_or_default();
    let ready_condition = conditions
        .iter()
        .any(|c| c.type_ == "Ready" && c.status == "True");

    for condition in conditions.iter().filter(|c| c.status != "True") {
        report::note(format!(
            "condition {} is not True, reason: {}, message: {}",
            condition.type_,
            condition.reason.as_deref().unwrap_or(""),
            condition.message.as_deref().unwrap_or("")
        ));
    }

    for cs in status.container_statuses.as_deref().unwrap_or_default() {
        if cs.ready {
            report::step(format!("container {} is ready", cs.name));
            continue;
        }
        let state = cs.state.as_ref();
        if let Some(waiting) = state.and_then(|s| s.waiting.as_ref()) {
            report::note(format!(
                "container {} is Waiting, reason: {}, message: {}, restarts: {}",
                cs.name,
                waiting.reason.as_deref().unwrap_or(""),
                waiting.message.as_deref().unwrap_or(""),
                cs.restart_count
            ));
        } else if let Some(terminated) = state.and_then(|s| s.terminated.as_ref()) {
            report::note(format!(
                "container {} is Terminated, reason: {}, message: {}, restarts: {}",
                cs.name,
                terminated.reason.as_deref().unwrap_or(""),
                terminated.message.as_deref().unwrap_or(""),
                cs.restart_count
            ));
        } else {
            report::note(format!("container {} is not ready", cs.name));
        }
    }

    if phase == "Running" && ready_condition {
        report::step(format!("pod {pod_name} is Ready"));
        Ok(())
    } else {
        Err(DiagError::PodNotReady(pod_name.to_string()))
    }
}

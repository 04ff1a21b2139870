//! Diagnostic orchestration
//!
//! Maps a diagnose target to its checker chain and renders the pass/fail
//! outcome. All checking is synchronous in effect: each step completes
//! before the next starts, and the first failure ends the run.

pub mod install;
pub mod node;
pub mod pod;
pub mod report;

use crate::config;
use crate::error::{DiagError, Result};
use crate::probes::{HostProbe, InstallProbe};
use crate::store::MetaStore;
use std::fmt;
use std::net::IpAddr;
use std::path::Path;

/// What a diagnostic run is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnoseTarget {
    Node,
    Pod,
    Install,
}

impl fmt::Display for DiagnoseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnoseTarget::Node => write!(f, "node"),
            DiagnoseTarget::Pod => write!(f, "pod"),
            DiagnoseTarget::Install => write!(f, "install"),
        }
    }
}

/// A diagnosable target as listed in the CLI help.
#[derive(Debug, Clone, Copy)]
pub struct DiagnoseObject {
    pub target: DiagnoseTarget,
    pub name: &'static str,
    pub desc: &'static str,
}

/// Registry of diagnosable targets, consulted by the CLI layer and the
/// dispatcher. A plain static table; nothing registers into it at runtime.
pub const DIAGNOSE_OBJECTS: &[DiagnoseObject] = &[
    DiagnoseObject {
        target: DiagnoseTarget::Node,
        name: "node",
        desc: "Diagnose whether the edge node is healthy",
    },
    DiagnoseObject {
        target: DiagnoseTarget::Pod,
        name: "pod",
        desc: "Diagnose whether a pod on this node is Ready",
    },
    DiagnoseObject {
        target: DiagnoseTarget::Install,
        name: "install",
        desc: "Diagnose installation readiness of this host",
    },
];

/// Look up a registry entry by target.
pub fn diagnose_object(target: DiagnoseTarget) -> &'static DiagnoseObject {
    DIAGNOSE_OBJECTS
        .iter()
        .find(|o| o.target == target)
        .expect("every target is registered")
}

/// Options shared by the diagnose chains.
///
/// Built once from the CLI and read-only afterwards, except `db_path`,
/// which the node checker fills in from the parsed config and the pod
/// resolver consumes.
#[derive(Debug, Clone)]
pub struct DiagnoseOptions {
    pub namespace: String,
    pub config_path: String,
    pub db_path: Option<String>,
    pub check: CheckOptions,
}

impl Default for DiagnoseOptions {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            config_path: config::EDGECORE_CONFIG_PATH.to_string(),
            db_path: None,
            check: CheckOptions::default(),
        }
    }
}

/// Optional probe parameters for install checks.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub dns_ip: Option<IpAddr>,
    pub domain: Option<String>,
    pub ip: Option<String>,
    pub cloud_hub_server: Option<String>,
    pub edgecore_server: Option<String>,
    pub config: Option<String>,
    pub timeout_secs: u64,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            dns_ip: None,
            domain: None,
            ip: None,
            cloud_hub_server: None,
            edgecore_server: None,
            config: None,
            timeout_secs: 3,
        }
    }
}

/// Run the checker chain for `target`.
///
/// A pod diagnosis runs the node chain first; a pod cannot be meaningfully
/// diagnosed on an unhealthy node. The store handle is opened here, once,
/// and dropped when the run ends.
pub async fn run_diagnose(
    target: DiagnoseTarget,
    opts: &mut DiagnoseOptions,
    pod_name: Option<&str>,
    host: &dyn HostProbe,
    install: &dyn InstallProbe,
) -> Result<()> {
    let object = diagnose_object(target);
    tracing::info!(target = object.name, "{}", object.desc);

    match target {
        DiagnoseTarget::Node => node::check_node(opts, host).await,
        DiagnoseTarget::Pod => {
            let name = pod_name
                .ok_or_else(|| DiagError::MissingArgument("pod name".to_string()))?
                .to_string();
            node::check_node(opts, host).await?;

            let db_path = opts
                .db_path
                .clone()
                .unwrap_or_else(|| config::EDGECORE_DB_PATH.to_string());
            let store = MetaStore::open(Path::new(&db_path))?;
            let status = pod::resolve_pod(&store, &opts.namespace, &name)?;
            pod::evaluate_readiness(&name, &status)
        }
        DiagnoseTarget::Install => install::check_install(&opts.check, install).await,
    }
}

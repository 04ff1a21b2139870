//! Node health checks
//!
//! A strictly ordered, short-circuiting chain: agent process running,
//! config file present and parseable, metadata database present, EdgeHub
//! enabled, control plane reachable. The chain stops at the first failure;
//! nothing after it is attempted.

use crate::config::{self, EDGECORE_BINARY};
use crate::diagnose::{report, DiagnoseOptions};
use crate::error::{DiagError, Result};
use crate::probes::HostProbe;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Check the health of this edge node.
///
/// On success the resolved metadata database path has been recorded in
/// `opts.db_path` for later reuse by the pod resolver.
pub async fn check_node(opts: &mut DiagnoseOptions, probe: &dyn HostProbe) -> Result<()> {
    // A process-table failure and an absent process report the same way:
    // the agent cannot be confirmed running.
    match probe.process_running(EDGECORE_BINARY) {
        Ok(true) => {}
        _ => return Err(DiagError::ProcessNotRunning),
    }
    report::step(format!("{EDGECORE_BINARY} is running"));

    let config_path = Path::new(&opts.config_path);
    if !probe.file_exists(config_path) {
        return Err(DiagError::ConfigMissing(opts.config_path.clone()));
    }
    report::step(format!("edge config exists: {}", opts.config_path));

    let edge_config = config::load(config_path)?;
    report::step("edge config parsed");

    let data_source = edge_config.data_source().to_string();
    debug!(data_source = %data_source, "resolved metadata database path");
    opts.db_path = Some(data_source.clone());
    if !probe.file_exists(Path::new(&data_source)) {
        return Err(DiagError::DataSourceMissing(data_source));
    }
    report::step(format!("dataSource exists: {data_source}"));

    if !edge_config.modules.edge_hub.websocket.enable {
        return Err(DiagError::HubDisabled);
    }
    report::step("edgehub websocket is enabled");

    let url = format!("https://{}", edge_config.modules.edge_hub.websocket.server);
    let timeout = Duration::from_secs(opts.check.timeout_secs);
    probe.http_reachable(&url, timeout).await?;
    report::step(format!("cloudcore connection succeeded: {url}"));

    Ok(())
}

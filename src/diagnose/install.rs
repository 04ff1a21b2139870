//! Install readiness checks
//!
//! Host-level preconditions probed before installing the agent, in a fixed
//! order with the first failure returned verbatim: CPU, memory, disk, DNS
//! (only when a domain was supplied), network reachability for whichever
//! endpoints were given, and PID headroom.

use crate::config;
use crate::diagnose::{report, CheckOptions};
use crate::error::{DiagError, Result};
use crate::probes::InstallProbe;
use std::path::Path;
use std::time::Duration;

/// Check whether this host is ready for an agent installation.
pub async fn check_install(opts: &CheckOptions, probe: &dyn InstallProbe) -> Result<()> {
    probe.check_cpu()?;
    report::step("CPU is sufficient");

    probe.check_memory()?;
    report::step("memory is sufficient");

    probe.check_disk()?;
    report::step("disk space is sufficient");

    if let Some(domain) = &opts.domain {
        probe.check_dns(domain, opts.dns_ip).await?;
        report::step(format!("domain {domain} resolved"));
    }

    let timeout = Duration::from_secs(opts.timeout_secs);

    if let Some(ip) = &opts.ip {
        probe.tcp_reachable(ip, timeout).await?;
        report::step(format!("{ip} is reachable"));
    }
    if let Some(server) = &opts.cloud_hub_server {
        let url = ensure_scheme(server, "https");
        probe.http_reachable(&url, timeout).await?;
        report::step(format!("cloud hub server is reachable: {url}"));
    }
    if let Some(server) = &opts.edgecore_server {
        let url = ensure_scheme(server, "http");
        probe.http_reachable(&url, timeout).await?;
        report::step(format!("edgecore server is reachable: {url}"));
    }
    if let Some(config_path) = &opts.config {
        let edge_config = config::load(Path::new(config_path)).map_err(|e| {
            DiagError::InstallProbe {
                probe: "network",
                detail: format!("{config_path}: {e}"),
            }
        })?;
        let server = &edge_config.modules.edge_hub.websocket.server;
        if !server.is_empty() {
            let url = ensure_scheme(server, "https");
            probe.http_reachable(&url, timeout).await?;
            report::step(format!("configured hub server is reachable: {url}"));
        }
    }

    probe.check_pid()?;
    report::step("process IDs are sufficient");

    Ok(())
}

/// Prepend `scheme://` unless the server string already carries a scheme.
fn ensure_scheme(server: &str, scheme: &str) -> String {
    if server.contains("://") {
        server.to_string()
    } else {
        format!("{scheme}://{server}")
    }
}

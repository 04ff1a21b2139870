//! Host-backed probe implementation.

use crate::error::{DiagError, Result};
use crate::probes::{HostProbe, InstallProbe};
use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::ffi::OsStr;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;
use sysinfo::{Disks, ProcessesToUpdate, System};
use tracing::debug;

/// Minimum host requirements for an agent installation.
const MIN_CPU_CORES: usize = 1;
const MIN_FREE_MEMORY_BYTES: u64 = 256 * 1024 * 1024;
const MIN_FREE_DISK_BYTES: u64 = 1024 * 1024 * 1024;
const MAX_PID_USAGE_RATIO: f64 = 0.95;

/// Default port probed when a bare IP is given to the network check; the
/// hub's websocket listener.
const DEFAULT_PROBE_PORT: u16 = 10000;

/// Turn a user-supplied address into a connectable `host:port` target.
///
/// A bare IP gets the default port appended, with IPv6 addresses bracketed
/// so the colons in the address are not read as a port separator. Anything
/// else (`host:port`, `[::1]:10000`, hostnames) passes through with the
/// default port appended only when none is present.
fn probe_target(addr: &str) -> String {
    match addr.parse::<IpAddr>() {
        Ok(IpAddr::V6(ip)) => format!("[{ip}]:{DEFAULT_PROBE_PORT}"),
        Ok(IpAddr::V4(ip)) => format!("{ip}:{DEFAULT_PROBE_PORT}"),
        Err(_) if addr.contains(':') => addr.to_string(),
        Err(_) => format!("{addr}:{DEFAULT_PROBE_PORT}"),
    }
}

/// Probe implementation backed by the host system.
#[derive(Debug, Default)]
pub struct SystemProbe;

impl SystemProbe {
    pub fn new() -> Self {
        Self
    }

    async fn http_get(&self, url: &str, timeout: Duration) -> Result<()> {
        // The hub endpoint serves a private CA; reachability is being
        // tested, not trust.
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
            .map_err(|e| DiagError::NetworkUnreachable {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        match client.get(url).send().await {
            Ok(response) => {
                debug!(url, status = %response.status(), "endpoint reachable");
                Ok(())
            }
            Err(e) => Err(DiagError::NetworkUnreachable {
                url: url.to_string(),
                detail: e.to_string(),
            }),
        }
    }
}

#[async_trait]
impl HostProbe for SystemProbe {
    fn process_running(&self, binary: &str) -> Result<bool> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        Ok(sys
            .processes()
            .values()
            .any(|p| p.name() == OsStr::new(binary)))
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    async fn http_reachable(&self, url: &str, timeout: Duration) -> Result<()> {
        self.http_get(url, timeout).await
    }
}

#[async_trait]
impl InstallProbe for SystemProbe {
    fn check_cpu(&self) -> Result<()> {
        let sys = System::new_all();
        let cores = sys.cpus().len();
        debug!(cores, "CPU probe");
        if cores < MIN_CPU_CORES {
            return Err(DiagError::InstallProbe {
                probe: "CPU",
                detail: format!("{cores} cores available, at least {MIN_CPU_CORES} required"),
            });
        }
        Ok(())
    }

    fn check_memory(&self) -> Result<()> {
        let mut sys = System::new();
        sys.refresh_memory();
        let available = sys.available_memory();
        debug!(available, "memory probe");
        if available < MIN_FREE_MEMORY_BYTES {
            return Err(DiagError::InstallProbe {
                probe: "memory",
                detail: format!(
                    "{} MiB free, at least {} MiB required",
                    available / 1024 / 1024,
                    MIN_FREE_MEMORY_BYTES / 1024 / 1024
                ),
            });
        }
        Ok(())
    }

    fn check_disk(&self) -> Result<()> {
        let disks = Disks::new_with_refreshed_list();
        let available = disks
            .iter()
            .map(|d| d.available_space())
            .max()
            .unwrap_or(0);
        debug!(available, "disk probe");
        if available < MIN_FREE_DISK_BYTES {
            return Err(DiagError::InstallProbe {
                probe: "disk",
                detail: format!(
                    "{} MiB free, at least {} MiB required",
                    available / 1024 / 1024,
                    MIN_FREE_DISK_BYTES / 1024 / 1024
                ),
            });
        }
        Ok(())
    }

    async fn check_dns(&self, domain: &str, dns_ip: Option<IpAddr>) -> Result<()> {
        let resolver = match dns_ip {
            Some(ip) => {
                let mut config = ResolverConfig::new();
                config.add_name_server(NameServerConfig::new(
                    SocketAddr::new(ip, 53),
                    Protocol::Udp,
                ));
                TokioAsyncResolver::tokio(config, ResolverOpts::default())
            }
            None => TokioAsyncResolver::tokio_from_system_conf().map_err(|e| {
                DiagError::InstallProbe {
                    probe: "DNS",
                    detail: format!("system resolver unavailable: {e}"),
                }
            })?,
        };
        match resolver.lookup_ip(domain).await {
            Ok(lookup) => {
                debug!(domain, addresses = ?lookup.iter().collect::<Vec<_>>(), "DNS probe");
                Ok(())
            }
            Err(e) => Err(DiagError::InstallProbe {
                probe: "DNS",
                detail: format!("failed to resolve {domain}: {e}"),
            }),
        }
    }

    async fn tcp_reachable(&self, addr: &str, timeout: Duration) -> Result<()> {
        let target = probe_target(addr);
        match tokio::time::timeout(timeout, tokio::net::TcpStream::connect(&target)).await {
            Ok(Ok(_)) => {
                debug!(target = %target, "TCP probe succeeded");
                Ok(())
            }
            Ok(Err(e)) => Err(DiagError::InstallProbe {
                probe: "network",
                detail: format!("{target}: {e}"),
            }),
            Err(_) => Err(DiagError::InstallProbe {
                probe: "network",
                detail: format!("{target}: connection timed out"),
            }),
        }
    }

    async fn http_reachable(&self, url: &str, timeout: Duration) -> Result<()> {
        self.http_get(url, timeout).await
    }

    fn check_pid(&self) -> Result<()> {
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        let running = sys.processes().len() as f64;

        // pid_max is Linux-only; elsewhere the check degrades to a pass.
        let Some(pid_max) = std::fs::read_to_string("/proc/sys/kernel/pid_max")
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
        else {
            return Ok(());
        };

        let usage = running / pid_max;
        debug!(running, pid_max, usage, "PID probe");
        if usage > MAX_PID_USAGE_RATIO {
            return Err(DiagError::InstallProbe {
                probe: "PID",
                detail: format!("{:.1}% of the PID space is in use", usage * 100.0),
            });
        }
        Ok(())
    }
}

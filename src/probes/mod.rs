//! Probe collaborators for the diagnostic chains.
//!
//! The checkers in [`crate::diagnose`] sequence and interpret probe results;
//! the probes themselves (process table, filesystem, host resources, network)
//! sit behind these traits so tests can substitute stubs. [`SystemProbe`] is
//! the real, host-backed implementation.

pub mod system;

pub use system::SystemProbe;

use crate::error::Result;
use async_trait::async_trait;
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

/// Probes the node checker consults about the local host.
#[async_trait]
pub trait HostProbe: Send + Sync {
    /// Whether a process with the given binary name is in the process table.
    fn process_running(&self, binary: &str) -> Result<bool>;

    /// Whether a file exists on the local filesystem.
    fn file_exists(&self, path: &Path) -> bool;

    /// Reachability of an HTTP(S) endpoint. Success is any response within
    /// the timeout, regardless of status code; only transport or TLS
    /// handshake failures count as unreachable.
    async fn http_reachable(&self, url: &str, timeout: Duration) -> Result<()>;
}

/// Host-readiness probes for the install checker. Each returns `Ok(())`
/// when the host satisfies the corresponding precondition.
#[async_trait]
pub trait InstallProbe: Send + Sync {
    fn check_cpu(&self) -> Result<()>;

    fn check_memory(&self) -> Result<()>;

    fn check_disk(&self) -> Result<()>;

    /// Resolve `domain`, against `dns_ip` when one is given, otherwise the
    /// system resolver.
    async fn check_dns(&self, domain: &str, dns_ip: Option<IpAddr>) -> Result<()>;

    /// TCP-level reachability of `host[:port]`.
    async fn tcp_reachable(&self, addr: &str, timeout: Duration) -> Result<()>;

    /// Same contract as [`HostProbe::http_reachable`].
    async fn http_reachable(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Headroom in the process-ID space.
    fn check_pid(&self) -> Result<()>;
}

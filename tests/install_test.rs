//! Install readiness chain tests: canonical probe order and short-circuit.

use async_trait::async_trait;
use edgediag::diagnose::install::check_install;
use edgediag::diagnose::CheckOptions;
use edgediag::error::{DiagError, Result};
use edgediag::probes::InstallProbe;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Duration;

/// Records every probe invocation in order; fails on a chosen probe.
struct RecordingProbe {
    calls: Mutex<Vec<&'static str>>,
    fail_on: Option<&'static str>,
}

impl RecordingProbe {
    fn new(fail_on: Option<&'static str>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on,
        }
    }

    fn hit(&self, probe: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(probe);
        if self.fail_on == Some(probe) {
            Err(DiagError::InstallProbe {
                probe,
                detail: "stubbed failure".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InstallProbe for RecordingProbe {
    fn check_cpu(&self) -> Result<()> {
        self.hit("cpu")
    }
    fn check_memory(&self) -> Result<()> {
        self.hit("memory")
    }
    fn check_disk(&self) -> Result<()> {
        self.hit("disk")
    }
    async fn check_dns(&self, _domain: &str, _dns_ip: Option<IpAddr>) -> Result<()> {
        self.hit("dns")
    }
    async fn tcp_reachable(&self, _addr: &str, _timeout: Duration) -> Result<()> {
        self.hit("tcp")
    }
    async fn http_reachable(&self, _url: &str, _timeout: Duration) -> Result<()> {
        self.hit("http")
    }
    fn check_pid(&self) -> Result<()> {
        self.hit("pid")
    }
}

#[tokio::test]
async fn cpu_failure_stops_the_chain_before_any_other_probe() {
    let probe = RecordingProbe::new(Some("cpu"));
    let opts = CheckOptions {
        domain: Some("example.com".to_string()),
        ip: Some("10.0.0.1".to_string()),
        ..Default::default()
    };

    let err = check_install(&opts, &probe).await.unwrap_err();
    assert!(matches!(err, DiagError::InstallProbe { probe: "cpu", .. }));
    assert_eq!(probe.calls(), vec!["cpu"]);
}

#[tokio::test]
async fn minimal_options_skip_dns_and_network() {
    let probe = RecordingProbe::new(None);
    let opts = CheckOptions::default();

    check_install(&opts, &probe).await.unwrap();
    assert_eq!(probe.calls(), vec!["cpu", "memory", "disk", "pid"]);
}

#[tokio::test]
async fn dns_runs_only_when_a_domain_was_supplied() {
    let probe = RecordingProbe::new(None);
    let opts = CheckOptions {
        domain: Some("example.com".to_string()),
        ..Default::default()
    };

    check_install(&opts, &probe).await.unwrap();
    assert_eq!(probe.calls(), vec!["cpu", "memory", "disk", "dns", "pid"]);
}

#[tokio::test]
async fn network_probes_follow_canonical_order() {
    let probe = RecordingProbe::new(None);
    let opts = CheckOptions {
        ip: Some("10.0.0.1".to_string()),
        cloud_hub_server: Some("hub.example.com:10002".to_string()),
        edgecore_server: Some("127.0.0.1:10350".to_string()),
        ..Default::default()
    };

    check_install(&opts, &probe).await.unwrap();
    assert_eq!(
        probe.calls(),
        vec!["cpu", "memory", "disk", "tcp", "http", "http", "pid"]
    );
}

#[tokio::test]
async fn network_failure_short_circuits_the_pid_check() {
    let probe = RecordingProbe::new(Some("tcp"));
    let opts = CheckOptions {
        ip: Some("10.0.0.1".to_string()),
        cloud_hub_server: Some("hub.example.com".to_string()),
        ..Default::default()
    };

    let err = check_install(&opts, &probe).await.unwrap_err();
    assert!(matches!(err, DiagError::InstallProbe { probe: "tcp", .. }));
    assert_eq!(probe.calls(), vec!["cpu", "memory", "disk", "tcp"]);
}

#[tokio::test]
async fn unreadable_config_surfaces_as_a_network_failure() {
    let probe = RecordingProbe::new(None);
    let opts = CheckOptions {
        config: Some("/nonexistent/edgecore.yaml".to_string()),
        ..Default::default()
    };

    let err = check_install(&opts, &probe).await.unwrap_err();
    assert!(matches!(
        err,
        DiagError::InstallProbe {
            probe: "network",
            ..
        }
    ));
    assert_eq!(probe.calls(), vec!["cpu", "memory", "disk"]);
}

#[tokio::test]
async fn dns_failure_reports_the_probe_name() {
    let probe = RecordingProbe::new(Some("dns"));
    let opts = CheckOptions {
        domain: Some("unresolvable.invalid".to_string()),
        ..Default::default()
    };

    let err = check_install(&opts, &probe).await.unwrap_err();
    assert!(matches!(err, DiagError::InstallProbe { probe: "dns", .. }));
    assert_eq!(probe.calls(), vec!["cpu", "memory", "disk", "dns"]);
}

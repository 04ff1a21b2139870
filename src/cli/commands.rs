//! CLI command definitions using clap

use crate::config;
use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;

#[derive(Parser)]
#[command(
    name = "edgediag",
    version,
    about = "Diagnose edge nodes running the edgecore agent",
    long_about = None,
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diagnose a target and report the first failing condition
    #[command(subcommand)]
    Diagnose(DiagnoseCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Subcommand)]
pub enum DiagnoseCommand {
    /// Diagnose whether the edge node is healthy
    Node(NodeArgs),

    /// Diagnose whether a pod on this node is Ready
    Pod(PodArgs),

    /// Diagnose installation readiness of this host
    Install(InstallArgs),
}

#[derive(Args)]
pub struct NodeArgs {
    /// Path of the edgecore configuration file
    #[arg(short = 'c', long, default_value = config::EDGECORE_CONFIG_PATH)]
    pub config: String,
}

#[derive(Args)]
pub struct PodArgs {
    /// Pod name
    pub name: String,

    /// Namespace of the pod
    #[arg(short = 'n', long, default_value = "default")]
    pub namespace: String,

    /// Path of the edgecore configuration file
    #[arg(short = 'c', long, default_value = config::EDGECORE_CONFIG_PATH)]
    pub config: String,
}

#[derive(Args)]
pub struct InstallArgs {
    /// DNS server IP to resolve against
    #[arg(short = 'D', long)]
    pub dns_ip: Option<IpAddr>,

    /// Domain to resolve
    #[arg(short = 'd', long)]
    pub domain: Option<String>,

    /// IP to probe for reachability
    #[arg(short = 'i', long)]
    pub ip: Option<String>,

    /// Cloud hub server to probe (HTTPS)
    #[arg(short = 's', long)]
    pub cloud_hub_server: Option<String>,

    /// Edgecore server to probe (HTTP)
    #[arg(short = 'e', long)]
    pub edgecore_server: Option<String>,

    /// Edgecore configuration file whose hub server should be probed
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Network probe timeout in seconds
    #[arg(short = 't', long, default_value_t = 3)]
    pub timeout: u64,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

//! edgediag - diagnostics CLI for edge nodes running the edgecore agent

use anyhow::Result;
use clap::Parser;
use edgediag::cli::{Cli, Command, DiagnoseCommand};
use edgediag::diagnose::{self, report, CheckOptions, DiagnoseOptions, DiagnoseTarget};
use edgediag::probes::SystemProbe;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    if cli.no_color {
        owo_colors::set_override(false);
    }

    match cli.command {
        Command::Diagnose(ref cmd) => {
            let (target, mut opts, pod_name) = build_run(cmd);
            let probe = SystemProbe::new();

            let result =
                diagnose::run_diagnose(target, &mut opts, pod_name.as_deref(), &probe, &probe)
                    .await;

            match result {
                Ok(()) => report::print_succeed(target),
                Err(e) => {
                    eprintln!("{e}");
                    report::print_fail(target);
                    std::process::exit(1);
                }
            }
        }
        Command::Completions(ref args) => generate_completions(args.shell),
    }

    Ok(())
}

/// Translate the parsed subcommand into a diagnose target and its options.
fn build_run(cmd: &DiagnoseCommand) -> (DiagnoseTarget, DiagnoseOptions, Option<String>) {
    match cmd {
        DiagnoseCommand::Node(args) => {
            let opts = DiagnoseOptions {
                config_path: args.config.clone(),
                ..Default::default()
            };
            (DiagnoseTarget::Node, opts, None)
        }
        DiagnoseCommand::Pod(args) => {
            let opts = DiagnoseOptions {
                namespace: args.namespace.clone(),
                config_path: args.config.clone(),
                ..Default::default()
            };
            (DiagnoseTarget::Pod, opts, Some(args.name.clone()))
        }
        DiagnoseCommand::Install(args) => {
            let opts = DiagnoseOptions {
                check: CheckOptions {
                    dns_ip: args.dns_ip,
                    domain: args.domain.clone(),
                    ip: args.ip.clone(),
                    cloud_hub_server: args.cloud_hub_server.clone(),
                    edgecore_server: args.edgecore_server.clone(),
                    config: args.config.clone(),
                    timeout_secs: args.timeout,
                },
                ..Default::default()
            };
            (DiagnoseTarget::Install, opts, None)
        }
    }
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "edgediag", &mut std::io::stdout());
}

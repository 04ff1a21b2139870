//! edgediag - diagnostics CLI for edge nodes running the edgecore agent

pub mod cli;
pub mod config;
pub mod diagnose;
pub mod error;
pub mod probes;
pub mod store;

// Thin argument plumbing over BenchConfig.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::BenchConfig;

#[derive(Debug, Parser)]
#[command(version, about = "Network performance benchmark", long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run as measurement server
    Server,
    /// Run as client: measure against a server, report daily summaries
    Client(ClientArgs),
    /// Segment and aggregate archived results
    Analyze {
        /// Path to directory containing benchmark results
        results_dir: PathBuf,
    },
}

#[derive(Debug, Default, Args)]
pub struct ClientArgs {
    /// Server to connect to
    #[arg(long)]
    pub server_ip: Option<String>,
    /// Duration per measurement run, seconds
    #[arg(short, long)]
    pub duration: Option<u64>,
    /// Report interval, seconds
    #[arg(short, long)]
    pub interval: Option<u64>,
    /// Parallel streams
    #[arg(short = 'n', long)]
    pub num_streams: Option<u32>,
    /// Sleep between runs, seconds
    #[arg(long)]
    pub sleep: Option<u64>,
    /// Region tag for the report subject
    #[arg(long)]
    pub region: Option<String>,
    /// E-mail sender
    #[arg(long)]
    pub email_sender: Option<String>,
    /// Comma separated e-mail recipient addresses
    #[arg(long)]
    pub email_recipients: Option<String>,
}

impl ClientArgs {
    /// Folds flags into the loaded config; flags win over file values.
    pub fn apply(self, config: &mut BenchConfig) {
        if let Some(v) = self.server_ip {
            config.measurement.server_ip = v;
        }
        if let Some(v) = self.duration {
            config.measurement.duration_secs = v;
        }
        if let Some(v) = self.interval {
            config.measurement.interval_secs = v;
        }
        if let Some(v) = self.num_streams {
            config.measurement.streams = v;
        }
        if let Some(v) = self.sleep {
            config.measurement.sleep_secs = v;
        }
        if let Some(v) = self.region {
            config.measurement.region = Some(v);
        }
        if let Some(v) = self.email_sender {
            config.email.sender = v;
        }
        if let Some(v) = self.email_recipients {
            config.email.recipients = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
    }
}

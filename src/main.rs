use std::sync::Arc;

use anyhow::Result;
use bwbench::*;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = cli::Cli::parse();
    let mut config = config::BenchConfig::load()?;

    match cli.command {
        cli::Command::Server => {
            tokio::select! {
                result = sampler::run_server("iperf3") => result?,
                _ = shutdown_signal() => {
                    tracing::info!("Received shutdown signal");
                }
            }
            Ok(())
        }
        cli::Command::Client(args) => {
            args.apply(&mut config);
            config.validate()?;
            run_client(config).await
        }
        cli::Command::Analyze { results_dir } => {
            let aggregator = archive::analyze(&results_dir, &render::JsonRenderer)?;
            tracing::info!(
                instances = aggregator.instances().len(),
                "analysis complete"
            );
            Ok(())
        }
    }
}

async fn run_client(config: config::BenchConfig) -> Result<()> {
    let subject = notify::subject_for_region(config.measurement.region.as_deref());
    let notifier = Arc::new(notify::EmailNotifier::new(
        config.email.sendmail_command.clone(),
        config.email.sender.clone(),
        config.email.recipients.clone(),
        subject,
    ));
    let store = Arc::new(store::FsArchiveStore::new(&config.archive.spool_dir));
    let sampler = Arc::new(sampler::Iperf3Sampler::default());

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let handle = live::spawn(
        live::LiveDeps {
            sampler,
            store,
            notifier,
            shutdown_rx,
        },
        live::LiveConfig {
            spec: sampler::MeasurementSpec {
                target: config.measurement.server_ip.clone(),
                duration_secs: config.measurement.duration_secs,
                interval_secs: config.measurement.interval_secs,
                streams: config.measurement.streams,
            },
            sleep_secs: config.measurement.sleep_secs,
            max_cycles: None,
        },
    );

    shutdown_signal().await;
    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    let _ = handle.await;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

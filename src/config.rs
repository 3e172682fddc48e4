use serde::Deserialize;

/// Defaults for the benchmark daemon, optionally overridden by a TOML file
/// (`BWBENCH_CONFIG`, default `bwbench.toml`) and then by CLI flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub measurement: MeasurementConfig,
    pub email: EmailConfig,
    pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Server to measure against when running as client.
    pub server_ip: String,
    /// Seconds per measurement run.
    pub duration_secs: u64,
    /// Seconds between interval reports within a run.
    pub interval_secs: u64,
    /// Parallel streams per run.
    pub streams: u32,
    /// Inter-cycle sleep; the loop paces against duration + sleep.
    pub sleep_secs: u64,
    /// Region/zone tag prefixed to the report subject.
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub sender: String,
    /// Empty = log-only notifications.
    pub recipients: Vec<String>,
    pub sendmail_command: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Spool directory for raw run reports.
    pub spool_dir: String,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            server_ip: "127.0.0.1".into(),
            duration_secs: 10,
            interval_secs: 10,
            streams: 1,
            sleep_secs: 0,
            region: None,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender: String::new(),
            recipients: Vec::new(),
            sendmail_command: "sendmail".into(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            spool_dir: "reports".into(),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            measurement: MeasurementConfig::default(),
            email: EmailConfig::default(),
            archive: ArchiveConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Loads the config file when present, built-in defaults otherwise.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("BWBENCH_CONFIG").unwrap_or_else(|_| "bwbench.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: BenchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.measurement.server_ip.is_empty(),
            "measurement.server_ip must be non-empty"
        );
        anyhow::ensure!(
            self.measurement.duration_secs > 0,
            "measurement.duration_secs must be > 0, got {}",
            self.measurement.duration_secs
        );
        anyhow::ensure!(
            self.measurement.interval_secs > 0,
            "measurement.interval_secs must be > 0, got {}",
            self.measurement.interval_secs
        );
        anyhow::ensure!(
            self.measurement.streams > 0,
            "measurement.streams must be > 0, got {}",
            self.measurement.streams
        );
        anyhow::ensure!(
            !self.archive.spool_dir.is_empty(),
            "archive.spool_dir must be non-empty"
        );
        anyhow::ensure!(
            self.email.recipients.is_empty() || !self.email.sender.is_empty(),
            "email.sender must be set when email.recipients is non-empty"
        );
        Ok(())
    }
}

// Config defaults, TOML parsing/validation, CLI flag folding

use bwbench::cli::ClientArgs;
use bwbench::config::BenchConfig;

#[test]
fn defaults_are_valid() {
    let config = BenchConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.measurement.duration_secs, 10);
    assert_eq!(config.measurement.streams, 1);
    assert!(config.email.recipients.is_empty());
}

#[test]
fn toml_overrides_defaults() {
    let config = BenchConfig::load_from_str(
        r#"
        [measurement]
        server_ip = "10.0.0.5"
        duration_secs = 30
        sleep_secs = 300

        [email]
        sender = "bench@example.com"
        recipients = ["ops@example.com"]
        "#,
    )
    .unwrap();
    assert_eq!(config.measurement.server_ip, "10.0.0.5");
    assert_eq!(config.measurement.duration_secs, 30);
    assert_eq!(config.measurement.sleep_secs, 300);
    assert_eq!(config.measurement.interval_secs, 10, "untouched default");
    assert_eq!(config.email.recipients, vec!["ops@example.com".to_string()]);
}

#[test]
fn zero_duration_is_rejected() {
    let err = BenchConfig::load_from_str("[measurement]\nduration_secs = 0\n").unwrap_err();
    assert!(err.to_string().contains("duration_secs"));
}

#[test]
fn recipients_without_sender_are_rejected() {
    let err =
        BenchConfig::load_from_str("[email]\nrecipients = [\"ops@example.com\"]\n").unwrap_err();
    assert!(err.to_string().contains("email.sender"));
}

#[test]
fn client_flags_override_config() {
    let mut config = BenchConfig::default();
    ClientArgs {
        server_ip: Some("192.0.2.9".into()),
        duration: Some(60),
        num_streams: Some(4),
        sleep: Some(50),
        region: Some("eu-west-1a".into()),
        email_sender: Some("bench@example.com".into()),
        email_recipients: Some("a@example.com, b@example.com,".into()),
        ..Default::default()
    }
    .apply(&mut config);
    assert_eq!(config.measurement.server_ip, "192.0.2.9");
    assert_eq!(config.measurement.duration_secs, 60);
    assert_eq!(config.measurement.interval_secs, 10, "flag absent, default kept");
    assert_eq!(config.measurement.streams, 4);
    assert_eq!(config.measurement.sleep_secs, 50);
    assert_eq!(config.measurement.region.as_deref(), Some("eu-west-1a"));
    assert_eq!(
        config.email.recipients,
        vec!["a@example.com".to_string(), "b@example.com".to_string()]
    );
    assert!(config.validate().is_ok());
}

//! Tests for source precedence: CLI > TOML > credential store > defaults.

use std::time::Duration;

use crate::schedule::OverlapPolicy;

use super::*;

mod defaults {
    use super::*;

    #[test]
    fn check_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&CALLBACK_ONLY), None, None).unwrap();

        assert_eq!(config.checkip_url.as_str(), "http://checkip.amazonaws.com/");
        assert_eq!(config.schedule.interval(), Some(Duration::from_secs(30 * 60)));
        assert_eq!(config.overlap, OverlapPolicy::Skip);
        assert!(!config.save_credentials);
    }

    #[test]
    fn nothing_enabled_is_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None, None);
        assert!(matches!(result, Err(ConfigError::NoNotifier)));
    }
}

mod cli_over_toml {
    use super::*;

    #[test]
    fn schedule_and_url() {
        let toml = toml(
            r#"
            [check]
            url = "https://toml.example.com/ip"
            schedule = "@hourly"
            overlap = "allow"

            [callback]
            url = "https://toml.example.com/update"
        "#,
        );
        let cli = cli(&[
            "--checkip-url",
            "https://cli.example.com/ip",
            "--schedule",
            "every 5 minutes",
            "--overlap",
            "skip",
        ]);

        let config = ValidatedConfig::from_raw(&cli, Some(&toml), None).unwrap();

        assert_eq!(config.checkip_url.as_str(), "https://cli.example.com/ip");
        assert_eq!(config.schedule.interval(), Some(Duration::from_secs(300)));
        assert_eq!(config.overlap, OverlapPolicy::Skip);
        assert_eq!(
            config.callback.unwrap().url.as_str(),
            "https://toml.example.com/update"
        );
    }

    #[test]
    fn toml_values_used_when_cli_absent() {
        let toml = toml(
            r#"
            [check]
            schedule = "0 */2 * * *"
            overlap = "allow"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&CALLBACK_ONLY), Some(&toml), None).unwrap();

        assert_eq!(config.schedule.expression(), "0 */2 * * *");
        assert_eq!(config.schedule.interval(), None);
        assert_eq!(config.overlap, OverlapPolicy::Allow);
    }

    #[test]
    fn invalid_schedule_is_error() {
        let mut args = CALLBACK_ONLY.to_vec();
        args.extend(["--schedule", "whenever"]);

        let result = ValidatedConfig::from_raw(&cli(&args), None, None);

        assert!(matches!(result, Err(ConfigError::InvalidSchedule(_))));
    }
}

mod credential_store {
    use super::*;

    fn stored(password: Option<&str>, header: Option<&str>) -> Credentials {
        Credentials {
            mail_password: password.map(ToString::to_string),
            callback_auth_header: header.map(ToString::to_string),
        }
    }

    #[test]
    fn store_fills_missing_password() {
        let stored = stored(Some("from-store"), None);
        let cli = cli(&[
            "--email-sender",
            "me@example.com",
            "--email-recipient",
            "you@example.com",
        ]);

        let config = ValidatedConfig::from_raw(&cli, None, Some(&stored)).unwrap();

        assert_eq!(config.email.unwrap().password, "from-store");
    }

    #[test]
    fn explicit_password_beats_store() {
        let stored = stored(Some("from-store"), None);
        let toml = toml(
            r#"
            [email]
            sender = "me@example.com"
            recipient = "you@example.com"
            password = "from-toml"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml), Some(&stored)).unwrap();

        assert_eq!(config.email.unwrap().password, "from-toml");
    }

    #[test]
    fn store_password_alone_does_not_enable_email() {
        let stored = stored(Some("from-store"), None);

        let config = ValidatedConfig::from_raw(&cli(&CALLBACK_ONLY), None, Some(&stored)).unwrap();

        assert!(config.email.is_none());
    }

    #[test]
    fn store_fills_auth_header() {
        let stored = stored(None, Some("Bearer stored"));

        let config = ValidatedConfig::from_raw(&cli(&CALLBACK_ONLY), None, Some(&stored)).unwrap();

        assert_eq!(config.callback.unwrap().auth_header.unwrap(), "Bearer stored");
    }

    #[test]
    fn credentials_keep_stored_secret_of_disabled_notifier() {
        let stored = stored(Some("pw"), Some("Bearer stored"));

        let config = ValidatedConfig::from_raw(&cli(&CALLBACK_ONLY), None, Some(&stored)).unwrap();
        let resolved = config.credentials();

        assert!(config.email.is_none());
        assert_eq!(resolved.mail_password.as_deref(), Some("pw"));
        assert_eq!(resolved.callback_auth_header.as_deref(), Some("Bearer stored"));
    }

    #[test]
    fn credentials_reflect_resolved_secrets() {
        let stored = stored(Some("pw"), Some("Bearer stored"));
        let mut args = CALLBACK_ONLY.to_vec();
        args.extend([
            "--email-sender",
            "me@example.com",
            "--email-recipient",
            "you@example.com",
            "--callback-auth-header",
            "Bearer cli",
        ]);

        let config = ValidatedConfig::from_raw(&cli(&args), None, Some(&stored)).unwrap();
        let resolved = config.credentials();

        assert_eq!(resolved.mail_password.as_deref(), Some("pw"));
        assert_eq!(resolved.callback_auth_header.as_deref(), Some("Bearer cli"));
    }
}

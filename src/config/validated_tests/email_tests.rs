//! Tests for email alert settings.

use crate::config::error::field;

use super::*;

fn email_args() -> Vec<&'static str> {
    vec![
        "--email-sender",
        "me@example.com",
        "--email-recipient",
        "you@example.com",
        "--email-password",
        "hunter2",
    ]
}

mod enabling {
    use super::*;

    #[test]
    fn disabled_when_no_email_field_given() {
        let config = ValidatedConfig::from_raw(&cli(&CALLBACK_ONLY), None, None).unwrap();
        assert!(config.email.is_none());
    }

    #[test]
    fn enabled_with_full_settings() {
        let config = ValidatedConfig::from_raw(&cli(&email_args()), None, None).unwrap();
        let email = config.email.unwrap();

        assert_eq!(email.sender, "me@example.com");
        assert_eq!(email.recipient, "you@example.com");
        assert_eq!(email.password, "hunter2");
        assert_eq!(email.host, "smtp.gmail.com");
        assert_eq!(email.port, 587);
        assert_eq!(email.username(), "me@example.com");
        assert!(config.callback.is_none());
    }

    #[test]
    fn password_alone_enables_and_requires_sender() {
        let result = ValidatedConfig::from_raw(
            &cli(&["--email-password", "hunter2", "--callback-url", "https://example.com"]),
            None,
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: field::EMAIL_SENDER,
                ..
            })
        ));
    }

    #[test]
    fn missing_recipient_is_error() {
        let result = ValidatedConfig::from_raw(
            &cli(&["--email-sender", "me@example.com", "--email-password", "x"]),
            None,
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: field::EMAIL_RECIPIENT,
                ..
            })
        ));
    }

    #[test]
    fn blank_values_do_not_enable() {
        let result = ValidatedConfig::from_raw(&cli(&["--email-sender", "  "]), None, None);
        assert!(matches!(result, Err(ConfigError::NoNotifier)));
    }

    #[test]
    fn missing_password_is_error() {
        let result = ValidatedConfig::from_raw(
            &cli(&[
                "--email-sender",
                "me@example.com",
                "--email-recipient",
                "you@example.com",
            ]),
            None,
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: field::EMAIL_PASSWORD,
                ..
            })
        ));
    }
}

mod validation {
    use super::*;

    #[test]
    fn invalid_sender_address() {
        let mut args = email_args();
        args[1] = "not-an-address";

        let result = ValidatedConfig::from_raw(&cli(&args), None, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: field::EMAIL_SENDER,
                ..
            })
        ));
    }

    #[test]
    fn valid_body_template_is_kept() {
        let mut args = email_args();
        args.extend(["--email-body-template", "{{previous}} => {{current}}"]);

        let config = ValidatedConfig::from_raw(&cli(&args), None, None).unwrap();

        assert_eq!(
            config.email.unwrap().body_template.as_deref(),
            Some("{{previous}} => {{current}}")
        );
    }

    #[test]
    fn unclosed_template_is_rejected() {
        let mut args = email_args();
        args.extend(["--email-body-template", "{{#if current}}changed"]);

        let result = ValidatedConfig::from_raw(&cli(&args), None, None);

        assert!(matches!(result, Err(ConfigError::InvalidTemplate { .. })));
    }
}

mod relay {
    use super::*;

    #[test]
    fn relay_settings_from_toml() {
        let toml = toml(
            r#"
            [email]
            sender = "me@example.com"
            recipient = "you@example.com"
            password = "hunter2"
            host = "mail.example.com"
            port = 465
            username = "login"
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml), None).unwrap();
        let email = config.email.unwrap();

        assert_eq!(email.host, "mail.example.com");
        assert_eq!(email.port, 465);
        assert_eq!(email.username(), "login");
    }

    #[test]
    fn cli_port_overrides_toml() {
        let toml = toml("[email]\nport = 465\n");
        let mut args = email_args();
        args.extend(["--email-port", "2525"]);

        let config = ValidatedConfig::from_raw(&cli(&args), Some(&toml), None).unwrap();

        assert_eq!(config.email.unwrap().port, 2525);
    }
}

//! Tests for CLI argument parsing.

use clap::Parser;

use super::cli::{CallbackPolicyArg, Cli, Command, OverlapArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_email_options() {
        let cli = Cli::parse_from_iter([
            "ipwatchdog",
            "--email-sender",
            "me@example.com",
            "--email-recipient",
            "you@example.com",
            "--email-host",
            "mail.example.com",
            "--email-port",
            "2525",
            "--email-username",
            "login",
            "--email-password",
            "hunter2",
        ]);

        assert_eq!(cli.email_sender.as_deref(), Some("me@example.com"));
        assert_eq!(cli.email_recipient.as_deref(), Some("you@example.com"));
        assert_eq!(cli.email_host.as_deref(), Some("mail.example.com"));
        assert_eq!(cli.email_port, Some(2525));
        assert_eq!(cli.email_username.as_deref(), Some("login"));
        assert_eq!(cli.email_password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn parse_callback_options() {
        let cli = Cli::parse_from_iter([
            "ipwatchdog",
            "--callback-url",
            "https://example.com/update",
            "--callback-ip-param",
            "myip",
            "--callback-auth-header",
            "Bearer token",
            "--callback-policy",
            "on-change",
        ]);

        assert_eq!(cli.callback_url.as_deref(), Some("https://example.com/update"));
        assert_eq!(cli.callback_ip_param.as_deref(), Some("myip"));
        assert_eq!(cli.callback_auth_header.as_deref(), Some("Bearer token"));
        assert_eq!(cli.callback_policy, Some(CallbackPolicyArg::OnChange));
    }

    #[test]
    fn parse_check_options() {
        let cli = Cli::parse_from_iter([
            "ipwatchdog",
            "--checkip-url",
            "https://ifconfig.me/ip",
            "--schedule",
            "*/5 * * * *",
            "--overlap",
            "allow",
        ]);

        assert_eq!(cli.checkip_url.as_deref(), Some("https://ifconfig.me/ip"));
        assert_eq!(cli.schedule.as_deref(), Some("*/5 * * * *"));
        assert_eq!(cli.overlap, Some(OverlapArg::Allow));
    }

    #[test]
    fn parse_misc_options() {
        let cli = Cli::parse_from_iter([
            "ipwatchdog",
            "--config",
            "/path/to/config.toml",
            "--credentials-file",
            "/path/to/creds",
            "--save-credentials",
            "--verbose",
        ]);

        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
        assert_eq!(
            cli.credentials_file.as_ref().unwrap().to_str(),
            Some("/path/to/creds")
        );
        assert!(cli.save_credentials);
        assert!(cli.verbose);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["ipwatchdog"]);

        // Defaults are applied during validation, not by clap
        assert!(cli.checkip_url.is_none());
        assert!(cli.schedule.is_none());
        assert!(cli.email_port.is_none());
        assert!(cli.callback_policy.is_none());
        assert!(!cli.save_credentials);
        assert!(!cli.verbose);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = Cli::try_parse_from(["ipwatchdog", "--email-port", "70000"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let result = Cli::try_parse_from(["ipwatchdog", "--callback-policy", "sometimes"]);
        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["ipwatchdog", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("ipwatchdog.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["ipwatchdog", "init", "--output", "/custom/config.toml"]);

        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/custom/config.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn is_init_false_for_run_mode() {
        let cli = Cli::parse_from_iter(["ipwatchdog", "--callback-url", "https://example.com"]);

        assert!(!cli.is_init());
    }
}

mod value_enums {
    use super::*;
    use crate::notify::CallbackPolicy;
    use crate::schedule::OverlapPolicy;

    #[test]
    fn overlap_arg_converts() {
        assert_eq!(OverlapPolicy::from(OverlapArg::Skip), OverlapPolicy::Skip);
        assert_eq!(OverlapPolicy::from(OverlapArg::Allow), OverlapPolicy::Allow);
    }

    #[test]
    fn callback_policy_arg_converts() {
        assert_eq!(
            CallbackPolicy::from(CallbackPolicyArg::EveryTick),
            CallbackPolicy::EveryTick
        );
        assert_eq!(
            CallbackPolicy::from(CallbackPolicyArg::OnChange),
            CallbackPolicy::OnChange
        );
    }

    #[test]
    fn value_names_match_display() {
        use clap::ValueEnum;

        for arg in CallbackPolicyArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, CallbackPolicy::from(*arg).to_string());
        }
        for arg in OverlapArg::value_variants() {
            let name = arg.to_possible_value().unwrap().get_name().to_string();
            assert_eq!(name, OverlapPolicy::from(*arg).to_string());
        }
    }
}

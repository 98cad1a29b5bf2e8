//! Tests for `NotifierSet` dispatch policy.

use super::*;
use crate::monitor::{ChangeDetector, Observation};
use crate::test_fixtures::{RecordingNotifier, pair};

type TestSet = NotifierSet<RecordingNotifier, RecordingNotifier>;

fn both(policy: CallbackPolicy) -> TestSet {
    NotifierSet::new()
        .with_email(RecordingNotifier::new("email"))
        .with_callback(RecordingNotifier::new("callback"), policy)
}

fn email_calls(set: &TestSet) -> Vec<(String, String)> {
    set.email().map(RecordingNotifier::calls).unwrap_or_default()
}

fn callback_calls(set: &TestSet) -> Vec<(String, String)> {
    set.callback()
        .map(RecordingNotifier::calls)
        .unwrap_or_default()
}

mod on_change_policy {
    use super::*;

    #[tokio::test]
    async fn changed_invokes_both_with_exact_values() {
        let set = both(CallbackPolicy::OnChange);

        let report = set
            .dispatch(&Observation::classify("1.2.3.4", "5.6.7.8"))
            .await;

        assert_eq!(report.invoked, vec!["email", "callback"]);
        assert_eq!(report.failures, 0);
        assert_eq!(email_calls(&set), vec![pair("1.2.3.4", "5.6.7.8")]);
        assert_eq!(callback_calls(&set), vec![pair("1.2.3.4", "5.6.7.8")]);
    }

    #[tokio::test]
    async fn unchanged_invokes_nothing() {
        let set = both(CallbackPolicy::OnChange);

        let report = set
            .dispatch(&Observation::classify("1.2.3.4", "1.2.3.4"))
            .await;

        assert!(report.invoked.is_empty());
        assert!(email_calls(&set).is_empty());
        assert!(callback_calls(&set).is_empty());
    }

    #[tokio::test]
    async fn first_run_invokes_nothing() {
        let set = both(CallbackPolicy::OnChange);

        let report = set.dispatch(&Observation::classify("", "1.2.3.4")).await;

        assert!(report.invoked.is_empty());
    }
}

mod every_tick_policy {
    use super::*;

    fn callback_only() -> TestSet {
        NotifierSet::new().with_callback(RecordingNotifier::new("callback"), CallbackPolicy::EveryTick)
    }

    #[tokio::test]
    async fn exactly_one_callback_per_tick_regardless_of_outcome() {
        let set = callback_only();
        let detector = ChangeDetector::new();

        for ip in ["1.2.3.4", "1.2.3.4", "5.6.7.8"] {
            let report = set.dispatch(&detector.observe(ip)).await;
            assert_eq!(report.invoked, vec!["callback"]);
        }

        assert_eq!(
            callback_calls(&set),
            vec![
                pair("", "1.2.3.4"),
                pair("1.2.3.4", "1.2.3.4"),
                pair("1.2.3.4", "5.6.7.8"),
            ]
        );
    }

    #[tokio::test]
    async fn email_never_fires_as_heartbeat() {
        let set = both(CallbackPolicy::EveryTick);

        set.dispatch(&Observation::classify("", "1.2.3.4")).await;
        set.dispatch(&Observation::classify("1.2.3.4", "1.2.3.4"))
            .await;

        assert!(email_calls(&set).is_empty());
        assert_eq!(callback_calls(&set).len(), 2);
    }

    #[tokio::test]
    async fn changed_fires_email_and_single_callback() {
        let set = both(CallbackPolicy::EveryTick);

        let report = set
            .dispatch(&Observation::classify("1.2.3.4", "5.6.7.8"))
            .await;

        assert_eq!(report.invoked, vec!["email", "callback"]);
        assert_eq!(callback_calls(&set).len(), 1);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn email_failure_does_not_block_callback() {
        let set: TestSet = NotifierSet::new()
            .with_email(RecordingNotifier::failing("email"))
            .with_callback(RecordingNotifier::new("callback"), CallbackPolicy::OnChange);

        let report = set
            .dispatch(&Observation::classify("1.2.3.4", "5.6.7.8"))
            .await;

        assert_eq!(report.invoked, vec!["email", "callback"]);
        assert_eq!(report.failures, 1);
        assert_eq!(callback_calls(&set).len(), 1);
    }
}

#[test]
fn empty_set_reports_empty() {
    let set = TestSet::new();
    assert!(set.is_empty());
    assert!(!both(CallbackPolicy::OnChange).is_empty());
    assert_eq!(
        both(CallbackPolicy::OnChange).callback_policy(),
        CallbackPolicy::OnChange
    );
}

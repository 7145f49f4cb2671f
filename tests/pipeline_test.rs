//! End-to-end pipeline tests with fake providers and webhook

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use liquidity_monitor::config::{Config, FEISHU_WEBHOOK_VAR, FRED_API_KEY_VAR};
use liquidity_monitor::error::{ConfigError, FetchError, NotifyError};
use liquidity_monitor::fetch::{MacroSource, PriceSource};
use liquidity_monitor::notify::{CardMessage, Notifier};
use liquidity_monitor::pipeline::{run, Monitor, RunOutcome};
use liquidity_monitor::rules::AlertLevel;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Calls {
    macro_calls: Arc<AtomicUsize>,
    price_calls: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl Calls {
    fn total(&self) -> usize {
        self.macro_calls.load(Ordering::SeqCst)
            + self.price_calls.load(Ordering::SeqCst)
            + self.sent.lock().unwrap().len()
    }
}

struct FakeFred {
    values: HashMap<String, f64>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl MacroSource for FakeFred {
    async fn latest_value(&self, series_id: &str, _since: NaiveDate) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.values
            .get(series_id)
            .copied()
            .ok_or_else(|| FetchError::NoObservations(series_id.to_string()))
    }
}

struct FakeYahoo {
    close: Option<f64>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl PriceSource for FakeYahoo {
    async fn latest_close(&self, ticker: &str) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.close.ok_or_else(|| FetchError::Status {
            provider: "Yahoo",
            status: 404,
            body: format!("No data found for {}", ticker),
        })
    }
}

struct FakeWebhook {
    sent: Arc<Mutex<Vec<serde_json::Value>>>,
    reply: Result<String, (i64, String)>,
}

#[async_trait]
impl Notifier for FakeWebhook {
    async fn send(&self, card: &CardMessage) -> Result<String, NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push(serde_json::to_value(card).unwrap());
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err((code, msg)) => Err(NotifyError::Rejected {
                code: *code,
                msg: msg.clone(),
            }),
        }
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 1, 0, 0).unwrap()
}

fn monitor(calls: &Calls, sofr: f64, iorb: f64, dxy: Option<f64>) -> Monitor {
    monitor_with_reply(calls, Some((sofr, iorb)), dxy, Ok("{\"code\":0}".to_string()))
}

fn monitor_with_reply(
    calls: &Calls,
    rates: Option<(f64, f64)>,
    dxy: Option<f64>,
    reply: Result<String, (i64, String)>,
) -> Monitor {
    let values = rates
        .map(|(sofr, iorb)| {
            HashMap::from([("SOFR".to_string(), sofr), ("IORB".to_string(), iorb)])
        })
        .unwrap_or_default();

    Monitor::new(
        Config::default(),
        Box::new(FakeFred {
            values,
            calls: calls.macro_calls.clone(),
        }),
        Box::new(FakeYahoo {
            close: dxy,
            calls: calls.price_calls.clone(),
        }),
        Box::new(FakeWebhook {
            sent: calls.sent.clone(),
            reply,
        }),
    )
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_missing_env_makes_no_calls() {
    let cases = [
        (env(&[]), FRED_API_KEY_VAR),
        (env(&[(FRED_API_KEY_VAR, "key")]), FEISHU_WEBHOOK_VAR),
        (
            env(&[(FEISHU_WEBHOOK_VAR, "https://open.feishu.cn/hook/x")]),
            FRED_API_KEY_VAR,
        ),
        (
            env(&[(FRED_API_KEY_VAR, " "), (FEISHU_WEBHOOK_VAR, "https://h")]),
            FRED_API_KEY_VAR,
        ),
    ];

    for (vars, missing) in cases {
        let calls = Calls::default();
        let build_calls = calls.clone();

        let outcome = run(
            |name| vars.get(name).cloned(),
            move |_| Ok(monitor(&build_calls, 4.5, 4.4, Some(104.0))),
            now(),
        )
        .await
        .unwrap();

        let RunOutcome::MissingConfig(err) = outcome else {
            panic!("expected missing config for {}", missing);
        };
        assert!(matches!(&err, ConfigError::MissingEnv(name) if *name == missing));
        assert_eq!(
            err.to_string(),
            format!("Missing environment variable: {}", missing)
        );
        assert_eq!(calls.total(), 0);
    }
}

#[tokio::test]
async fn test_full_run_sends_danger_card() {
    let vars = env(&[
        (FRED_API_KEY_VAR, "key"),
        (FEISHU_WEBHOOK_VAR, "https://open.feishu.cn/hook/x"),
    ]);
    let calls = Calls::default();
    let build_calls = calls.clone();

    let outcome = run(
        |name| vars.get(name).cloned(),
        move |_| Ok(monitor(&build_calls, 4.52, 4.40, Some(105.5))),
        now(),
    )
    .await
    .unwrap();

    let RunOutcome::Notified { analysis, response } = outcome else {
        panic!("expected a notification");
    };
    assert_eq!(analysis.alert.level, AlertLevel::Danger);
    assert_eq!(response, "{\"code\":0}");

    assert_eq!(calls.macro_calls.load(Ordering::SeqCst), 2);
    assert_eq!(calls.price_calls.load(Ordering::SeqCst), 1);

    let sent = calls.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let card = &sent[0]["card"];
    assert_eq!(card["header"]["template"], "red");
    let title = card["header"]["title"]["content"].as_str().unwrap();
    assert!(title.ends_with("| daily monitor"));
    assert_eq!(
        card["elements"][0]["fields"][0]["text"]["content"],
        "**SOFR-IORB spread:**\n0.1200%"
    );
    assert_eq!(
        card["elements"][0]["fields"][1]["text"]["content"],
        "**Dollar index (DXY):**\n105.50"
    );
    assert_eq!(
        card["elements"][2]["elements"][0]["content"],
        "Updated: 2025-03-20 01:00 (UTC)"
    );
}

#[tokio::test]
async fn test_macro_failure_sends_nothing() {
    let calls = Calls::default();
    let monitor = monitor_with_reply(&calls, None, Some(104.0), Ok(String::new()));

    let outcome = monitor.run_once(now()).await.unwrap();

    assert!(matches!(outcome, RunOutcome::Aborted(_)));
    assert!(calls.sent.lock().unwrap().is_empty());
    assert_eq!(calls.price_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_dxy_failure_cannot_trigger_dollar_rule() {
    let calls = Calls::default();
    let monitor = monitor(&calls, 4.31, 4.33, None);

    let outcome = monitor.run_once(now()).await.unwrap();

    let RunOutcome::Notified { analysis, .. } = outcome else {
        panic!("expected a notification");
    };
    assert_eq!(analysis.readings.dxy, 0.0);
    assert_eq!(analysis.alert.level, AlertLevel::Info);

    let sent = calls.sent.lock().unwrap();
    assert_eq!(sent[0]["card"]["header"]["template"], "green");
    assert_eq!(
        sent[0]["card"]["elements"][0]["fields"][1]["text"]["content"],
        "**Dollar index (DXY):**\n0.00"
    );
}

#[tokio::test]
async fn test_strong_dollar_with_flat_spread() {
    let calls = Calls::default();
    let monitor = monitor(&calls, 4.40, 4.40, Some(107.0));

    let outcome = monitor.run_once(now()).await.unwrap();

    let RunOutcome::Notified { analysis, .. } = outcome else {
        panic!("expected a notification");
    };
    assert_eq!(analysis.alert.level, AlertLevel::Warning);
    assert!(analysis
        .alert
        .title
        .contains("currency index extremely strong"));
}

#[tokio::test]
async fn test_webhook_rejection_propagates() {
    let calls = Calls::default();
    let monitor = monitor_with_reply(
        &calls,
        Some((4.40, 4.40)),
        Some(104.0),
        Err((19024, "Key Words Not Found".to_string())),
    );

    let err = monitor.run_once(now()).await.unwrap_err();

    assert!(matches!(err, NotifyError::Rejected { code: 19024, .. }));
    assert_eq!(calls.sent.lock().unwrap().len(), 1);
}

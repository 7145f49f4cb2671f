//! Single-run pipeline: fetch, evaluate, notify
//!
//! Every component is injected, so the whole run can be driven with fakes.

use crate::config::{Config, Credentials};
use crate::error::{ConfigError, FetchError, NotifyError};
use crate::fetch::{
    fetch_dxy, fetch_macro_rates, FredClient, MacroRates, MacroSource, PriceSource, Readings,
    YahooClient,
};
use crate::notify::{build_card, CardMessage, FeishuNotifier, Notifier};
use crate::rules::{evaluate, Alert};
use crate::telemetry::{self, RunStatus};
use chrono::{DateTime, NaiveDate, Utc};

/// Fetched values and their classification
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub rates: MacroRates,
    pub readings: Readings,
    pub alert: Alert,
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// Required environment was missing; nothing was fetched or sent
    MissingConfig(ConfigError),
    /// Macro data was unavailable; nothing was sent
    Aborted(FetchError),
    /// Card delivered
    Notified {
        analysis: Analysis,
        response: String,
    },
}

/// Fetch the readings and classify them
///
/// Fails only when the macro pair is unavailable; the dollar index
/// degrades to `0.0`.
pub async fn analyze(
    macro_source: &dyn MacroSource,
    price_source: &dyn PriceSource,
    config: &Config,
    today: NaiveDate,
) -> Result<Analysis, FetchError> {
    let rates = fetch_macro_rates(macro_source, &config.fred, today).await?;
    let dxy = fetch_dxy(price_source, &config.market.ticker).await;

    let readings = Readings::new(rates, dxy);
    let alert = evaluate(readings.spread, readings.dxy);

    telemetry::record_readings(&readings);
    tracing::info!(
        spread = readings.spread,
        dxy = readings.dxy,
        level = %alert.level,
        title = %alert.title,
        "Evaluated liquidity rules"
    );

    Ok(Analysis {
        rates,
        readings,
        alert,
    })
}

/// Render the card for an analysis
pub fn render(analysis: &Analysis, config: &Config, now: DateTime<Utc>) -> CardMessage {
    build_card(
        &analysis.alert,
        &analysis.readings,
        now,
        &config.notify.title_suffix,
    )
}

/// Fully wired monitor
pub struct Monitor {
    config: Config,
    macro_source: Box<dyn MacroSource>,
    price_source: Box<dyn PriceSource>,
    notifier: Box<dyn Notifier>,
}

impl Monitor {
    /// Create a monitor from explicit components
    pub fn new(
        config: Config,
        macro_source: Box<dyn MacroSource>,
        price_source: Box<dyn PriceSource>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            macro_source,
            price_source,
            notifier,
        }
    }

    /// Create a monitor talking to FRED, Yahoo Finance and Feishu
    pub fn from_credentials(config: Config, credentials: &Credentials) -> Result<Self, FetchError> {
        let fred = FredClient::with_base_url(&credentials.fred_api_key, &config.fred.base_url);
        let yahoo = YahooClient::with_base_url(&config.market.base_url, &config.market.range)?;
        let feishu = FeishuNotifier::new(&credentials.webhook_url);

        Ok(Self::new(
            config,
            Box::new(fred),
            Box::new(yahoo),
            Box::new(feishu),
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the three steps once
    ///
    /// A macro fetch failure ends the run without notifying. Delivery
    /// failures are returned to the caller.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<RunOutcome, NotifyError> {
        let analysis = match analyze(
            self.macro_source.as_ref(),
            self.price_source.as_ref(),
            &self.config,
            now.date_naive(),
        )
        .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::error!(error = %e, "Data fetch failed, skipping notification");
                telemetry::record_run(RunStatus::FetchFailed);
                return Ok(RunOutcome::Aborted(e));
            }
        };

        let card = render(&analysis, &self.config, now);
        let response = self.notifier.send(&card).await?;

        telemetry::record_alert(analysis.alert.level);
        telemetry::record_run(RunStatus::Notified);

        Ok(RunOutcome::Notified { analysis, response })
    }
}

/// Resolve credentials, build the monitor and run it once
///
/// Missing credentials print a diagnostic and return before `build` is
/// called, so no network activity happens.
pub async fn run<L, B>(lookup: L, build: B, now: DateTime<Utc>) -> anyhow::Result<RunOutcome>
where
    L: Fn(&str) -> Option<String>,
    B: FnOnce(Credentials) -> anyhow::Result<Monitor>,
{
    let credentials = match Credentials::from_lookup(lookup) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {}", e);
            tracing::error!(error = %e, "Missing configuration, nothing to do");
            telemetry::record_run(RunStatus::MissingConfig);
            return Ok(RunOutcome::MissingConfig(e));
        }
    };

    let monitor = build(credentials)?;
    Ok(monitor.run_once(now).await?)
}

//! Check command implementation

use crate::config::{env_lookup, require, Config, FRED_API_KEY_VAR};
use crate::fetch::{FredClient, YahooClient};
use crate::notify::{format_dxy, format_spread};
use crate::pipeline;
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print the card JSON that would be sent
    #[arg(long)]
    pub card: bool,
}

impl CheckArgs {
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let api_key = match require(&env_lookup, FRED_API_KEY_VAR) {
            Ok(key) => key,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(());
            }
        };

        let fred = FredClient::with_base_url(api_key, &config.fred.base_url);
        let yahoo = YahooClient::with_base_url(&config.market.base_url, &config.market.range)?;
        let now = Utc::now();

        let analysis = match pipeline::analyze(&fred, &yahoo, &config, now.date_naive()).await {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Data fetch failed: {}", e);
                return Ok(());
            }
        };

        if self.card {
            let card = pipeline::render(&analysis, &config, now);
            println!("{}", serde_json::to_string_pretty(&card)?);
            return Ok(());
        }

        println!("{} ({})", analysis.alert.title, analysis.alert.level);
        println!(
            "  {}: {}",
            config.fred.funding_series, analysis.rates.funding_rate
        );
        println!(
            "  {}: {}",
            config.fred.reference_series, analysis.rates.reference_rate
        );
        println!("  Spread: {}", format_spread(analysis.readings.spread));
        println!("  DXY: {}", format_dxy(analysis.readings.dxy));

        Ok(())
    }
}

//! Run command implementation

use crate::config::{env_lookup, Config};
use crate::pipeline::{self, Monitor, RunOutcome};
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct RunArgs {}

impl RunArgs {
    pub async fn execute(&self, config: Config) -> anyhow::Result<()> {
        let outcome = pipeline::run(
            env_lookup,
            |credentials| Ok(Monitor::from_credentials(config, &credentials)?),
            Utc::now(),
        )
        .await?;

        match outcome {
            RunOutcome::MissingConfig(_) => {}
            RunOutcome::Aborted(e) => {
                tracing::warn!(error = %e, "Run aborted, no card sent");
            }
            RunOutcome::Notified { analysis, .. } => {
                tracing::info!(level = %analysis.alert.level, "Card sent");
            }
        }

        Ok(())
    }
}

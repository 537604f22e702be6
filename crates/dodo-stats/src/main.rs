//! Fetch one statistics report and print it as JSON.

use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};

use dodo_core::{
    config::Config,
    credentials::CredentialResolver,
    domain::{Region, StatisticsReportType},
    report::StatisticsReporter,
    settings::JsonFileSettingsStore,
    statistics::StatisticsClient,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List the report names `fetch` accepts
    List,
    /// Fetch one report for the account's enabled units
    Fetch {
        /// Report name, e.g. `heated-shelf`
        #[arg(value_parser = parse_report)]
        report: StatisticsReportType,
        /// Account the credentials are linked to
        account_name: String,
        /// Region of the API shard
        region: String,
    },
}

fn parse_report(raw: &str) -> Result<StatisticsReportType, String> {
    StatisticsReportType::from_str(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (report, account_name, region) = match Cli::parse().command {
        Commands::List => {
            for kind in StatisticsReportType::ALL {
                println!("{kind}");
            }
            return Ok(());
        }
        Commands::Fetch {
            report,
            account_name,
            region,
        } => (report, account_name, Region::new(region)),
    };

    dodo_core::logging::init("dodo-stats")?;
    let cfg = Config::load()?;

    let reporter = StatisticsReporter::new(
        Arc::new(JsonFileSettingsStore::new(cfg.settings_file.clone())),
        CredentialResolver::from_config(&cfg)?,
        StatisticsClient::from_config(&cfg)?,
    );

    let payload = reporter
        .fetch(report, &account_name, &region)
        .await
        .map_err(|e| {
            if e.is_credentials_missing() {
                anyhow::anyhow!("{e}: re-link account {account_name} and try again")
            } else {
                anyhow::Error::new(e)
            }
        })
        .with_context(|| format!("{report} report for {region} failed"))?;

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

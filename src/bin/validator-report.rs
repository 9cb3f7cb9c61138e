use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Password;
use tracing::{debug, info};

use validator_report::{
    build_report, log, render_report,
    report::{fetch_network_summary, render_network},
    token_store, Address, ConfigOverrides, DashboardApiHttp, DashboardConfig, EpochWindow,
    Palette, ReportOptions,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dashboard base url, overrides DASHBOARD_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Seconds to wait for each request.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Bypass token for the dashboard's bot protection, overrides the stored one.
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Status, performance, slashings, accusations and leaderboard rank of a validator.
    Report {
        /// Validator address, 0x followed by 40 hex characters.
        address: String,

        /// First epoch of the leaderboard window. Requires --end-epoch.
        #[arg(long, requires = "end_epoch", allow_negative_numbers = true)]
        start_epoch: Option<i64>,

        /// Last epoch of the leaderboard window. Requires --start-epoch.
        #[arg(long, requires = "start_epoch", allow_negative_numbers = true)]
        end_epoch: Option<i64>,

        /// Number of epochs in the default leaderboard window.
        #[arg(long)]
        span: Option<u64>,

        /// Print the report as json.
        #[arg(long)]
        json: bool,

        #[arg(long)]
        no_color: bool,
    },
    /// Current epoch and validator counts of the network.
    Network {
        #[arg(long)]
        json: bool,

        #[arg(long)]
        no_color: bool,
    },
    /// Stores a bypass token for later runs, prompts for it when not given.
    Login { bypass_token: Option<String> },
    /// Removes the stored bypass token.
    Logout,
}

fn palette(no_color: bool) -> Palette {
    if no_color {
        Palette::plain()
    } else {
        Palette::colored()
    }
}

fn token_path() -> Result<std::path::PathBuf> {
    token_store::default_token_path().ok_or_else(|| {
        anyhow!("could not determine where to store the token, set VALIDATOR_REPORT_TOKEN_FILE")
    })
}

async fn run_cli(cli: Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        bypass_token: cli.token,
        leaderboard_span: None,
    };

    match cli.command {
        Commands::Report {
            address,
            start_epoch,
            end_epoch,
            span,
            json,
            no_color,
        } => {
            // Bad input aborts before anything touches the network.
            let address: Address = address.parse().context("invalid validator address")?;
            let window = match (start_epoch, end_epoch) {
                (Some(start), Some(end)) => Some(
                    EpochWindow::new(start, end).context("invalid leaderboard epoch window")?,
                ),
                _ => None,
            };

            let token_path = token_store::default_token_path();
            let config = DashboardConfig::load(
                ConfigOverrides {
                    leaderboard_span: span,
                    ..overrides
                },
                token_path.as_deref(),
            )?;
            debug!(
                base_url = %config.base_url,
                has_token = config.bypass_token.is_some(),
                "loaded dashboard config"
            );

            let api = DashboardApiHttp::new(&config)?;
            let options = ReportOptions {
                token_symbol: config.token_symbol.clone(),
                window,
                leaderboard_span: config.leaderboard_span,
            };
            let report = build_report(&api, &address, &options).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report, &palette(no_color)));
            }
        }
        Commands::Network { json, no_color } => {
            let token_path = token_store::default_token_path();
            let config = DashboardConfig::load(overrides, token_path.as_deref())?;
            let api = DashboardApiHttp::new(&config)?;
            let network = fetch_network_summary(&api).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&network)?);
            } else {
                println!("{}", render_network(&network, &palette(no_color)));
            }
        }
        Commands::Login { bypass_token } => {
            let bypass_token = match bypass_token.or(overrides.bypass_token) {
                Some(bypass_token) => bypass_token,
                None => Password::new()
                    .with_prompt("bypass token (value of the cf_clearance cookie)")
                    .interact()?,
            };
            if bypass_token.trim().is_empty() {
                return Err(anyhow!("bypass token can't be empty"));
            }

            let path = token_path()?;
            token_store::save_token(&path, &bypass_token)?;
            info!(path = %path.display(), "stored bypass token");
            println!("bypass token stored in {}", path.display());
        }
        Commands::Logout => {
            let path = token_path()?;
            if token_store::clear_token(&path)? {
                println!("removed bypass token from {}", path.display());
            } else {
                println!("no stored bypass token");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    log::init();

    let cli = Cli::parse();
    run_cli(cli).await
}

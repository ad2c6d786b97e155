//! # venue-quote
//!
//! Back-office command line for the venue pricing engine.
//!
//! ## Commands
//! ```text
//! venue-quote quote    --plan BAR --start 2026-04-01T20:00:00Z --end 2026-04-01T21:35:00Z
//! venue-quote settle   --plan VIP_A --start ... --end ... --room --cash 60000
//! venue-quote config   show | init
//! ```
//!
//! Quotes and payments go to stdout (JSON by default); logs go to stderr.
//! Set `RUST_LOG` to change log verbosity.

mod receipt;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use venue_checkout::{CheckoutService, MemoryStore, PricingConfig, TariffHandle, Tender};
use venue_core::validation::parse_timestamp;
use venue_core::{AddOns, Money, PlanId, SessionInput, Visit, VisitStatus};

/// Quote and settle venue sessions.
#[derive(Parser, Debug)]
#[command(name = "venue-quote", version, about, long_about = None)]
struct Cli {
    /// Path to pricing.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a session without recording anything.
    Quote {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Price a session and record its payment.
    Settle {
        #[command(flatten)]
        session: SessionArgs,

        /// Cash handed over, in yen.
        #[arg(long, conflicts_with = "card")]
        cash: Option<i64>,

        /// Pay on the external card terminal.
        #[arg(long)]
        card: bool,

        /// Fail unless the total matches this amount, in yen.
        #[arg(long)]
        expect_total: Option<i64>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Inspect or write the pricing configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Write the house tariff to the config path.
    Init,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// BAR, COUNTER, VIP_A or VIP_B.
    #[arg(long)]
    plan: PlanId,

    /// Session start, RFC 3339.
    #[arg(long)]
    start: String,

    /// Session end, RFC 3339. Defaults to now.
    #[arg(long)]
    end: Option<String>,

    /// Bill the private room.
    #[arg(long)]
    room: bool,

    #[arg(long, default_value_t = 0)]
    nominations: u32,

    #[arg(long, default_value_t = 0)]
    inhouse: u32,

    #[arg(long)]
    house_fee: bool,

    #[arg(long)]
    single_charge: bool,

    /// Drink total, in yen.
    #[arg(long, default_value_t = 0)]
    drinks: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

impl SessionArgs {
    fn to_input(&self) -> Result<SessionInput, Box<dyn std::error::Error>> {
        let start_at = parse_timestamp("start", &self.start)?;
        let end_at = match &self.end {
            Some(raw) => parse_timestamp("end", raw)?,
            None => Utc::now(),
        };
        Ok(SessionInput {
            plan: self.plan,
            start_at,
            end_at,
            add_ons: AddOns {
                use_room: self.room,
                nomination_count: self.nominations,
                inhouse_count: self.inhouse,
                apply_house_fee: self.house_fee,
                apply_single_charge: self.single_charge,
                drink_total: self.drinks,
            },
        })
    }
}

/// Visit id for a one-off settlement run from the terminal.
fn cli_visit_id(input: &SessionInput) -> String {
    format!("cli-{}-{}", input.plan, input.start_at.timestamp())
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,venue=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = PricingConfig::load(cli.config.clone())?;
    debug!(venue = %config.venue.name, "Pricing config loaded");

    match cli.command {
        Commands::Quote { session, format } => {
            let input = session.to_input()?;
            let tariff = TariffHandle::from_tariff(config.tariff.clone())?;
            let quote = tariff.quote(&input)?;

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&quote)?),
                Format::Text => print!("{}", receipt::render_quote(&config.venue.name, &quote)),
            }
        }
        Commands::Settle {
            session,
            cash,
            card,
            expect_total,
            notes,
            format,
        } => {
            let input = session.to_input()?;
            let mut tender = match (cash, card) {
                (Some(yen), false) => Tender::cash(Money::from_yen(yen)),
                (None, true) => Tender::card(),
                _ => return Err("choose exactly one of --cash or --card".into()),
            };
            if let Some(total) = expect_total {
                tender = tender.with_expected_total(Money::from_yen(total));
            }
            if let Some(notes) = notes {
                tender = tender.with_notes(notes);
            }

            let store = Arc::new(MemoryStore::new());
            let id = cli_visit_id(&input);
            store
                .insert_visit(Visit {
                    id: id.clone(),
                    plan: input.plan,
                    start_at: input.start_at,
                    check_out_at: Some(input.end_at),
                    add_ons: input.add_ons,
                    status: VisitStatus::Open,
                })
                .await;

            let tariff = TariffHandle::from_tariff(config.tariff.clone())?;
            let service = CheckoutService::new(tariff, store.clone(), store);
            let payment = service.confirm(&id, input.end_at, tender).await?;
            info!(payment_id = %payment.id, "Settled from command line");

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&payment)?),
                Format::Text => print!("{}", receipt::render_payment(&config.venue.name, &payment)),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => print!("{}", toml::to_string_pretty(&config)?),
            ConfigAction::Init => {
                let path = cli
                    .config
                    .or_else(PricingConfig::default_config_path)
                    .ok_or("no config path available")?;
                PricingConfig::default().save(Some(path.clone()))?;
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

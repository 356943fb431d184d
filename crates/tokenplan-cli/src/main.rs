//! tokenplan
//!
//! Terminal front end for the tokenomics planner. Reports the unlock
//! schedule, valuation metrics and allocation split of a configuration, and
//! edits configurations on disk.
//!
//! Usage:
//!   tokenplan init        --out <path>
//!   tokenplan schedule    [--config <path>] [--json]
//!   tokenplan metrics     [--config <path>] [--json]
//!   tokenplan allocation  [--config <path>]
//!   tokenplan edit        --category <name> --field <field> --value <v> [--out <path>]
//!   tokenplan interactive [--config <path>]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use tokenplan_core::types::PlannerConfiguration;
use tokenplan_presets::{load_configuration, reference_configuration, save_configuration};
use tokenplan_session::{EditField, EditStatus, PlannerSession};

mod render;
mod repl;

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "tokenplan",
    version,
    about = "Tokenomics planner: vesting schedules and valuation checks"
)]
struct Args {
    /// Configuration file (JSON). Defaults to the built-in reference plan.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the total token supply.
    #[arg(long, global = true)]
    supply: Option<f64>,

    /// Override the initial token price (USD).
    #[arg(long, global = true)]
    price: Option<f64>,

    /// TGE calendar date (YYYY-MM-DD), used to label months.
    #[arg(long, global = true)]
    tge_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the reference seven-category configuration to a file.
    Init {
        #[arg(long, default_value = "tokenplan.json")]
        out: PathBuf,
    },

    /// Print the 48-month unlock schedule.
    Schedule {
        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print TGE circulating supply, market cap, FDV and warnings.
    Metrics {
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the allocation split (pie-chart data).
    Allocation,

    /// Apply one field edit and write the resulting configuration.
    Edit {
        #[arg(long)]
        category: String,
        /// percentage, tge, cliff or duration.
        #[arg(long)]
        field: EditField,
        #[arg(long)]
        value: f64,
        /// Output file. Defaults to --config.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Edit a configuration line by line; type `help` for commands.
    Interactive,
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,tokenplan=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_path = args.config.as_deref().map(expand_tilde);
    let overrides = Overrides {
        supply: args.supply,
        price: args.price,
        tge_date: args.tge_date,
    };

    match args.command {
        Command::Init { out } => cmd_init(&expand_tilde(&out)),

        Command::Schedule { json } => {
            let session = open_session(config_path.as_deref(), &overrides)?;
            let view = session.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view.schedule)?);
            } else {
                print!("{}", render::schedule_table(&view));
            }
            Ok(())
        }

        Command::Metrics { json } => {
            let session = open_session(config_path.as_deref(), &overrides)?;
            let view = session.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view.metrics)?);
            } else {
                print!("{}", render::metrics_panel(&view));
            }
            Ok(())
        }

        Command::Allocation => {
            let session = open_session(config_path.as_deref(), &overrides)?;
            print!("{}", render::allocation_table(&session.view()));
            Ok(())
        }

        Command::Edit { category, field, value, out } => {
            let target = match (out, config_path.as_deref()) {
                (Some(out), _) => expand_tilde(&out),
                (None, Some(cfg)) => cfg.to_path_buf(),
                (None, None) => bail!("edit needs --config or --out to know where to write"),
            };
            let mut session = open_session(config_path.as_deref(), &overrides)?;
            match session
                .set_field(&category, field, value)
                .with_context(|| format!("editing {category}.{field}"))?
            {
                EditStatus::Applied => {
                    let config = session.into_config();
                    save_configuration(&target, &config)
                        .with_context(|| format!("writing {}", target.display()))?;
                    println!("Updated {category}.{field} = {value} → {}", target.display());
                }
                EditStatus::Rejected => {
                    println!(
                        "Unchanged: {category}.{field} = {value} would allocate more than 100% \
                         (currently {:.2}%)",
                        session.config().total_percentage()
                    );
                }
            }
            Ok(())
        }

        Command::Interactive => {
            let session = open_session(config_path.as_deref(), &overrides)?;
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            repl::run(session, stdin.lock(), stdout.lock())
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

fn cmd_init(out: &Path) -> anyhow::Result<()> {
    if out.exists() {
        bail!(
            "{} already exists. Delete it first to write a fresh reference plan.",
            out.display()
        );
    }
    save_configuration(out, &reference_configuration())
        .with_context(|| format!("writing {}", out.display()))?;
    println!("Reference configuration written to {}", out.display());
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Global flags that replace values of the loaded configuration.
struct Overrides {
    supply: Option<f64>,
    price: Option<f64>,
    tge_date: Option<NaiveDate>,
}

/// Load the configuration (or the reference plan) and apply CLI overrides.
fn open_session(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<PlannerSession> {
    let config: PlannerConfiguration = match path {
        Some(p) => load_configuration(p)
            .with_context(|| format!("loading configuration from {}", p.display()))?,
        None => {
            info!("no --config given; using the reference configuration");
            reference_configuration()
        }
    };

    let mut session = PlannerSession::new(config);
    if let Some(supply) = overrides.supply {
        session.set_total_supply(supply);
    }
    if let Some(price) = overrides.price {
        session.set_token_price(price);
    }
    if overrides.tge_date.is_some() {
        session.set_tge_date(overrides.tge_date);
    }
    Ok(session)
}

/// Expand a leading `~` to the user's home directory (`HOME` or `USERPROFILE`).
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}

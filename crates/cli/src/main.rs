use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use stock_ledger_core::models::settings::Settings;
use stock_ledger_core::storage::dataset::DatasetLoader;
use stock_ledger_core::storage::selection::FileSelectionStore;
use stock_ledger_core::StockLedger;

#[derive(Parser, Debug)]
#[command(name = "stock-ledger", version, about = "Average-cost ledger summary for a selected month")]
struct Cli {
    /// JSON dataset: {"January": [{date, symbol, type, quantity, price}, ...], ...}
    #[arg(short, long)]
    data: PathBuf,

    /// Month to summarize (defaults to the last selected one)
    #[arg(short, long)]
    month: Option<String>,

    /// File holding the last selected month
    #[arg(long, default_value = ".stock-ledger-state.json")]
    state: PathBuf,

    /// Optional JSON settings file (currency symbol, decimals, default month)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the raw summary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// List the months in the dataset and exit
    #[arg(long)]
    list_months: bool,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("parsing settings from {}", path.display()))?;
    Ok(settings)
}

fn main() -> Result<()> {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "stock_ledger=info,stock_ledger_core=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_ref())?;
    let data = DatasetLoader::from_file(&cli.data)
        .with_context(|| format!("loading dataset from {}", cli.data.display()))?;
    let ledger = StockLedger::with_settings(data, settings)?;
    debug!(?ledger, "ledger ready");

    if cli.list_months {
        for month in ledger.months() {
            println!("{month}");
        }
        return Ok(());
    }

    let mut store = FileSelectionStore::open(&cli.state)
        .with_context(|| format!("opening state file {}", cli.state.display()))?;

    let month = match cli.month {
        Some(month) => month,
        None => match ledger.restore_selection(&store)? {
            Some(month) => month,
            None => bail!("dataset {} contains no months", cli.data.display()),
        },
    };
    info!(month = %month, "summarizing");

    let summary = ledger.select_month(&mut store, &month)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", ledger.render_summary(&summary));
    }

    if summary.has_errors() {
        info!(errors = summary.error_count(), "some sales exceeded held shares");
    }
    Ok(())
}

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add_command, handle_categories_command, handle_summary_command, resolve_range,
    InteractiveSession, SummaryOutput,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::storage::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Record personal expenses and total them by category",
    long_about = "Expense Tracker records expenses in a plain-text file, one per line, \
                  and totals them by category over any date range."
)]
struct Cli {
    /// Expense file to use instead of the configured one
    #[arg(long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// Amount spent (e.g., "3.50")
        amount: String,
        /// Category name (see `expenses categories`)
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Total expenses by category over a date range
    #[command(alias = "report")]
    Summary {
        /// Start date (YYYY-MM-DD), defaults to the first of this month
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        end: Option<String>,
        /// Print the summary as JSON
        #[arg(long, conflicts_with = "output")]
        json: bool,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the expense categories
    Categories,

    /// Enter expenses and view a summary through prompts
    #[command(alias = "i")]
    Interactive,

    /// Create the configuration and data directories
    Init,

    /// Show current configuration and paths
    Config,
}

/// Load settings and open the expense store they point at
///
/// An explicit `--file` replaces the configured expense file.
fn open_store(paths: &TrackerPaths, file: Option<&Path>) -> Result<(Settings, ExpenseStore)> {
    let settings = Settings::load_or_create(paths)?;
    let expense_file = match file {
        Some(path) => path.to_path_buf(),
        None => paths.expense_file(&settings.expense_file),
    };
    Ok((settings, ExpenseStore::new(expense_file)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let paths = TrackerPaths::new()?;
    let file = cli.file.as_deref();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Add {
            name,
            amount,
            category,
            date,
        }) => {
            let (settings, store) = open_store(&paths, file)?;
            if file.is_none() {
                paths.ensure_directories()?;
            }
            handle_add_command(
                &store,
                &settings,
                &name,
                &amount,
                category.as_deref(),
                date.as_deref(),
                today,
            )?;
        }
        Some(Commands::Summary {
            start,
            end,
            json,
            output,
        }) => {
            let (settings, store) = open_store(&paths, file)?;
            let (start_date, end_date) = resolve_range(start.as_deref(), end.as_deref(), today)?;
            let format = match (&output, json) {
                (Some(path), _) => SummaryOutput::Csv(path),
                (None, true) => SummaryOutput::Json,
                (None, false) => SummaryOutput::Terminal,
            };
            handle_summary_command(&store, &settings, start_date, end_date, format)?;
        }
        Some(Commands::Categories) => handle_categories_command(),
        Some(Commands::Interactive) => {
            let (settings, store) = open_store(&paths, file)?;
            if file.is_none() {
                paths.ensure_directories()?;
            }
            let stdin = io::stdin();
            InteractiveSession::new(&store, &settings, stdin.lock(), io::stdout(), today).run()?;
        }
        Some(Commands::Init) => {
            let (settings, store) = open_store(&paths, file)?;
            println!("Initializing Expense Tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!("Expenses will be recorded in: {}", store.path().display());
        }
        Some(Commands::Config) => {
            let (settings, store) = open_store(&paths, file)?;
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Expense file:     {}", store.path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Default category: {}", settings.default_category);
        }
        None => {
            println!("Expense Tracker - record expenses and total them by category");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses interactive' to enter expenses through prompts.");
        }
    }

    Ok(())
}

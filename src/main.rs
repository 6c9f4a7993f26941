use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_report::cli::{handle_category, handle_export, handle_list, handle_summary, SummaryFormat};
use expense_report::config::{init_tracing, ExpensePaths, Settings};

#[derive(Parser)]
#[command(
    name = "expense-report",
    version,
    about = "Expense statistics and spreadsheet reports",
    long_about = "Computes statistics over a file of expense records (JSON or CSV) \
                  and exports them as a multi-sheet xlsx report with charts."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show aggregate statistics and the category breakdown
    #[command(alias = "stats")]
    Summary {
        /// Expenses file (.json or .csv)
        input: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: SummaryFormat,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show statistics for a single category
    Category {
        /// Expenses file (.json or .csv)
        input: PathBuf,
        /// Category name (case-sensitive)
        name: String,
    },

    /// List expenses, most recent first
    List {
        /// Expenses file (.json or .csv)
        input: PathBuf,
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export the spreadsheet report
    Export {
        /// Expenses file (.json or .csv)
        input: PathBuf,
        /// Directory for the report (defaults to the configured export directory)
        #[arg(short, long, env = "EXPENSE_REPORT_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Create the base directory and write the settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter);

    match cli.command {
        Some(Commands::Summary {
            input,
            format,
            pretty,
        }) => handle_summary(&input, format, pretty)?,
        Some(Commands::Category { input, name }) => handle_category(&input, &name)?,
        Some(Commands::List {
            input,
            category,
            offset,
            limit,
        }) => handle_list(&input, category.as_deref(), offset, limit, &settings)?,
        Some(Commands::Export { input, output_dir }) => {
            handle_export(&input, output_dir, &paths, &settings)?;
        }
        Some(Commands::Init) => {
            println!("Initializing expense-report at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("expense-report Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Export directory: {}",
                settings.resolve_export_dir(&paths).display()
            );
            println!();
            println!("Settings:");
            println!("  Date format: {}", settings.date_format);
            println!("  Log filter:  {}", settings.log_filter);
        }
        None => {
            println!("expense-report - expense statistics and spreadsheet reports");
            println!();
            println!("Run 'expense-report --help' for usage information.");
        }
    }

    Ok(())
}

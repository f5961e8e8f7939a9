use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gtd::config::Config;
use gtd::error::Result;
use gtd::ops::selectors;
use gtd::output::Format;
use gtd::store::FileStore;

#[derive(Parser)]
#[command(name = "gtd", version, about = "Single-file task tracker")]
struct Cli {
    /// Task file (default: $GTD_FILE, then ./tasks.txt)
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks that are not done
    #[command(alias = "pending")]
    Todo,
    /// List tasks due today
    Today,
    /// List every task
    All,
    /// Display a single task
    Show {
        /// Task number
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Add a new task
    Add {
        /// What needs doing
        description: String,
        /// Due date (YYYY-MM-DD)
        due: String,
    },
    /// Mark a task done
    Tick {
        /// Task number
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Mark a task not done
    Untick {
        /// Task number
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Read tab-separated commands from stdin until `q` or `quit`
    Repl,
}

fn run(command: Commands, store: &FileStore, format: Format) -> Result<()> {
    match command {
        Commands::Todo => gtd::commands::list::run(store, selectors::pending, format),
        Commands::Today => gtd::commands::list::run(store, selectors::due_today, format),
        Commands::All => gtd::commands::list::run(store, selectors::all, format),
        Commands::Show { id } => gtd::commands::show::run(store, &id, format),
        Commands::Add { description, due } => {
            gtd::commands::create::run(store, &description, &due, format)
        }
        Commands::Tick { id } => gtd::commands::lifecycle::tick(store, &id, format),
        Commands::Untick { id } => gtd::commands::lifecycle::untick(store, &id, format),
        Commands::Repl => {
            let stdin = std::io::stdin();
            gtd::commands::repl::run(store, stdin.lock(), std::io::stdout())
        }
    }
}

fn main() {
    gtd::logging::init_tracing();

    let cli = Cli::parse();
    let format = cli.format;
    let config = Config::resolve(cli.file);
    let store = FileStore::new(config.tasks_file);

    if let Err(e) = run(cli.command, &store, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

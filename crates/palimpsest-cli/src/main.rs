use anyhow::Result;
use clap::Parser;
use palimpsest_etl::ClmetFormat;
use std::path::PathBuf;

mod commands;

use commands::CorpusName;

#[derive(Debug, Parser)]
#[command(name = "palimpsest", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Extract one corpus and write its records as JSON lines
    ///
    /// Locates the raw files of the corpus, parses each one into a normalized
    /// record and writes one object per line:
    ///
    ///     {"key": "...", "record": {...}}
    ///
    /// Units that cannot be parsed are logged and skipped. Missing inputs
    /// (corpus directory, main table, cross-reference table) abort the run
    /// before anything is written.
    ///
    /// The corpus is read from <data_dir>/<corpus> unless --data-dir points
    /// at the corpus directory itself.
    Build {
        /// Which corpus to extract
        corpus: CorpusName,

        /// Directory holding this corpus's extracted files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// CLMET rendering: plain, pos or class
        #[arg(long, default_value = "plain")]
        variant: ClmetFormat,

        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Rows read per chunk from delimited tables
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// List the available corpora
    Corpora,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the config file path
    Path,
    /// Show the current effective configuration
    Show,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            corpus,
            data_dir,
            variant,
            output,
            chunk_size,
        } => {
            commands::run_build(corpus, data_dir, variant, output, chunk_size)?;
        }
        Commands::Corpora => commands::list_corpora(),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Show => commands::config::show_config()?,
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}

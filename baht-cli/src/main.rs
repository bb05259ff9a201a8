use anyhow::{Context, Result, bail};
use baht_ingest::{
    DocumentSource, ExtractorRegistry, PdfTextExtractor, StatementParser, TextExtractor, classify,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

mod config;
mod logging;
mod output;
mod prompt;
mod state;

use config::{OutputFormat, load_config};
use prompt::CliPasswords;

#[derive(Parser, Debug)]
#[command(
    name = "baht",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BAHT_BUILD_SHA"), ")"),
    about = "Turn Thai bank statement PDFs into transactions"
)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement PDF and print its transactions
    Parse {
        /// Statement PDF
        file: PathBuf,

        /// Password candidate (repeatable, tried in order)
        #[arg(long = "password", value_name = "PASSWORD")]
        passwords: Vec<String>,

        /// Output format (default from config, else table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Never ask for a password on the terminal
        #[arg(long)]
        no_prompt: bool,
    },

    /// Show which bank and statement type a PDF is detected as
    Classify {
        file: PathBuf,

        #[arg(long = "password", value_name = "PASSWORD")]
        passwords: Vec<String>,

        #[arg(long)]
        no_prompt: bool,
    },

    /// List the supported bank/statement formats
    Formats,

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.baht/config.toml
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    match cli.command {
        Command::Parse {
            file,
            passwords,
            format,
            no_prompt,
        } => {
            let cfg = load_config()?;
            let source = document(&file)?;
            let resolver = CliPasswords::new(passwords, &cfg.passwords, !no_prompt);

            let txns = StatementParser::default()
                .parse_statement(&PdfTextExtractor::new(), &source, &resolver)
                .await
                .with_context(|| format!("parsing {}", file.display()))?;

            let format = format.unwrap_or(cfg.output.format);
            print!("{}", output::render(&txns, format)?);
            if format == OutputFormat::Json {
                println!();
            }
        }

        Command::Classify {
            file,
            passwords,
            no_prompt,
        } => {
            let cfg = load_config()?;
            let source = document(&file)?;
            let resolver = CliPasswords::new(passwords, &cfg.passwords, !no_prompt);

            let chunks = PdfTextExtractor::new()
                .extract_chunks(&source, &resolver)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            debug!(pages = chunks.pages().len(), "extracted text");

            let c = classify(&chunks.flatten());
            println!("bank:      {}", c.bank);
            println!("type:      {}", c.statement_type);
            println!("matched:   {}", if c.bank_matched { "yes" } else { "no (default bank)" });
            match ExtractorRegistry::builtin().resolve(c.bank, c.statement_type) {
                Ok(extractor) => println!("extractor: {}", extractor),
                Err(e) => println!("extractor: none ({})", e),
            }
        }

        Command::Formats => {
            for (bank, statement_type, extractor) in ExtractorRegistry::builtin().entries() {
                println!("{:<10} {:<8} {}", bank, statement_type, extractor);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn document(path: &Path) -> Result<DocumentSource> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    Ok(DocumentSource::Path(path.to_path_buf()))
}

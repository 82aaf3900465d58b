//! oxide-mysql CLI
//!
//! Command-line tool for checking, formatting and inspecting MySQL scripts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_mysql_cli::{
    ast_json, check, format_script, parser_options, read_input, statement_kinds, CliError,
};

/// Parse, format and inspect MySQL scripts.
#[derive(Parser)]
#[command(name = "oxide-mysql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session sql_mode, e.g. "ANSI_QUOTES,PIPES_AS_CONCAT" or "ANSI".
    #[arg(long, env = "MYSQL_SQL_MODE")]
    sql_mode: Option<String>,

    /// Server version used for /*!NNNNN ... */ comments, e.g. 8.0.32.
    #[arg(long, env = "MYSQL_SERVER_VERSION")]
    server_version: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report every syntax error in a script.
    Check {
        /// SQL file, or `-` for stdin.
        input: PathBuf,
    },

    /// Print the statements as JSON.
    Ast {
        /// SQL file, or `-` for stdin.
        input: PathBuf,
    },

    /// Print the statements in canonical form.
    Format {
        /// SQL file, or `-` for stdin.
        input: PathBuf,
    },

    /// Print the kind of each statement without parsing it.
    Kind {
        /// SQL file, or `-` for stdin.
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = parser_options(cli.sql_mode.as_deref(), cli.server_version.as_deref())?;

    match cli.command {
        Commands::Check { input } => {
            let source = read_input(&input)?;
            let report = check(&source, options);
            for diagnostic in &report.diagnostics {
                println!("{diagnostic}\n");
            }
            if !report.is_ok() {
                return Err(CliError::Invalid {
                    count: report.diagnostics.len(),
                }
                .into());
            }
            info!("{}: {} statement(s) OK", input.display(), report.statements);
        }

        Commands::Ast { input } => {
            let source = read_input(&input)?;
            println!("{}", ast_json(&source, options)?);
        }

        Commands::Format { input } => {
            let source = read_input(&input)?;
            print!("{}", format_script(&source, options)?);
        }

        Commands::Kind { input } => {
            let source = read_input(&input)?;
            for statement in statement_kinds(&source, options) {
                println!("{}\t{:?}", statement.location, statement.kind);
            }
        }
    }

    Ok(())
}

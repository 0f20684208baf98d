//! careerfit CLI — runs and scores career-fit assessments.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod render;

#[derive(Parser)]
#[command(name = "careerfit", version, about = "Career-fit assessment runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Catalog TOML file (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the report when the assessment is complete
        #[arg(long)]
        save: bool,

        /// Output directory for saved reports (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Saved report format: json, markdown, all (overrides config)
        #[arg(long)]
        format: Option<String>,
    },

    /// Score an answer sheet without prompting
    Score {
        /// Answer sheet (.json object or TOML [answers] table)
        #[arg(long)]
        answers: PathBuf,

        /// Catalog TOML file (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Render a saved report
    Show {
        /// Report JSON
        #[arg(long)]
        report: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,

        /// Exit code 1 if any warnings are found
        #[arg(long)]
        strict: bool,
    },

    /// List catalog questions
    Questions {
        /// Catalog TOML file (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only list one section: psychometric, technical, wiscar
        #[arg(long)]
        section: Option<String>,
    },

    /// Create starter config and catalog files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("careerfit=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            catalog,
            config,
            save,
            output,
            format,
        } => commands::take::execute(catalog, config, save, output, format),
        Commands::Score {
            answers,
            catalog,
            config,
            format,
        } => commands::score::execute(answers, catalog, config, format),
        Commands::Show { report, format } => commands::show::execute(report, format),
        Commands::Validate { catalog, strict } => commands::validate::execute(catalog, strict),
        Commands::Questions { catalog, section } => commands::questions::execute(catalog, section),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use studyplan::config::parse_date;
use studyplan::placeholder::{self, Values};
use studyplan::plan::token_for;
use studyplan::{Created, Format, GeneratorConfig, generate};

#[derive(Parser)]
#[command(name = "studyplan", about = "Proposed Plan of Study template generator")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the template as .docx, or .rtf if that fails
    Generate {
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output directory (overrides STUDYPLAN_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// auto, docx or rtf (overrides STUDYPLAN_FORMAT)
        #[arg(long)]
        format: Option<String>,
        /// Date printed under the title, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// List the placeholder tokens left in a .docx or .rtf file
    Placeholders {
        /// Generated template
        file: PathBuf,
    },
    /// Replace placeholder tokens with values from a YAML file
    Fill {
        /// Generated template
        file: PathBuf,
        /// YAML mapping of token names to values
        #[arg(long)]
        values: PathBuf,
        /// Where to write the filled copy
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Generate {
            config,
            output_dir,
            format,
            date,
        } => {
            let mut config = match config {
                Some(path) => GeneratorConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => GeneratorConfig::default(),
            }
            .with_env()
            .context("applying environment overrides")?;

            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            if let Some(format) = format {
                config.format = format
                    .parse::<Format>()
                    .with_context(|| format!("invalid --format: {format}"))?;
            }
            if let Some(date) = date {
                config.generated_on =
                    Some(parse_date(&date).with_context(|| format!("invalid --date: {date}"))?);
            }

            match generate(&config).context("generating template")? {
                Created::Docx { path } => println!("Created: {}", path.display()),
                Created::Rtf { path, reason } => {
                    match reason {
                        Some(reason) => println!("Created RTF fallback: {} ({})", path.display(), reason),
                        None => println!("Created: {}", path.display()),
                    }
                },
            }
        },
        Commands::Placeholders { file } => {
            let tokens = placeholder::extract(&file)
                .with_context(|| format!("reading placeholders from {}", file.display()))?;
            for name in tokens {
                println!("{}", token_for(&name));
            }
        },
        Commands::Fill {
            file,
            values,
            output,
        } => {
            let values = Values::load(&values)
                .with_context(|| format!("loading values {}", values.display()))?;
            let report = placeholder::fill(&file, &output, &values)
                .with_context(|| format!("filling {}", file.display()))?;

            println!(
                "Wrote {} ({} replacements)",
                output.display(),
                report.replaced
            );
            if !report.unfilled.is_empty() {
                println!("Unfilled: {}", report.unfilled.join(", "));
            }
        },
    }

    Ok(())
}

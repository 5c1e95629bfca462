//! `sentiment`: score text files and web pages against word lexicons.
//!
//! Run without a subcommand for the interactive menu.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use sentiment_core::report::format_score;
use sentiment_core::{
    KeyNormalization, LexiconLoad, ReportFormat, ReportTarget, ScoringPolicy, Session, Settings,
    Source,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(about = "Lexicon-based sentiment scoring for text files and URLs")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: SettingsArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SettingsArgs {
    /// Seconds allowed for reading a single file or URL
    #[arg(long, env = "SENTIMENT_FETCH_TIMEOUT", default_value_t = 30, global = true)]
    fetch_timeout: u64,

    /// Seconds allowed for a whole lexicon load
    #[arg(long, env = "SENTIMENT_LOAD_TIMEOUT", default_value_t = 60, global = true)]
    load_timeout: u64,

    /// Which tokens count towards the average: `presence` or `nonzero`
    #[arg(long, env = "SENTIMENT_POLICY", default_value = "presence", global = true)]
    policy: ScoringPolicy,

    /// Keep lexicon words exactly as written instead of lower-casing them
    #[arg(long, global = true)]
    case_sensitive: bool,
}

impl SettingsArgs {
    fn into_settings(self) -> Settings {
        Settings {
            fetch_timeout: Duration::from_secs(self.fetch_timeout),
            load_timeout: Duration::from_secs(self.load_timeout),
            normalization: if self.case_sensitive {
                KeyNormalization::AsStored
            } else {
                KeyNormalization::Lowercase
            },
            policy: self.policy,
            ..Settings::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score a text file or URL and print or write the report
    Analyze {
        /// Lexicon file or URL (`word,value` per line); repeat to merge several
        #[arg(short, long = "lexicon", required = true)]
        lexicons: Vec<String>,

        /// Text file or URL to analyze
        #[arg(short, long)]
        text: String,

        /// Write the report to this file instead of stdout
        #[arg(short, long, env = "SENTIMENT_OUTPUT")]
        output: Option<PathBuf>,

        /// Report format: text, json or yaml
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sentiment=info,sentiment_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut session = Session::new(cli.settings.into_settings());

    match cli.command {
        Some(Commands::Analyze {
            lexicons,
            text,
            output,
            format,
        }) => cmd_analyze(&mut session, lexicons, &text, output, format).await,
        None => interactive_menu(&mut session).await,
    }
}

async fn cmd_analyze(
    session: &mut Session,
    lexicons: Vec<String>,
    text: &str,
    output: Option<PathBuf>,
    format: ReportFormat,
) -> Result<()> {
    for lexicon in lexicons {
        let load = session.load_lexicon(Source::parse(&lexicon)).await?;
        print_skipped(&load);
    }

    session.load_text(&Source::parse(text)).await?;
    session.set_output(output.map_or(ReportTarget::Stdout, ReportTarget::File));

    let report = session.execute(format)?;
    info!(score = report.score(), "Analysis complete");
    Ok(())
}

fn print_skipped(load: &LexiconLoad) {
    for line in &load.skipped {
        eprintln!("{:?}", miette::Report::new(line.clone()));
    }
}

async fn interactive_menu(session: &mut Session) -> Result<()> {
    let theme = ColorfulTheme::default();
    let items = vec![
        "Specify a Text File",
        "Specify a URL",
        "Specify an Output File",
        "Configure Lexicons",
        "Execute, Analyse and Report",
        "Quit",
    ];

    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("Sentiment Analyser")
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Full path to the text file")
                    .interact_text()?;
                menu_load_text(session, Source::File(PathBuf::from(path))).await;
            }
            1 => {
                let url: String = Input::with_theme(&theme)
                    .with_prompt("URL")
                    .interact_text()?;
                menu_load_text(session, Source::Url(url)).await;
            }
            2 => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Full path for the output file")
                    .default(session.output().to_string())
                    .interact_text()?;
                session.set_output(ReportTarget::File(PathBuf::from(path)));
                println!("Reports will be written to {}", session.output());
            }
            3 => {
                let location: String = Input::with_theme(&theme)
                    .with_prompt("Lexicon file or URL")
                    .interact_text()?;
                match session.load_lexicon(Source::parse(&location)).await {
                    Ok(load) => {
                        print_skipped(&load);
                        println!(
                            "Lexicon loaded from {location}: {} entries applied, {} lines skipped ({} words total)",
                            load.applied(),
                            load.skipped.len(),
                            session.lexicon().len()
                        );
                    }
                    Err(err) => {
                        warn!("{err}");
                        eprintln!("{:?}", miette::Report::new(err));
                    }
                }
            }
            4 => match session.execute(ReportFormat::Text) {
                Ok(report) => println!(
                    "Average sentiment score {} written to {}",
                    format_score(report.score()),
                    session.output()
                ),
                Err(err) => eprintln!("{:?}", miette::Report::new(err)),
            },
            _ => {
                println!("Quitting the program.");
                break;
            }
        }
    }

    Ok(())
}

async fn menu_load_text(session: &mut Session, source: Source) {
    match session.load_text(&source).await {
        Ok(len) => println!("Loaded {len} bytes of text from {source}"),
        Err(err) => eprintln!("{:?}", miette::Report::new(err)),
    }
}

//! Command-line front end: drives the same pipeline as the upload, list and
//! details screens.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use talentvision_client::jobs::parse_skills_input;
use talentvision_client::{
    CandidateDirectory, CandidateRecord, CandidateView, Config, FsDocumentPicker,
    HttpScoringGateway, MatchContext, PickMode, PickOutcome, UploadSession,
};
use tracing::info;

/// TalentVision - send résumés for match scoring and browse candidates.
#[derive(Debug, Parser)]
#[command(name = "talentvision")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print records as JSON instead of labelled lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Per-request timeout in milliseconds (overrides REQUEST_TIMEOUT_MS)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a PDF résumé and print its analysis
    Upload(UploadArgs),

    /// Browse analysed candidates
    #[command(subcommand)]
    Candidates(CandidatesCommand),
}

#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// Path to the PDF résumé
    pub path: PathBuf,

    /// Target skills, comma-separated (e.g. "React, SQL")
    #[arg(short, long, default_value = "")]
    pub skills: String,

    /// Free-text job description
    #[arg(long, default_value = "")]
    pub job_text: String,

    /// Read the file up front and send it from memory
    #[arg(long)]
    pub inline: bool,
}

#[derive(Debug, Subcommand)]
pub enum CandidatesCommand {
    /// List all candidates
    List,
    /// Show one candidate
    Show {
        /// Candidate id
        id: String,
    },
}

impl Cli {
    pub fn apply(&self, config: Config) -> Config {
        match self.timeout_ms {
            Some(ms) => config.with_timeout(Duration::from_millis(ms)),
            None => config,
        }
    }
}

pub async fn execute(cli: Cli, config: &Config) -> Result<()> {
    let gateway = Arc::new(HttpScoringGateway::new(config)?);
    info!(base_url = %gateway.base_url(), "backend configured");

    match cli.command {
        Command::Upload(args) => {
            let mode = if args.inline { PickMode::Inline } else { PickMode::Locator };
            let picker = FsDocumentPicker::new(Some(args.path)).with_mode(mode);
            let session = UploadSession::new(Arc::new(picker), gateway);

            if session.pick_document().await? == PickOutcome::Cancelled {
                bail!("no document selected");
            }

            let context = MatchContext::new(parse_skills_input(&args.skills), args.job_text);
            let record = session.submit(&context).await?;
            print_record(&record, cli.json)?;
        }
        Command::Candidates(CandidatesCommand::List) => {
            let mut directory = CandidateDirectory::new(gateway);
            directory.load().await?;

            if let Some(empty) = directory.empty_message() {
                println!("{empty}");
            } else if cli.json {
                println!("{}", serde_json::to_string_pretty(directory.candidates())?);
            } else {
                for record in directory.candidates() {
                    let view = CandidateView::from_record(record);
                    let id = record.id.as_deref().unwrap_or("-");
                    let badge = view.match_badge.as_deref().unwrap_or("-");
                    println!("[{}] {}  {}  {}", id, view.name, view.skills, badge);
                }
            }
        }
        Command::Candidates(CandidatesCommand::Show { id }) => {
            let directory = CandidateDirectory::new(gateway);
            let record = directory.details(&id).await?;
            print_record(&record, cli.json)?;
        }
    }

    Ok(())
}

fn print_record(record: &CandidateRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        for line in CandidateView::from_record(record).lines() {
            println!("{line}");
        }
    }
    Ok(())
}

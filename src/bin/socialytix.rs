//! SociaLytix CLI - Command-line interface for the SociaLytix survey bot
//!
//! Commands:
//! - chat: Interactive chat over stdin/stdout
//! - score: Score a completed answer set from JSON
//! - questions: Print the questionnaire
//! - doctor: Diagnose artifact and configuration health

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use socialytix::artifacts::{ScoringArtifacts, ARTIFACT_SCHEMA};
use socialytix::dispatch::ChatBot;
use socialytix::pipeline::ScoringPipeline;
use socialytix::summary::GeminiClient;
use socialytix::survey::QUESTIONS;
use socialytix::{EngineError, BOT_NAME, BOT_VERSION};

/// SociaLytix - Survey chatbot for social-media wellness scoring
#[derive(Parser)]
#[command(name = "socialytix")]
#[command(version = BOT_VERSION)]
#[command(about = "Chat-driven wellness survey and scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the bot over stdin/stdout
    Chat {
        /// Artifact bundle path (JSON)
        #[arg(short, long)]
        artifacts: PathBuf,

        /// Session id to use; defaults to a fresh random id
        #[arg(long)]
        session_id: Option<String>,
    },

    /// Score a completed answer set
    Score {
        /// Artifact bundle path (JSON)
        #[arg(short, long)]
        artifacts: PathBuf,

        /// Answers file: a JSON object of question key to answer (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the questionnaire
    Questions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose artifact and configuration health
    Doctor {
        /// Check an artifact bundle
        #[arg(long)]
        artifacts: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr) // Logs to stderr, not stdout
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), BotCliError> {
    match cli.command {
        Commands::Chat {
            artifacts,
            session_id,
        } => cmd_chat(&artifacts, session_id).await,

        Commands::Score {
            artifacts,
            input,
            json,
        } => cmd_score(&artifacts, &input, json),

        Commands::Questions { json } => cmd_questions(json),

        Commands::Doctor { artifacts, json } => cmd_doctor(artifacts.as_deref(), json),
    }
}

async fn cmd_chat(artifacts_path: &Path, session_id: Option<String>) -> Result<(), BotCliError> {
    let artifacts = ScoringArtifacts::from_file(artifacts_path)?;
    let pipeline = ScoringPipeline::new(Arc::new(artifacts));
    let summarizer = GeminiClient::with_default().map_err(|_| BotCliError::MissingApiKey)?;
    let mut bot = ChatBot::new(pipeline, summarizer);

    let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

    if atty::is(atty::Stream::Stdin) {
        println!("socialytix {} (session {})", BOT_VERSION, session_id);
        println!("Send @start to begin the questionnaire, or just chat. Ctrl-D to leave.");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        for reply in bot.handle_message(&session_id, &line).await {
            writeln!(stdout, "{}", reply)?;
        }
        stdout.flush()?;
    }

    Ok(())
}

fn cmd_score(artifacts_path: &Path, input: &Path, json: bool) -> Result<(), BotCliError> {
    let artifacts = ScoringArtifacts::from_file(artifacts_path)?;
    let pipeline = ScoringPipeline::new(Arc::new(artifacts));

    // Read input
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let answers: HashMap<String, String> = serde_json::from_str(&input_data)?;
    let result = pipeline.score(&answers)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in result.message_lines() {
            println!("{}", line);
        }
    }

    Ok(())
}

fn cmd_questions(json: bool) -> Result<(), BotCliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&QUESTIONS)?);
    } else {
        for (i, question) in QUESTIONS.iter().enumerate() {
            println!("{:2}. [{}] {}", i + 1, question.key, question.prompt);
        }
    }

    Ok(())
}

fn cmd_doctor(artifacts_path: Option<&Path>, json: bool) -> Result<(), BotCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    // Check bot version
    checks.push(DoctorCheck {
        name: "bot_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("SociaLytix version {}", BOT_VERSION),
    });

    // Check artifact schema
    checks.push(DoctorCheck {
        name: "artifact_schema".to_string(),
        status: CheckStatus::Ok,
        message: format!("Artifact schema: {}", ARTIFACT_SCHEMA),
    });

    // Check artifact bundle if provided
    if let Some(path) = artifacts_path {
        if path.exists() {
            match ScoringArtifacts::from_file(path) {
                Ok(artifacts) => {
                    checks.push(DoctorCheck {
                        name: "artifacts".to_string(),
                        status: CheckStatus::Ok,
                        message: format!(
                            "Artifact bundle valid ({} feature columns, {} encoders, {} + {} trees)",
                            artifacts.feature_columns.len(),
                            artifacts.encoders.len(),
                            artifacts.mental_model.tree_count(),
                            artifacts.addiction_model.tree_count()
                        ),
                    });
                }
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "artifacts".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Invalid artifact bundle: {}", e),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "artifacts".to_string(),
                status: CheckStatus::Warning,
                message: "Artifact file does not exist".to_string(),
            });
        }
    }

    // Check Gemini API key
    let key_present = std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("GOOGLE_API_KEY"))
        .map(|v| !v.is_empty())
        .unwrap_or(false);

    let api_key_check = if key_present {
        DoctorCheck {
            name: "api_key".to_string(),
            status: CheckStatus::Ok,
            message: "Gemini API key is set".to_string(),
        }
    } else {
        DoctorCheck {
            name: "api_key".to_string(),
            status: CheckStatus::Warning,
            message: "GEMINI_API_KEY not set (summaries will use the fallback reply)".to_string(),
        }
    };
    checks.push(api_key_check);

    // Check stdin mode
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive chat ready)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (scripted mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: BOT_NAME.to_string(),
        version: BOT_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("SociaLytix Doctor Report");
        println!("========================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(BotCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Error types

#[derive(Debug)]
enum BotCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    MissingApiKey,
    DoctorFailed,
}

impl From<io::Error> for BotCliError {
    fn from(e: io::Error) -> Self {
        BotCliError::Io(e)
    }
}

impl From<EngineError> for BotCliError {
    fn from(e: EngineError) -> Self {
        BotCliError::Engine(e)
    }
}

impl From<serde_json::Error> for BotCliError {
    fn from(e: serde_json::Error) -> Self {
        BotCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BotCliError> for CliError {
    fn from(e: BotCliError) -> Self {
        match e {
            BotCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BotCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'socialytix doctor --artifacts <path>' for details".to_string()),
            },
            BotCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            BotCliError::MissingApiKey => CliError {
                code: "MISSING_API_KEY".to_string(),
                message: "GEMINI_API_KEY is not set".to_string(),
                hint: Some("Set GEMINI_API_KEY or GOOGLE_API_KEY to enable summaries".to_string()),
            },
            BotCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

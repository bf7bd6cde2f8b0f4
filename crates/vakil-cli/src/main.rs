use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vakil_ai::{DraftClient, build_prompt};
use vakil_core::{DraftRequest, FieldKind, Language, PetitionCategory, STEP_LABELS, fields_for};
use vakil_session::{Session, SessionError};
use vakil_wizard::{StepErrors, WizardState};

#[derive(Parser)]
#[command(
    name = "vakil",
    version,
    about = "Compose and generate Indian court petition drafts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the conditional fields collected for a petition category.
    Fields { category: PetitionCategory },
    /// List the wizard steps in order.
    Steps,
    /// Render the exact generation instructions for a saved draft without
    /// calling the service.
    Prompt {
        /// JSON draft request file.
        input: PathBuf,
        #[arg(long, default_value = "en")]
        language: Language,
    },
    /// Run a saved draft through the full pipeline against the drafting
    /// service.
    Generate {
        /// JSON draft request file.
        input: PathBuf,
        #[arg(long, default_value = "en")]
        language: Language,
        /// Base URL of the drafting service.
        #[arg(long, env = "VAKIL_SERVICE_URL", default_value = "http://localhost:5000")]
        service_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("vakil v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Fields { category } => print_fields(category),
        Command::Steps => print_steps(),
        Command::Prompt { input, language } => {
            let request = freeze(load_draft(&input)?)?;
            let prompt = build_prompt(&request, language)?;
            println!("{prompt}");
        }
        Command::Generate {
            input,
            language,
            service_url,
        } => generate(&input, language, service_url).await?,
    }
    Ok(())
}

fn load_draft(path: &Path) -> anyhow::Result<DraftRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing draft request from {}", path.display()))
}

/// Validate a saved draft through the wizard and freeze it.
fn freeze(draft: DraftRequest) -> anyhow::Result<DraftRequest> {
    let mut wizard = WizardState::resume(draft);
    wizard.submit().map_err(render_step_errors)
}

fn render_step_errors(errors: StepErrors) -> anyhow::Error {
    let detail: Vec<String> = errors
        .errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect();
    anyhow::anyhow!(
        "draft incomplete at the {} step: {}",
        errors.step,
        detail.join("; ")
    )
}

async fn generate(input: &Path, language: Language, service_url: String) -> anyhow::Result<()> {
    let draft = load_draft(input)?;
    let mut session = Session::new(language);
    session.start_with(WizardState::resume(draft));

    let client = DraftClient::new(service_url);
    match session.generate(&client).await {
        Ok(()) => {}
        Err(SessionError::Invalid(errors)) => return Err(render_step_errors(errors)),
        Err(other) => return Err(other.into()),
    }

    match session.document() {
        Some(document) => {
            println!("{document}");
            Ok(())
        }
        None => {
            let cause = session.last_error().unwrap_or("unknown failure");
            anyhow::bail!("generation failed: {cause} (input preserved; rerun to retry)")
        }
    }
}

fn print_fields(category: PetitionCategory) {
    let fields = fields_for(category);
    if fields.is_empty() {
        println!("{category}: no category-specific fields");
        return;
    }
    println!("{category}:");
    for spec in fields {
        let kind = match spec.kind {
            FieldKind::Text => "text".to_string(),
            FieldKind::Date => "date (YYYY-MM-DD)".to_string(),
            FieldKind::Choice(values) => format!("one of {}", values.join(" | ")),
        };
        let required = if spec.required { "required" } else { "optional" };
        println!("  {:<22} {}  [{kind}, {required}]", spec.name, spec.label);
    }
}

fn print_steps() {
    for (i, label) in STEP_LABELS.iter().enumerate() {
        println!("{}. {label}", i + 1);
    }
}

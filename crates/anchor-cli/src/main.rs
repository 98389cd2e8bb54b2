mod wizard;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anchor_form::{
    CompositeRequest, FieldValue, FormConfig, FormOrchestrator, MessageTemplates, RenderField,
    SectionPatch, Step, StepError, SubmitOutcome, Submitter, build_messaging_link,
    build_step_payload, request_schema, validate_all,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wizard::{
    AnswerParseError, ConsoleNotifier, PromptContext, RenderMode, Verbosity, WizardPresenter,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const CLEAR_ANSWER: &str = "-";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Anchor service request form",
    long_about = "Collects an anchor booking request step by step, submits it to the configured relay and prints a messaging link"
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Settings {
    /// Relay endpoint receiving submitted requests.
    #[arg(long, global = true, env = "ANCHOR_RELAY_ENDPOINT", value_name = "URL")]
    relay_endpoint: Option<String>,
    /// Host of the messaging deep link.
    #[arg(long, global = true, env = "ANCHOR_MESSAGING_HOST", value_name = "HOST")]
    messaging_host: Option<String>,
    /// Recipient id appended to the messaging deep link.
    #[arg(long, global = true, env = "ANCHOR_MESSAGING_RECIPIENT", value_name = "ID")]
    messaging_recipient: Option<String>,
}

impl Settings {
    fn config(&self) -> CliResult<FormConfig> {
        Ok(FormConfig::from_parts(
            self.relay_endpoint.as_deref(),
            self.messaging_host.as_deref(),
            self.messaging_recipient.as_deref(),
        )?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Fill in the request step by step and submit it.
    Wizard {
        /// Optional JSON file with a partially filled request.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Show verbose output (progress markers, current values, request JSON).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Render output mode for each step.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
    /// Validate every step of a request file.
    Validate {
        /// Path to the request JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Walk a request file through every step and submit it to the relay.
    Submit {
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the messaging deep link for a request file.
    Link {
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the JSON schema of a request file.
    Schema,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum WizardAction {
    Next,
    Previous,
    Submit,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = cli.settings.config()?;
    match cli.command {
        Command::Wizard {
            answers,
            verbose,
            format,
        } => run_wizard(&config, answers, verbose, format).await,
        Command::Validate { answers } => run_validate(&answers),
        Command::Submit { answers } => run_submit(&config, &answers).await,
        Command::Link { answers } => run_link(&config, &answers),
        Command::Schema => run_schema(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_request(path: &Path) -> CliResult<CompositeRequest> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    Ok(serde_json::from_str(&contents)?)
}

async fn run_wizard(
    config: &FormConfig,
    answers_path: Option<PathBuf>,
    verbose: bool,
    format: RenderMode,
) -> CliResult<()> {
    let request = match answers_path {
        Some(path) => load_request(&path)?,
        None => CompositeRequest::default(),
    };
    let submitter = Submitter::from_config(config)?;
    let mut form = FormOrchestrator::with_request(request, ConsoleNotifier);
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose), format);
    presenter.show_header();

    loop {
        let payload = build_step_payload(&form);
        presenter.show_step(&payload);

        let total = payload.fields.len();
        for (index, field) in payload.fields.iter().enumerate() {
            let prompt = PromptContext::new(field, index + 1, total);
            if let Some(value) = prompt_field(&prompt, field, &presenter)? {
                form.change(SectionPatch::field(payload.step, field.id, value)?);
            }
        }

        match prompt_action(payload.step)? {
            WizardAction::Next => match form.next() {
                Ok(step) => debug!(step = step.number(), "advanced"),
                Err(StepError::Invalid(errors)) => presenter.show_step_errors(&errors),
                Err(err) => return Err(err.into()),
            },
            WizardAction::Previous => {
                form.previous()?;
            }
            WizardAction::Submit => match form.submit(&submitter).await {
                SubmitOutcome::Completed(request) => {
                    if let Some(view) = form.result_view(&submitter) {
                        presenter.show_completion(&view, &request);
                    }
                    return Ok(());
                }
                SubmitOutcome::Failed(_) => {}
                SubmitOutcome::Ignored(reason) => {
                    return Err(format!("submit ignored: {:?}", reason).into());
                }
            },
        }
    }
}

fn run_validate(answers_path: &Path) -> CliResult<()> {
    let request = load_request(answers_path)?;
    let errors = validate_all(&request);
    println!(
        "Validation result: {}",
        if errors.is_empty() { "valid" } else { "invalid" }
    );
    for (step, fields) in &errors {
        println!("Step {}:", step);
        for (field, message) in fields {
            println!("  - {}: {}", field, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

async fn run_submit(config: &FormConfig, answers_path: &Path) -> CliResult<()> {
    let request = load_request(answers_path)?;
    let submitter = Submitter::from_config(config)?;
    let mut form = FormOrchestrator::with_request(request, ConsoleNotifier);

    while !form.current_step().is_last() {
        match form.next() {
            Ok(_) => {}
            Err(StepError::Invalid(errors)) => {
                eprintln!("Step {} is incomplete:", form.current_step());
                for (field, message) in &errors {
                    eprintln!("  - {}: {}", field, message);
                }
                return Err("request is incomplete".into());
            }
            Err(err) => return Err(err.into()),
        }
    }

    match form.submit(&submitter).await {
        SubmitOutcome::Completed(request) => {
            if let Some(view) = form.result_view(&submitter) {
                WizardPresenter::new(Verbosity::Clean, RenderMode::Text)
                    .show_completion(&view, &request);
            }
            Ok(())
        }
        SubmitOutcome::Failed(err) => Err(format!("submission failed: {}", err).into()),
        SubmitOutcome::Ignored(reason) => Err(format!("submit ignored: {:?}", reason).into()),
    }
}

fn run_link(config: &FormConfig, answers_path: &Path) -> CliResult<()> {
    let request = load_request(answers_path)?;
    let templates = MessageTemplates::new()?;
    let link = build_messaging_link(&config.messaging, &templates, &request)?;
    println!("{}", link);
    Ok(())
}

fn run_schema() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&request_schema())?);
    Ok(())
}

/// Reads one line; a closed stdin aborts the wizard.
fn prompt_line(prompt: &str) -> CliResult<String> {
    print!("{}: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err("input closed; wizard aborted".into());
    }
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        return Err("wizard aborted by user".into());
    }
    Ok(trimmed.to_string())
}

fn prompt_field(
    prompt: &PromptContext,
    field: &RenderField,
    presenter: &WizardPresenter,
) -> CliResult<Option<FieldValue>> {
    loop {
        presenter.show_prompt(prompt);
        let input = prompt_line(">")?;
        match parse_answer(field, &input) {
            Ok(value) => return Ok(value),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn prompt_action(step: Step) -> CliResult<WizardAction> {
    let prompt = if step.is_last() {
        "[s]ubmit/[p]revious"
    } else if step.is_first() {
        "[n]ext"
    } else {
        "[n]ext/[p]revious"
    };
    loop {
        let input = prompt_line(prompt)?;
        match parse_action(step, &input) {
            Some(action) => return Ok(action),
            None => println!("Unknown action '{}'.", input),
        }
    }
}

/// Blank input keeps the current value (`None`); `-` clears an optional field.
fn parse_answer(field: &RenderField, raw: &str) -> Result<Option<FieldValue>, AnswerParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if raw == CLEAR_ANSWER {
        if field.required {
            return Err(AnswerParseError::new(
                format!("{} is required and cannot be cleared.", field.label),
                None,
            ));
        }
        let cleared = if field.kind.is_list() {
            FieldValue::List(Vec::new())
        } else {
            FieldValue::Text(String::new())
        };
        return Ok(Some(cleared));
    }
    if field.choices.is_empty() {
        return Ok(Some(FieldValue::Text(raw.to_string())));
    }
    if field.kind.is_list() {
        let selected = raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| parse_choice(field.choices, item))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Some(FieldValue::List(selected)));
    }
    parse_choice(field.choices, raw).map(|choice| Some(FieldValue::Text(choice)))
}

fn parse_choice(choices: &[&str], raw: &str) -> Result<String, AnswerParseError> {
    if let Ok(number) = raw.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| choices.get(index))
            .map(|choice| choice.to_string())
            .ok_or_else(|| {
                AnswerParseError::new(
                    format!("Choose a number between 1 and {}.", choices.len()),
                    Some(format!("got {}", number)),
                )
            });
    }
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(raw))
        .map(|choice| choice.to_string())
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("'{}' is not one of the listed options.", raw),
                Some(format!("allowed values: {}", choices.join(", "))),
            )
        })
}

/// Blank input moves forward.
fn parse_action(step: Step, raw: &str) -> Option<WizardAction> {
    match raw.trim().to_lowercase().as_str() {
        "" if step.is_last() => Some(WizardAction::Submit),
        "" => Some(WizardAction::Next),
        "s" | "submit" if step.is_last() => Some(WizardAction::Submit),
        "n" | "next" if !step.is_last() => Some(WizardAction::Next),
        "p" | "previous" if !step.is_first() => Some(WizardAction::Previous),
        _ => None,
    }
}

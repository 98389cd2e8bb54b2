use anchor_form::{
    CompositeRequest, FieldErrors, FieldKind, Notifier, RenderField, ResultView, StepPayload,
    TracingNotifier, render_json_ui, render_text,
};
use clap::ValueEnum;

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: step heading and field prompts only.
    Clean,
    /// Verbose output: progress markers, current values, final request JSON.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    Text,
    Json,
}

/// Prints notifications to the terminal and forwards them to the log.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        TracingNotifier.success(message);
        println!("✔ {}", message);
    }

    fn error(&self, message: &str) {
        TracingNotifier.error(message);
        eprintln!("✖ {}", message);
    }
}

/// Prints step screens, prompts and the final result.
pub struct WizardPresenter {
    verbosity: Verbosity,
    mode: RenderMode,
    header_printed: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity, mode: RenderMode) -> Self {
        Self {
            verbosity,
            mode,
            header_printed: false,
        }
    }

    pub fn show_header(&mut self) {
        if self.header_printed {
            return;
        }
        println!("Anchor Service Request");
        println!("Type 'exit' at any prompt to abort.");
        self.header_printed = true;
    }

    pub fn show_step(&self, payload: &StepPayload) {
        match self.mode {
            RenderMode::Json => match serde_json::to_string_pretty(&render_json_ui(payload)) {
                Ok(json) => println!("JSON UI:\n{}", json),
                Err(err) => eprintln!("Failed to serialize step to JSON: {}", err),
            },
            RenderMode::Text if self.verbosity.is_verbose() => {
                println!();
                println!("{}", render_text(payload));
            }
            RenderMode::Text => {
                println!();
                println!("{}", payload.step);
                println!("{}", payload.step.intro());
                for field in &payload.fields {
                    if let Some(error) = &field.error {
                        println!("  ! {}: {}", field.label, error);
                    }
                }
            }
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}/{} {}", prompt.index, prompt.total, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(placeholder) = prompt.placeholder {
            println!("  e.g. {}", placeholder);
        }
        for (index, choice) in prompt.choices.iter().enumerate() {
            println!("  {}. {}", index + 1, choice);
        }
        if let Some(current) = &prompt.current {
            if prompt.required {
                println!("  current: {} (blank keeps it)", current);
            } else {
                println!("  current: {} (blank keeps it, - clears it)", current);
            }
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_step_errors(&self, errors: &FieldErrors) {
        for (field, message) in errors {
            eprintln!("  - {}: {}", field, message);
        }
    }

    pub fn show_completion(&self, view: &ResultView, request: &CompositeRequest) {
        println!();
        println!("{}", view.render_text());
        if view.messaging_link.is_none() {
            eprintln!("Warning: the messaging link could not be built; check the messaging host.");
        }
        if self.verbosity.is_verbose() {
            match serde_json::to_string_pretty(request) {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => eprintln!("Failed to serialize request to JSON: {}", err),
            }
        }
    }
}

/// Context used to format a single field prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    pub hint: Option<&'static str>,
    pub choices: &'static [&'static str],
    pub current: Option<String>,
}

impl PromptContext {
    pub fn new(field: &RenderField, index: usize, total: usize) -> Self {
        Self {
            index,
            total,
            label: field.label,
            placeholder: field.placeholder,
            required: field.required,
            hint: kind_hint(field.kind),
            choices: field.choices,
            current: field.current_value.as_ref().map(|value| value.display()),
        }
    }
}

fn kind_hint(kind: FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Email => Some("(email)"),
        FieldKind::Phone => Some("(digits, spaces, + - and parentheses)"),
        FieldKind::Date => Some("(YYYY-MM-DD)"),
        FieldKind::Time => Some("(HH:MM)"),
        FieldKind::Choice => Some("(number or label)"),
        FieldKind::MultiChoice => Some("(comma-separated numbers or labels)"),
        FieldKind::Text | FieldKind::LongText => None,
    }
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

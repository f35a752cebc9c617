use crate::ports::outbound::ProgressReporter;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::sync::{Arc, Mutex};

const MASK: &str = "***";

/// Where and how messages are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// GitHub Actions workflow commands on stdout
    WorkflowCommands,
    /// Human-oriented lines on stderr
    Plain { color: bool },
}

impl OutputMode {
    /// Workflow commands when `GITHUB_ACTIONS=true`, plain output otherwise
    pub fn detect() -> Self {
        let on_actions = std::env::var("GITHUB_ACTIONS")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if on_actions {
            OutputMode::WorkflowCommands
        } else {
            OutputMode::Plain {
                color: std::io::stderr().is_terminal(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warning,
    Error,
    Completion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// ActionsConsoleReporter adapter for the user-facing log
///
/// Every message passes through the registered-secret mask before it is
/// written. Cloning shares the secret list.
#[derive(Debug, Clone)]
pub struct ActionsConsoleReporter {
    mode: OutputMode,
    secrets: Arc<Mutex<Vec<String>>>,
}

impl ActionsConsoleReporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            secrets: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_env() -> Self {
        Self::new(OutputMode::detect())
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Replaces every registered secret in `message`
    pub fn mask(&self, message: &str) -> String {
        let secrets = self
            .secrets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        secrets
            .iter()
            .fold(message.to_string(), |text, secret| text.replace(secret.as_str(), MASK))
    }

    fn render(&self, level: Level, message: &str) -> (Stream, String) {
        let message = self.mask(message);
        match self.mode {
            OutputMode::WorkflowCommands => {
                let line = match level {
                    Level::Info | Level::Completion => message,
                    Level::Warning => format!("::warning::{}", escape_data(&message)),
                    Level::Error => format!("::error::{}", escape_data(&message)),
                };
                (Stream::Stdout, line)
            }
            OutputMode::Plain { color } => {
                let line = match (level, color) {
                    (Level::Info, _) => message,
                    (Level::Warning, true) => format!("{} {}", "warning:".yellow().bold(), message),
                    (Level::Warning, false) => format!("warning: {}", message),
                    (Level::Error, true) => format!("{} {}", "error:".red().bold(), message),
                    (Level::Error, false) => format!("error: {}", message),
                    (Level::Completion, true) => format!("\n{} {}", "✅".green(), message.green()),
                    (Level::Completion, false) => format!("\n✅ {}", message),
                };
                (Stream::Stderr, line)
            }
        }
    }

    fn emit(&self, level: Level, message: &str) {
        match self.render(level, message) {
            (Stream::Stdout, line) => println!("{}", line),
            (Stream::Stderr, line) => eprintln!("{}", line),
        }
    }
}

/// Escapes a workflow command payload (`%`, CR and LF)
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl ProgressReporter for ActionsConsoleReporter {
    fn report(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn report_warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    fn report_error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    fn report_completion(&self, message: &str) {
        self.emit(Level::Completion, message);
    }

    fn register_secret(&self, secret: &str) {
        if secret.is_empty() {
            return;
        }
        {
            let mut secrets = self
                .secrets
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if secrets.iter().any(|s| s == secret) {
                return;
            }
            secrets.push(secret.to_string());
            // Longest first so a secret containing another is masked whole
            secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
        }
        if self.mode == OutputMode::WorkflowCommands {
            println!("::add-mask::{}", escape_data(secret));
        }
    }
}

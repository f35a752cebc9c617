use secrecy::SecretString;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A shell command built token by token.
///
/// Flag values are rendered double-quoted. Secret environment variables are
/// carried separately and never appear in [`CommandLine::render`], `Display`
/// or `Debug` output.
pub struct CommandLine {
    tokens: Vec<String>,
    env: BTreeMap<String, String>,
    secret_env: BTreeMap<String, SecretString>,
    search_paths: Vec<PathBuf>,
    current_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            tokens: vec![program.into()],
            env: BTreeMap::new(),
            secret_env: BTreeMap::new(),
            search_paths: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends a bare token (subcommands, separators)
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.tokens.push(token.into());
        self
    }

    /// Appends `--name="value"`
    pub fn flag(mut self, name: &str, value: &str) -> Self {
        self.tokens.push(format!("--{}={}", name, quote(value)));
        self
    }

    /// Appends a quoted positional argument
    pub fn positional(mut self, value: &str) -> Self {
        self.tokens.push(quote(value));
        self
    }

    /// Appends `-- <raw>` so free-form flags reach the underlying tool untouched
    pub fn passthrough(mut self, raw: &str) -> Self {
        let raw = raw.trim();
        if !raw.is_empty() {
            self.tokens.push("--".to_string());
            self.tokens.push(raw.to_string());
        }
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn secret_env(mut self, key: impl Into<String>, value: SecretString) -> Self {
        self.secret_env.insert(key.into(), value);
        self
    }

    /// Prepends a directory to the child's `PATH`
    pub fn search_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_paths.push(dir.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn render(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn env_vars(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn secret_env_vars(&self) -> &BTreeMap<String, SecretString> {
        &self.secret_env
    }

    pub fn secret_env_keys(&self) -> impl Iterator<Item = &str> {
        self.secret_env.keys().map(String::as_str)
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandLine")
            .field("command", &self.render())
            .field("env", &self.env)
            .field("secret_env", &self.secret_env.keys().collect::<Vec<_>>())
            .field("search_paths", &self.search_paths)
            .field("current_dir", &self.current_dir)
            .finish()
    }
}

/// Wraps a value in double quotes, escaping the characters the shell still
/// interprets inside them.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

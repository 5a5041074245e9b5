//! Error types for the generator

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Exit status for a bad command-line invocation
pub const EXIT_USAGE: i32 = 2;

/// Exit status for any failure after the command line was accepted
pub const EXIT_FAILURE: i32 = 1;

/// Generator errors
///
/// Every variant is terminal for a run; see [`GenError::exit_code`].
#[derive(Error, Debug)]
pub enum GenError {
    #[error("{0}")]
    Usage(String),

    #[error("configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("loading templates from {}: {reason}", .dir.display())]
    TemplateLoad { dir: PathBuf, reason: String },

    #[error("open {}: {source}", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding input: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("encoding document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("template name '{0}' not found")]
    TemplateNotFound(String),

    #[error("create {}: {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template execution failed: {0}")]
    Render(String),
}

impl GenError {
    /// Build a `TemplateLoad` error from any underlying failure
    pub fn template_load(dir: impl Into<PathBuf>, err: &(dyn StdError + 'static)) -> Self {
        Self::TemplateLoad {
            dir: dir.into(),
            reason: flatten_chain(err),
        }
    }

    /// Build a `Render` error, keeping the engine's nested causes
    pub fn render(err: &(dyn StdError + 'static)) -> Self {
        Self::Render(flatten_chain(err))
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GenError::Usage(_) => EXIT_USAGE,
            _ => EXIT_FAILURE,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, GenError::Usage(_))
    }
}

/// Join an error and all of its sources into one line.
///
/// Tera nests the useful part of a failure (the parse position, the missing
/// variable) a few levels down, and its parse errors span several lines.
pub fn flatten_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);

    while let Some(e) = current {
        let line = single_line(&e.to_string());
        if !line.is_empty() && !parts.iter().any(|p| p.contains(&line)) {
            parts.push(line);
        }
        current = e.source();
    }

    parts.join(": ")
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

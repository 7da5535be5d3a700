use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Unknown file extension {}", .0.display())]
    UnknownExtension(PathBuf),

    #[error(
        "Cannot find questions in {}. Please make a column with header 'question' \
         and a column with header 'answer' in the file for the question and answers.",
        .0.display()
    )]
    NoQuestions(PathBuf),

    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse CSV file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Cannot open workbook {}: {source}", .path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}

impl BankError {
    /// Title shown on the error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            BankError::NoQuestions(_) => "No questions",
            _ => "Error",
        }
    }
}

#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("Failed to start speech program '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

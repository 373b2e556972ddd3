//! Error types for the CLI

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the command line tool itself.
///
/// Problems in the linted code are diagnostics, never a `CliError`.
#[derive(Debug, Error)]
pub enum CliError {
    /// A source or config file could not be read
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid JSON or has a bad option value
    #[error("bad config file '{}': {source}", .path.display())]
    Config {
        /// Config file that failed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A path given on the command line does not exist
    #[error("no such file or directory: '{}'", .0.display())]
    MissingPath(PathBuf),

    /// A lint worker thread panicked
    #[error("lint worker panicked")]
    WorkerPanicked,

    /// Writing the report failed
    #[error("could not write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_path() {
        let err = CliError::Io {
            path: PathBuf::from("src/app.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "could not read 'src/app.js': gone");
        assert_eq!(
            CliError::MissingPath(PathBuf::from("lib")).to_string(),
            "no such file or directory: 'lib'"
        );
    }
}

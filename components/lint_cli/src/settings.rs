//! Lint options from a JSON config file and command line flags.

use std::fs;
use std::path::Path;

use linter::{KnownGlobals, LintConfig, UnusedMode};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{CliError, CliResult};

/// Contents of a `.jshintrc`-style config file.
///
/// Option keys sit at the top level next to `globals` (name to
/// assignable flag) and `predef` (read-only names).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Analysis options
    #[serde(flatten)]
    pub options: LintConfig,
    /// Predefined globals with their assignable flag
    pub globals: KnownGlobals,
    /// Predefined read-only globals
    pub predef: Vec<String>,
}

impl ConfigFile {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Everything a worker needs to lint one file.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Options passed to every analysis
    pub config: LintConfig,
    /// Globals known to every analysis
    pub known: KnownGlobals,
}

impl Settings {
    /// Build settings from the optional config file, then apply flags.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        let mut settings = Settings::from_file(file);
        settings.apply_flags(cli);
        tracing::debug!(
            esversion = settings.config.esversion.number(),
            globals = settings.known.len(),
            "settings resolved"
        );
        Ok(settings)
    }

    /// Settings from a config file alone.
    pub fn from_file(file: ConfigFile) -> Self {
        let mut known = file.globals;
        for name in file.predef {
            known.entry(name).or_insert(false);
        }
        Settings {
            config: file.options,
            known,
        }
    }

    /// Command line flags win over the config file.
    pub fn apply_flags(&mut self, cli: &Cli) {
        if let Some(esversion) = cli.esversion {
            self.config.esversion = esversion;
        }
        if let Some(maxerr) = cli.maxerr {
            self.config.maxerr = maxerr;
        }
        if cli.module {
            self.config.module = true;
        }
        if cli.undef {
            self.config.undef = true;
        }
        if cli.unused {
            self.config.unused = UnusedMode::LastParam;
        }
        for (name, writable) in &cli.globals {
            self.known.insert(name.clone(), *writable);
        }
        self.config.disabled.extend(cli.disabled.iter().cloned());
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Site preferences and command line parsing.
//!
//! Preferences are layered: built-in defaults, then a TOML file, then
//! environment variables, then command line flags.

use std::fs;
use std::path::{Path, PathBuf};

use bpaf::{Bpaf, ParseFailure};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registries::atomic::asset::DEFAULT_BASE_PATH;
use crate::shell::boundary::BoundaryConfig;

pub const BASE_PATH_ENV: &str = "PORTFOLIO_BASE_PATH";
pub const SITE_MODE_ENV: &str = "PORTFOLIO_ENV";
pub const SITE_ORIGIN_ENV: &str = "PORTFOLIO_SITE_ORIGIN";
pub const CONFIG_FILE_NAME: &str = "site.toml";
const CONFIG_DIR_NAME: &str = "portfolio-shell";
const DEVELOPMENT_MODE: &str = "development";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitePreferences {
    pub base_path: String,
    pub is_development: bool,
    /// Origin the site is served from, e.g. `https://name.github.io`.
    pub site_origin: Option<String>,
    /// Where the command line host keeps its session marker.
    pub session_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for SitePreferences {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            is_development: false,
            site_origin: None,
            session_file: None,
            log_filter: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to read preferences from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid preferences in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl SitePreferences {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let raw = fs::read_to_string(path).map_err(|source| PrefsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| PrefsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Overlay values from the environment. Any `PORTFOLIO_ENV` other than
    /// `development` means production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_path) = lookup(BASE_PATH_ENV).filter(|value| !value.is_empty()) {
            self.base_path = base_path;
        }
        if let Some(mode) = lookup(SITE_MODE_ENV) {
            self.is_development = mode.trim().eq_ignore_ascii_case(DEVELOPMENT_MODE);
        }
        if let Some(origin) = lookup(SITE_ORIGIN_ENV).filter(|value| !value.is_empty()) {
            self.site_origin = Some(origin);
        }
    }

    pub fn apply_command_line(&mut self, cli: &CommandLine) {
        if let Some(base_path) = &cli.base_path {
            self.base_path = base_path.clone();
        }
        if cli.development {
            self.is_development = true;
        }
        if let Some(filter) = &cli.log_filter {
            self.log_filter = Some(filter.clone());
        }
    }

    pub fn boundary_config(&self) -> BoundaryConfig {
        BoundaryConfig {
            is_development: self.is_development,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Bpaf)]
#[bpaf(options, version)]
/// Portfolio site shell: project listings, project pages and asset paths
pub struct CommandLine {
    /// Read site preferences from this TOML file
    #[bpaf(long, argument("PATH"))]
    pub config: Option<PathBuf>,
    /// Prefix for site routes and assets
    #[bpaf(long, argument("PATH"))]
    pub base_path: Option<String>,
    /// Show error details on fallback screens
    #[bpaf(long)]
    pub development: bool,
    /// Log filter directives, RUST_LOG syntax
    #[bpaf(long, argument("FILTER"))]
    pub log_filter: Option<String>,
    #[bpaf(external(command))]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Bpaf)]
pub enum Command {
    /// List every project card
    #[bpaf(command)]
    List {
        /// Print JSON instead of text
        #[bpaf(long)]
        json: bool,
    },
    /// Render one project page
    #[bpaf(command)]
    Show {
        /// Page the visitor arrived from
        #[bpaf(long, argument("URL"))]
        referrer: Option<String>,
        /// Project identifier
        #[bpaf(positional("ID"))]
        id: String,
    },
    /// Resolve asset paths under the base path
    #[bpaf(command)]
    Assets {
        /// Asset paths relative to the base path; the profile image when empty
        #[bpaf(positional("PATH"))]
        paths: Vec<String>,
    },
}

pub enum ArgumentParsingResult {
    Run(CommandLine),
    /// Help, version or completion output was printed.
    Exit,
    ErrorParsing,
}

/// Parse `args`, which must not include the binary name. Help and parse
/// errors are printed here.
pub fn parse_command_line_arguments(args: &[String]) -> ArgumentParsingResult {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match command_line().run_inline(&args) {
        Ok(cli) => ArgumentParsingResult::Run(cli),
        Err(ParseFailure::Stdout(doc, _)) => {
            println!("{doc}");
            ArgumentParsingResult::Exit
        }
        Err(ParseFailure::Completion(completion)) => {
            print!("{completion}");
            ArgumentParsingResult::Exit
        }
        Err(ParseFailure::Stderr(doc)) => {
            eprintln!("{doc}");
            ArgumentParsingResult::ErrorParsing
        }
    }
}

/// Layer defaults, the config file, the environment and `cli`.
///
/// Without `--config`, the per-user config file is read only when it exists.
pub fn resolve_preferences(
    cli: &CommandLine,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SitePreferences, PrefsError> {
    let config_path = cli.config.clone().or_else(|| {
        SitePreferences::default_config_path().filter(|path| path.is_file())
    });

    let mut prefs = match config_path {
        Some(path) => SitePreferences::load(&path)?,
        None => SitePreferences::default(),
    };
    prefs.apply_env(lookup);
    prefs.apply_command_line(cli);
    Ok(prefs)
}

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

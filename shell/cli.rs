/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::io::{self, Write};
use std::{env, panic, process};

use log::{error, info, warn};
use thiserror::Error;

use crate::prefs::{
    ArgumentParsingResult, Command, SitePreferences, parse_command_line_arguments, process_env,
    resolve_preferences,
};
use crate::registries::atomic::asset::{AssetPathError, ImagePathResolver, install_process_base_path};
use crate::registries::atomic::project::projects;
use crate::registries::atomic::project_detail::project_details;
use crate::render::{ProjectPage, render_fallback, render_project_list};
use crate::services::session::{JsonFileSessionStore, MarkerStore, MemorySessionStore};
use crate::shell::boundary::{BoundaryView, ErrorBoundary, FallbackError};
use crate::shell::diagnostics::LogSink;
use crate::shell::navigation::NavigationStateDeriver;

const PROJECT_PAGE_BOUNDARY: &str = "ProjectPageBoundary";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Asset(#[from] AssetPathError),
    #[error(transparent)]
    Fallback(#[from] FallbackError),
}

pub fn main() {
    panic::set_hook(Box::new(|panic_info| {
        error!("{panic_info}");
    }));

    // Skip the first argument, which is the binary name.
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_command_line_arguments(&args) {
        ArgumentParsingResult::Run(cli) => cli,
        ArgumentParsingResult::Exit => process::exit(0),
        ArgumentParsingResult::ErrorParsing => process::exit(1),
    };
    let prefs = match resolve_preferences(&cli, process_env) {
        Ok(prefs) => prefs,
        Err(error) => {
            eprintln!("portfolio-shell: {error}");
            process::exit(1);
        }
    };

    crate::init_tracing(prefs.log_filter.as_deref());
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("portfolio_shell", version = crate::VERSION).entered();

    if !install_process_base_path(&prefs.base_path) {
        warn!("Process base path was already set; ignoring {:?}", prefs.base_path);
    }
    info!(
        "Starting with base path {:?} (development: {})",
        prefs.base_path, prefs.is_development
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(error) = run(&cli.command, &prefs, &mut out) {
        eprintln!("portfolio-shell: {error}");
        process::exit(1);
    }
}

/// Execute one command against `prefs`, writing its output to `out`.
pub fn run(command: &Command, prefs: &SitePreferences, out: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::List { json: true } => {
            serde_json::to_writer_pretty(&mut *out, projects().get_all())?;
            writeln!(out)?;
        }
        Command::List { json: false } => {
            writeln!(out, "{}", render_project_list(projects().get_all()))?;
        }
        Command::Show { referrer, id } => show_project(id, referrer.as_deref(), prefs, out)?,
        Command::Assets { paths } => {
            let resolver = ImagePathResolver::new(prefs.base_path.as_str());
            if paths.is_empty() {
                writeln!(out, "{}", resolver.resolve_profile_image())?;
            }
            for path in paths {
                writeln!(out, "{}", resolver.resolve(path)?)?;
            }
        }
    }
    Ok(())
}

fn show_project(
    id: &str,
    referrer: Option<&str>,
    prefs: &SitePreferences,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut store: Box<dyn MarkerStore> = match &prefs.session_file {
        Some(path) => Box::new(JsonFileSessionStore::new(path)),
        None => Box::new(MemorySessionStore::new()),
    };

    let deriver = NavigationStateDeriver::from_preferences(prefs);
    let flag = deriver.on_mount(store.as_mut(), referrer);

    let mut page = ProjectPage::new(id, projects(), project_details())
        .with_navigation(flag, deriver.back_target());
    let mut boundary =
        ErrorBoundary::new(prefs.boundary_config(), LogSink).named(PROJECT_PAGE_BOUNDARY);

    match boundary.render(&mut page)? {
        BoundaryView::Children(text) => writeln!(out, "{text}")?,
        BoundaryView::Fallback(view) => writeln!(out, "{}", render_fallback(&view))?,
    }
    Ok(())
}

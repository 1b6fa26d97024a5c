/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use log::{debug, warn};
use serde_json::json;
use url::Url;

use crate::prefs::SitePreferences;
use crate::services::session::{MarkerStore, ReferrerMarker};
use crate::shell::diagnostics::{
    CHANNEL_NAVIGATION_MARKER_KEPT, CHANNEL_NAVIGATION_MARKER_WRITTEN,
    CHANNEL_SESSION_STORE_WRITE_FAILED, DiagnosticEvent, DiagnosticSink, LogSink, emit_event,
};

pub const HOME_PATH: &str = "/";
pub const FEATURED_PROJECTS_ANCHOR: &str = "projects";

const FEATURED_LISTING_PATHS: [&str; 2] = ["/projects", "/features"];
const FEATURED_LISTING_ANCHORS: [&str; 3] = ["projects", "featured-projects", "features"];
const RELATIVE_REFERRER_BASE: &str = "http://localhost/";

/// Host-provided "navigate to path" primitive. Fire and forget.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// Navigator that only records where it was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryNavigator {
    history: Vec<String>,
}

impl HistoryNavigator {
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, path: &str) {
        debug!("navigate -> {path}");
        self.history.push(path.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationFlag {
    pub show_back_button: bool,
}

/// Classify the page the visitor came from.
///
/// Relative referrers are taken to be on this site. Absolute referrers are
/// checked against `site_origin` when one is configured.
pub fn classify_referrer(
    referrer: Option<&str>,
    base_path: &str,
    site_origin: Option<&Url>,
) -> ReferrerMarker {
    let Some(referrer) = referrer.map(str::trim).filter(|r| !r.is_empty()) else {
        return ReferrerMarker::Direct;
    };

    let url = match Url::parse(referrer) {
        Ok(url) => {
            if site_origin.is_some_and(|origin| origin.origin() != url.origin()) {
                return ReferrerMarker::External;
            }
            url
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(RELATIVE_REFERRER_BASE).and_then(|base| base.join(referrer)) {
                Ok(url) => url,
                Err(_) => return ReferrerMarker::Direct,
            }
        }
        Err(_) => return ReferrerMarker::Direct,
    };

    let Some(path) = strip_base_path(url.path(), base_path) else {
        return ReferrerMarker::Direct;
    };

    let is_listing_path = FEATURED_LISTING_PATHS.contains(&path);
    let is_listing_anchor = path == "/"
        && url
            .fragment()
            .is_some_and(|fragment| FEATURED_LISTING_ANCHORS.contains(&fragment));

    if is_listing_path || is_listing_anchor {
        ReferrerMarker::FeaturedProjects
    } else {
        ReferrerMarker::Direct
    }
}

/// Site-relative form of `path` with no trailing separator, or `None` when
/// `path` lies outside `base_path`.
fn strip_base_path<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    let base = base_path.trim_end_matches('/');
    let rest = if base.is_empty() {
        path
    } else {
        let rest = path.strip_prefix(base)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        rest
    };

    let trimmed = rest.trim_end_matches('/');
    Some(if trimmed.is_empty() { "/" } else { trimmed })
}

/// Derives whether a page should offer "back to projects".
pub struct NavigationStateDeriver {
    base_path: String,
    site_origin: Option<Url>,
    sink: Box<dyn DiagnosticSink>,
}

impl NavigationStateDeriver {
    pub fn new(base_path: impl Into<String>, site_origin: Option<Url>) -> Self {
        Self {
            base_path: base_path.into(),
            site_origin,
            sink: Box::new(LogSink),
        }
    }

    pub fn from_preferences(prefs: &SitePreferences) -> Self {
        let site_origin = prefs
            .site_origin
            .as_deref()
            .and_then(|origin| match Url::parse(origin) {
                Ok(url) => Some(url),
                Err(error) => {
                    warn!("Ignoring invalid site origin {origin:?}: {error}");
                    None
                }
            });
        Self::new(prefs.base_path.clone(), site_origin)
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn back_target(&self) -> String {
        format!(
            "{}/#{FEATURED_PROJECTS_ANCHOR}",
            self.base_path.trim_end_matches('/')
        )
    }

    /// Persist the marker for `referrer` unless the store already holds one
    /// at least as strong. Returns the marker left in the store.
    pub fn initialize_from_referrer(
        &self,
        store: &mut dyn MarkerStore,
        referrer: Option<&str>,
    ) -> ReferrerMarker {
        let incoming = classify_referrer(referrer, &self.base_path, self.site_origin.as_ref());

        if let Some(existing) = store.read_marker().filter(|existing| *existing >= incoming) {
            emit_event(
                self.sink.as_ref(),
                DiagnosticEvent::info(
                    CHANNEL_NAVIGATION_MARKER_KEPT,
                    "kept existing referrer marker",
                    json!({ "existing": existing, "incoming": incoming }),
                ),
            );
            return existing;
        }

        match store.write_marker(incoming) {
            Ok(()) => emit_event(
                self.sink.as_ref(),
                DiagnosticEvent::info(
                    CHANNEL_NAVIGATION_MARKER_WRITTEN,
                    "wrote referrer marker",
                    json!({ "marker": incoming }),
                ),
            ),
            Err(error) => emit_event(
                self.sink.as_ref(),
                DiagnosticEvent::warn(
                    CHANNEL_SESSION_STORE_WRITE_FAILED,
                    "failed to persist referrer marker",
                    json!({ "marker": incoming, "error": error.to_string() }),
                ),
            ),
        }
        incoming
    }

    pub fn is_from_featured_projects(&self, store: &dyn MarkerStore) -> bool {
        store.read_marker() == Some(ReferrerMarker::FeaturedProjects)
    }

    /// Initialize from `referrer`, then read the flag back from the store.
    pub fn on_mount(&self, store: &mut dyn MarkerStore, referrer: Option<&str>) -> NavigationFlag {
        self.initialize_from_referrer(store, referrer);
        NavigationFlag {
            show_back_button: self.is_from_featured_projects(store),
        }
    }
}

impl Default for NavigationStateDeriver {
    fn default() -> Self {
        Self::new(HOME_PATH, None)
    }
}

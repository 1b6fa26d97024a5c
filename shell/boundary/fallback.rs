/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use super::machine::{ComponentTrace, RenderError};

pub const FALLBACK_TITLE: &str = "Coming Soon";
pub const FALLBACK_MESSAGE: &str =
    "This page is still under construction or ran into a problem. Try again, or head back home.";

/// What a fallback renderer gets to see about the captured failure.
#[derive(Debug, Clone, Copy)]
pub struct FallbackProps<'a> {
    pub error: Option<&'a RenderError>,
    pub trace: Option<&'a ComponentTrace>,
    pub is_development: bool,
}

/// Renders the screen shown while a boundary is failed.
///
/// An `Err` from here is not caught by the boundary that invoked it.
pub trait FallbackRenderer {
    type Output;

    fn render(&self, props: &FallbackProps<'_>) -> Result<Self::Output, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    TryAgain,
    GoHome,
}

impl FallbackAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::TryAgain => "Try again",
            Self::GoHome => "Go home",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackView {
    pub title: String,
    pub message: String,
    /// Error text and component stack; development builds only.
    pub detail: Option<String>,
    pub actions: Vec<FallbackAction>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ComingSoonFallback;

impl FallbackRenderer for ComingSoonFallback {
    type Output = FallbackView;

    fn render(&self, props: &FallbackProps<'_>) -> Result<FallbackView, RenderError> {
        let detail = match (props.is_development, props.error) {
            (true, Some(error)) => {
                let mut detail = error.to_string();
                if let Some(trace) = props.trace.filter(|trace| !trace.is_empty()) {
                    detail.push_str("\n\nComponent stack:");
                    detail.push_str(&trace.to_string());
                }
                Some(detail)
            }
            _ => None,
        };

        Ok(FallbackView {
            title: FALLBACK_TITLE.to_string(),
            message: FALLBACK_MESSAGE.to_string(),
            detail,
            actions: vec![FallbackAction::TryAgain, FallbackAction::GoHome],
        })
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pure state machine behind [`super::ErrorBoundary`].
//!
//! The machine only records what happened; logging and fallback rendering
//! belong to the driver.

use std::any::Any;
use std::fmt;

use thiserror::Error;

/// Failure raised while a guarded subtree renders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{component} failed to render: {message}")]
    Failed { component: String, message: String },
    #[error("render panicked: {message}")]
    Panicked { message: String },
}

impl RenderError {
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Failed { message, .. } | Self::Panicked { message } => message,
        }
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }
}

/// Components on the render path at the moment a subtree failed, outermost
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentTrace {
    frames: Vec<String>,
}

impl ComponentTrace {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn innermost(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for ComponentTrace {
    /// Innermost component first, one `in <Component>` line per frame.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames.iter().rev() {
            write!(f, "\n    in {frame}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPhase {
    Normal,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundaryState {
    has_error: bool,
    captured_error: Option<RenderError>,
    captured_info: Option<ComponentTrace>,
}

impl BoundaryState {
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn captured_error(&self) -> Option<&RenderError> {
        self.captured_error.as_ref()
    }

    pub fn captured_info(&self) -> Option<&ComponentTrace> {
        self.captured_info.as_ref()
    }

    pub fn phase(&self) -> BoundaryPhase {
        if self.has_error {
            BoundaryPhase::Failed
        } else {
            BoundaryPhase::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryEvent {
    ChildFailed {
        error: RenderError,
        trace: ComponentTrace,
    },
    ResetRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    EnteredFailed,
    Reset,
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct BoundaryMachine {
    state: BoundaryState,
}

impl BoundaryMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    /// Apply `event`.
    ///
    /// Error and trace are captured in the same transition, so there is no
    /// window where `has_error` is set but `captured_info` is not. A failure
    /// reported while already failed keeps the first capture.
    pub fn dispatch(&mut self, event: BoundaryEvent) -> Transition {
        match event {
            BoundaryEvent::ChildFailed { error, trace } => {
                if self.state.has_error {
                    return Transition::Unchanged;
                }
                self.state = BoundaryState {
                    has_error: true,
                    captured_error: Some(error),
                    captured_info: Some(trace),
                };
                Transition::EnteredFailed
            }
            BoundaryEvent::ResetRequested => {
                if !self.state.has_error {
                    return Transition::Unchanged;
                }
                self.state = BoundaryState::default();
                Transition::Reset
            }
        }
    }
}

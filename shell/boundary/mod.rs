/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Error-recovery boundary.
//!
//! An [`ErrorBoundary`] renders a guarded [`Subtree`]. When the subtree
//! returns an error or panics, the boundary switches to its fallback screen
//! and stays there until the user asks to try again. Errors raised by the
//! fallback itself are handed back to the caller as [`FallbackError`].

pub mod fallback;
pub mod machine;

use std::panic::{self, AssertUnwindSafe};

use serde_json::json;
use thiserror::Error;

pub use fallback::{
    ComingSoonFallback, FallbackAction, FallbackProps, FallbackRenderer, FallbackView,
};
pub use machine::{
    BoundaryEvent, BoundaryMachine, BoundaryPhase, BoundaryState, ComponentTrace, RenderError,
    Transition,
};

use crate::shell::diagnostics::{
    CHANNEL_BOUNDARY_CAUGHT, CHANNEL_BOUNDARY_GO_HOME, CHANNEL_BOUNDARY_RESET, DiagnosticEvent,
    DiagnosticSink, emit_event,
};
use crate::shell::navigation::{HOME_PATH, Navigator};

const DEFAULT_BOUNDARY_NAME: &str = "ErrorBoundary";

/// Tracks which components are on the render path so a failure can be
/// reported with a component stack.
#[derive(Debug, Default)]
pub struct RenderContext {
    stack: Vec<String>,
    /// Innermost trace of the error currently propagating, if any.
    failure: Option<(RenderError, ComponentTrace)>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `component` as a child of whatever is currently on the stack.
    pub fn enter<T>(
        &mut self,
        component: &str,
        render: impl FnOnce(&mut Self) -> Result<T, RenderError>,
    ) -> Result<T, RenderError> {
        self.stack.push(component.to_string());
        let result = render(self);
        if let Err(error) = &result {
            let propagating = self
                .failure
                .as_ref()
                .is_some_and(|(recorded, trace)| {
                    recorded == error && trace.frames().starts_with(&self.stack)
                });
            if !propagating {
                self.failure = Some((error.clone(), ComponentTrace::new(self.stack.clone())));
            }
        }
        self.stack.pop();
        result
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Trace for `error`, the failure that escaped the subtree.
    ///
    /// After an unwinding panic the stack still holds the frames that were
    /// active when it was raised. A recorded trace only counts when it
    /// belongs to `error`; errors a parent recovered from are ignored.
    fn into_trace(self, error: &RenderError) -> ComponentTrace {
        if !self.stack.is_empty() {
            return ComponentTrace::new(self.stack);
        }
        match self.failure {
            Some((recorded, trace)) if &recorded == error => trace,
            _ => ComponentTrace::default(),
        }
    }
}

/// A unit of UI guarded by a boundary. The boundary only observes whether
/// rendering succeeds.
pub trait Subtree {
    type Output;

    fn render(&mut self, ctx: &mut RenderContext) -> Result<Self::Output, RenderError>;
}

impl<F, T> Subtree for F
where
    F: FnMut(&mut RenderContext) -> Result<T, RenderError>,
{
    type Output = T;

    fn render(&mut self, ctx: &mut RenderContext) -> Result<T, RenderError> {
        self(ctx)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryView<T, F> {
    Children(T),
    Fallback(F),
}

impl<T, F> BoundaryView<T, F> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// The fallback screen of `boundary` itself failed to render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fallback of {boundary} failed to render: {source}")]
pub struct FallbackError {
    pub boundary: String,
    pub source: RenderError,
}

/// Lets an ancestor boundary catch the failure, attributed to the boundary
/// whose fallback broke.
impl From<FallbackError> for RenderError {
    fn from(error: FallbackError) -> Self {
        RenderError::new(error.boundary.clone(), error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryConfig {
    /// Show the error detail panel on the fallback screen.
    pub is_development: bool,
}

pub struct ErrorBoundary<R = ComingSoonFallback> {
    name: String,
    machine: BoundaryMachine,
    config: BoundaryConfig,
    sink: Box<dyn DiagnosticSink>,
    fallback: R,
}

impl ErrorBoundary {
    pub fn new(config: BoundaryConfig, sink: impl DiagnosticSink + 'static) -> Self {
        Self::with_fallback(config, sink, ComingSoonFallback)
    }
}

impl<R: FallbackRenderer> ErrorBoundary<R> {
    pub fn with_fallback(
        config: BoundaryConfig,
        sink: impl DiagnosticSink + 'static,
        fallback: R,
    ) -> Self {
        Self {
            name: DEFAULT_BOUNDARY_NAME.to_string(),
            machine: BoundaryMachine::new(),
            config,
            sink: Box::new(sink),
            fallback,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &BoundaryState {
        self.machine.state()
    }

    pub fn config(&self) -> BoundaryConfig {
        self.config
    }

    /// Feed an event to the state machine, running the diagnostic side
    /// effect when the boundary has just failed or reset.
    pub fn dispatch(&mut self, event: BoundaryEvent) -> Transition {
        let transition = self.machine.dispatch(event);
        match transition {
            Transition::EnteredFailed => self.report_caught(),
            Transition::Reset => self.report(DiagnosticEvent::info(
                CHANNEL_BOUNDARY_RESET,
                format!("{} reset by user", self.name),
                json!({ "boundary": self.name }),
            )),
            Transition::Unchanged => {}
        }
        transition
    }

    /// Render the guarded subtree, or the fallback screen while failed.
    ///
    /// The subtree is not touched while the boundary is failed.
    pub fn render<S: Subtree>(
        &mut self,
        subtree: &mut S,
    ) -> Result<BoundaryView<S::Output, R::Output>, FallbackError> {
        if !self.machine.state().has_error() {
            let mut ctx = RenderContext::new();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| subtree.render(&mut ctx)));
            let error = match outcome {
                Ok(Ok(output)) => return Ok(BoundaryView::Children(output)),
                Ok(Err(error)) => error,
                Err(payload) => RenderError::from_panic(&*payload),
            };
            let trace = ctx.into_trace(&error);
            self.dispatch(BoundaryEvent::ChildFailed { error, trace });
        }

        self.render_fallback().map(BoundaryView::Fallback)
    }

    pub fn reset(&mut self) -> Transition {
        self.dispatch(BoundaryEvent::ResetRequested)
    }

    pub fn handle_action(
        &mut self,
        action: FallbackAction,
        navigator: &mut dyn Navigator,
    ) -> Transition {
        match action {
            FallbackAction::TryAgain => self.reset(),
            FallbackAction::GoHome => {
                self.report(DiagnosticEvent::info(
                    CHANNEL_BOUNDARY_GO_HOME,
                    format!("{} navigating home", self.name),
                    json!({ "boundary": self.name, "path": HOME_PATH }),
                ));
                navigator.navigate(HOME_PATH);
                Transition::Unchanged
            }
        }
    }

    fn render_fallback(&self) -> Result<R::Output, FallbackError> {
        let state = self.machine.state();
        let props = FallbackProps {
            error: state.captured_error(),
            trace: state.captured_info(),
            is_development: self.config.is_development,
        };
        self.fallback
            .render(&props)
            .map_err(|source| FallbackError {
                boundary: self.name.clone(),
                source,
            })
    }

    fn report_caught(&self) {
        let state = self.machine.state();
        let Some(error) = state.captured_error() else {
            return;
        };
        let frames = state
            .captured_info()
            .map(ComponentTrace::frames)
            .unwrap_or_default();
        self.report(DiagnosticEvent::error(
            CHANNEL_BOUNDARY_CAUGHT,
            format!("Error caught by {}: {error}", self.name),
            json!({
                "boundary": self.name,
                "error": error.to_string(),
                "component_stack": frames,
            }),
        ));
    }

    /// Diagnostics never escape: a panicking sink or log backend is dropped
    /// on the floor.
    fn report(&self, event: DiagnosticEvent) {
        let sink = self.sink.as_ref();
        let _ = panic::catch_unwind(AssertUnwindSafe(|| emit_event(sink, event)));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::shell::diagnostics::{ChannelSeverity, LogSink, diagnostics_channel};
    use crate::shell::navigation::HistoryNavigator;

    struct PanickingSink;

    impl DiagnosticSink for PanickingSink {
        fn record(&self, _event: DiagnosticEvent) {
            panic!("sink is broken");
        }
    }

    struct BrokenFallback;

    impl FallbackRenderer for BrokenFallback {
        type Output = ();

        fn render(&self, _props: &FallbackProps<'_>) -> Result<(), RenderError> {
            Err(RenderError::new("BrokenFallback", "fallback exploded"))
        }
    }

    fn failing(message: &'static str) -> impl FnMut(&mut RenderContext) -> Result<(), RenderError> {
        move |ctx: &mut RenderContext| {
            ctx.enter("Page", |ctx| {
                ctx.enter("Widget", |_| Err(RenderError::new("Widget", message)))
            })
        }
    }

    #[test]
    fn renders_children_while_normal() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let mut subtree = |_: &mut RenderContext| -> Result<&'static str, RenderError> { Ok("hello") };

        let view = boundary.render(&mut subtree).expect("no fallback error");
        assert_eq!(view, BoundaryView::Children("hello"));
        assert_eq!(boundary.state().phase(), BoundaryPhase::Normal);
    }

    #[test]
    fn error_result_enters_failed_with_trace() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let view = boundary.render(&mut failing("broken")).expect("fallback renders");

        assert!(view.is_fallback());
        let state = boundary.state();
        assert_eq!(state.captured_error(), Some(&RenderError::new("Widget", "broken")));
        assert_eq!(
            state.captured_info().map(ComponentTrace::frames),
            Some(&["Page".to_string(), "Widget".to_string()][..])
        );
    }

    #[test]
    fn panic_enters_failed_with_frames_at_panic_site() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let mut subtree = |ctx: &mut RenderContext| -> Result<(), RenderError> {
            ctx.enter("Page", |_| panic!("index out of range"))
        };

        let view = boundary.render(&mut subtree).expect("fallback renders");
        assert!(view.is_fallback());
        assert_eq!(
            boundary.state().captured_error(),
            Some(&RenderError::Panicked {
                message: "index out of range".into()
            })
        );
        assert_eq!(
            boundary.state().captured_info().and_then(ComponentTrace::innermost),
            Some("Page")
        );
    }

    #[test]
    fn failed_boundary_does_not_rerender_subtree() {
        let attempts = Rc::new(Cell::new(0));
        let counter = Rc::clone(&attempts);
        let mut subtree = move |_: &mut RenderContext| -> Result<(), RenderError> {
            counter.set(counter.get() + 1);
            Err(RenderError::new("Flaky", "nope"))
        };
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);

        boundary.render(&mut subtree).expect("fallback renders");
        boundary.render(&mut subtree).expect("fallback renders");
        boundary.render(&mut subtree).expect("fallback renders");
        assert_eq!(attempts.get(), 1);

        boundary.reset();
        boundary.render(&mut subtree).expect("fallback renders");
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn caught_error_is_reported_once() {
        let (tx, rx) = diagnostics_channel();
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), tx);
        let mut subtree = failing("broken");

        boundary.render(&mut subtree).expect("fallback renders");
        boundary.render(&mut subtree).expect("fallback renders");

        let caught: Vec<_> = rx
            .try_iter()
            .filter(|event| event.channel_id == CHANNEL_BOUNDARY_CAUGHT)
            .collect();
        assert_eq!(caught.len(), 1);
        assert_eq!(caught[0].severity, ChannelSeverity::Error);
        assert_eq!(caught[0].detail["component_stack"][1], "Widget");
    }

    #[test]
    fn panicking_sink_does_not_mask_the_fallback() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), PanickingSink);
        let view = boundary.render(&mut failing("broken")).expect("fallback renders");

        assert!(view.is_fallback());
        assert!(boundary.state().has_error());
    }

    #[test]
    fn fallback_errors_propagate_and_keep_failed_state() {
        let mut boundary =
            ErrorBoundary::with_fallback(BoundaryConfig::default(), LogSink, BrokenFallback)
                .named("SidebarBoundary");
        let result = boundary.render(&mut failing("broken"));

        assert_eq!(
            result,
            Err(FallbackError {
                boundary: "SidebarBoundary".to_string(),
                source: RenderError::new("BrokenFallback", "fallback exploded"),
            })
        );
        assert!(boundary.state().has_error());
    }

    #[test]
    fn fallback_error_names_its_boundary_when_converted() {
        let error = FallbackError {
            boundary: "SidebarBoundary".to_string(),
            source: RenderError::new("BrokenFallback", "fallback exploded"),
        };
        let RenderError::Failed { component, message } = RenderError::from(error) else {
            panic!("expected a component failure");
        };
        assert_eq!(component, "SidebarBoundary");
        assert!(message.contains("fallback exploded"));
    }

    #[test]
    fn panicking_fallback_is_not_caught() {
        struct PanickingFallback;

        impl FallbackRenderer for PanickingFallback {
            type Output = ();

            fn render(&self, _props: &FallbackProps<'_>) -> Result<(), RenderError> {
                panic!("fallback panicked");
            }
        }

        let mut boundary =
            ErrorBoundary::with_fallback(BoundaryConfig::default(), LogSink, PanickingFallback);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = boundary.render(&mut failing("broken"));
        }));

        assert!(outcome.is_err());
        assert!(boundary.state().has_error());
    }

    #[test]
    fn recovered_child_error_does_not_claim_the_trace() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let mut subtree = |ctx: &mut RenderContext| -> Result<(), RenderError> {
            ctx.enter("Page", |ctx| {
                let _badge = ctx
                    .enter("OptionalBadge", |_| -> Result<(), RenderError> {
                        Err(RenderError::new("OptionalBadge", "no badge"))
                    })
                    .ok();
                ctx.enter("Chart", |_| Err(RenderError::new("Chart", "no data")))
            })
        };

        boundary.render(&mut subtree).expect("fallback renders");
        let trace = boundary.state().captured_info().expect("trace captured");
        assert_eq!(trace.frames(), &["Page".to_string(), "Chart".to_string()][..]);
    }

    #[test]
    fn parent_failure_after_recovered_child_points_at_parent() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let mut subtree = |ctx: &mut RenderContext| -> Result<(), RenderError> {
            ctx.enter("Page", |ctx| {
                let _badge = ctx
                    .enter("OptionalBadge", |_| -> Result<(), RenderError> {
                        Err(RenderError::new("OptionalBadge", "no badge"))
                    })
                    .ok();
                Err(RenderError::new("Page", "layout missing"))
            })
        };

        boundary.render(&mut subtree).expect("fallback renders");
        assert_eq!(
            boundary.state().captured_info().and_then(ComponentTrace::innermost),
            Some("Page")
        );
    }

    #[test]
    fn sibling_with_identical_error_gets_its_own_trace() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let mut subtree = |ctx: &mut RenderContext| -> Result<(), RenderError> {
            ctx.enter("Page", |ctx| {
                let _first = ctx
                    .enter("Left", |_| -> Result<(), RenderError> {
                        Err(RenderError::new("Panel", "empty"))
                    })
                    .ok();
                ctx.enter("Right", |_| Err(RenderError::new("Panel", "empty")))
            })
        };

        boundary.render(&mut subtree).expect("fallback renders");
        assert_eq!(
            boundary.state().captured_info().and_then(ComponentTrace::innermost),
            Some("Right")
        );
    }

    #[test]
    fn recovered_error_is_ignored_when_subtree_fails_outside_any_frame() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        let mut subtree = |ctx: &mut RenderContext| -> Result<(), RenderError> {
            let _badge = ctx
                .enter("OptionalBadge", |_| -> Result<(), RenderError> {
                    Err(RenderError::new("OptionalBadge", "no badge"))
                })
                .ok();
            Err(RenderError::new("Root", "nothing to show"))
        };

        boundary.render(&mut subtree).expect("fallback renders");
        assert!(boundary.state().captured_info().is_some_and(ComponentTrace::is_empty));
    }

    #[test]
    fn go_home_navigates_without_resetting() {
        let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), LogSink);
        boundary.render(&mut failing("broken")).expect("fallback renders");
        let mut navigator = HistoryNavigator::default();

        let transition = boundary.handle_action(FallbackAction::GoHome, &mut navigator);
        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(navigator.history(), &[HOME_PATH.to_string()]);
        assert!(boundary.state().has_error());

        let transition = boundary.handle_action(FallbackAction::TryAgain, &mut navigator);
        assert_eq!(transition, Transition::Reset);
        assert_eq!(boundary.state(), &BoundaryState::default());
    }

    #[test]
    fn detail_panel_follows_configured_mode() {
        let mut dev = ErrorBoundary::new(BoundaryConfig { is_development: true }, LogSink);
        let mut prod = ErrorBoundary::new(BoundaryConfig { is_development: false }, LogSink);

        let Ok(BoundaryView::Fallback(dev_view)) = dev.render(&mut failing("broken")) else {
            panic!("expected fallback");
        };
        let Ok(BoundaryView::Fallback(prod_view)) = prod.render(&mut failing("broken")) else {
            panic!("expected fallback");
        };
        assert!(dev_view.detail.is_some());
        assert!(prod_view.detail.is_none());
    }

    #[test]
    fn render_context_pops_frames_on_success() {
        let mut ctx = RenderContext::new();
        let depth_inside = ctx
            .enter("Outer", |ctx| ctx.enter("Inner", |ctx| Ok(ctx.depth())))
            .expect("renders");
        assert_eq!(depth_inside, 2);
        assert_eq!(ctx.depth(), 0);
    }
}

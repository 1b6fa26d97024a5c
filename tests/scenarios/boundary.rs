use std::cell::Cell;

use portfolio_shell::registries::atomic::{ProjectDetailRegistry, ProjectRegistry};
use portfolio_shell::render::ProjectPage;
use portfolio_shell::shell::boundary::{
    BoundaryConfig, BoundaryPhase, BoundaryView, ErrorBoundary, FallbackAction, FallbackError,
    FallbackProps, FallbackRenderer, RenderContext, RenderError,
};
use portfolio_shell::shell::diagnostics::{CHANNEL_BOUNDARY_CAUGHT, LogSink, diagnostics_channel};
use portfolio_shell::shell::navigation::{HOME_PATH, HistoryNavigator};

struct ExplodingFallback;

impl FallbackRenderer for ExplodingFallback {
    type Output = ();

    fn render(&self, _props: &FallbackProps<'_>) -> Result<(), RenderError> {
        Err(RenderError::new("ExplodingFallback", "fallback is broken too"))
    }
}

fn boundary() -> ErrorBoundary {
    ErrorBoundary::new(BoundaryConfig::default(), LogSink)
}

#[test]
fn failure_is_captured_once_and_reproduces_after_reset() {
    let (tx, rx) = diagnostics_channel();
    let mut boundary = ErrorBoundary::new(BoundaryConfig::default(), tx);
    let expected = RenderError::new("Chart", "no data");
    let mut subtree = |ctx: &mut RenderContext| -> Result<(), RenderError> {
        ctx.enter("Chart", |_| Err(RenderError::new("Chart", "no data")))
    };

    boundary.render(&mut subtree).unwrap();
    boundary.render(&mut subtree).unwrap();
    assert_eq!(boundary.state().phase(), BoundaryPhase::Failed);
    assert_eq!(boundary.state().captured_error(), Some(&expected));

    boundary.handle_action(FallbackAction::TryAgain, &mut HistoryNavigator::default());
    boundary.render(&mut subtree).unwrap();
    assert_eq!(boundary.state().captured_error(), Some(&expected));

    let caught = rx
        .try_iter()
        .filter(|event| event.channel_id == CHANNEL_BOUNDARY_CAUGHT)
        .count();
    assert_eq!(caught, 2);
}

#[test]
fn reset_clears_state_and_retries_subtree() {
    let attempts = Cell::new(0);
    let mut subtree = |_: &mut RenderContext| -> Result<&'static str, RenderError> {
        attempts.set(attempts.get() + 1);
        if attempts.get() == 1 {
            Err(RenderError::new("Gallery", "images still loading"))
        } else {
            Ok("gallery")
        }
    };
    let mut boundary = boundary();

    assert!(boundary.render(&mut subtree).unwrap().is_fallback());

    boundary.reset();
    let state = boundary.state();
    assert!(!state.has_error());
    assert!(state.captured_error().is_none());
    assert!(state.captured_info().is_none());

    assert_eq!(
        boundary.render(&mut subtree).unwrap(),
        BoundaryView::Children("gallery")
    );
    assert_eq!(attempts.get(), 2);
}

#[test]
fn go_home_navigates_without_resetting() {
    let mut boundary = boundary();
    let mut navigator = HistoryNavigator::default();
    let mut subtree =
        |_: &mut RenderContext| -> Result<(), RenderError> { Err(RenderError::new("Page", "x")) };

    boundary.render(&mut subtree).unwrap();
    boundary.handle_action(FallbackAction::GoHome, &mut navigator);

    assert_eq!(navigator.current(), Some(HOME_PATH));
    assert!(boundary.state().has_error());
}

#[test]
fn fallback_failure_propagates_to_the_caller() {
    let mut boundary = ErrorBoundary::with_fallback(BoundaryConfig::default(), LogSink, ExplodingFallback);
    let mut subtree =
        |_: &mut RenderContext| -> Result<(), RenderError> { Err(RenderError::new("Page", "x")) };

    let error = boundary.render(&mut subtree).unwrap_err();
    assert_eq!(
        error,
        FallbackError {
            boundary: "ErrorBoundary".to_string(),
            source: RenderError::new("ExplodingFallback", "fallback is broken too"),
        }
    );
    assert!(boundary.state().has_error());
}

#[test]
fn outer_boundary_catches_inner_fallback_failure() {
    let mut inner = ErrorBoundary::with_fallback(BoundaryConfig::default(), LogSink, ExplodingFallback)
        .named("InnerBoundary");
    let mut outer = boundary().named("OuterBoundary");

    let mut subtree = |ctx: &mut RenderContext| -> Result<bool, RenderError> {
        ctx.enter("Section", |_| {
            let mut child = |_: &mut RenderContext| -> Result<(), RenderError> {
                Err(RenderError::new("Widget", "broken widget"))
            };
            let view = inner.render(&mut child)?;
            Ok(view.is_fallback())
        })
    };

    let view = outer.render(&mut subtree).unwrap();
    assert!(view.is_fallback());
    assert!(outer.state().has_error());
    assert_eq!(
        outer.state().captured_info().and_then(|trace| trace.innermost()),
        Some("Section")
    );
    assert!(matches!(
        outer.state().captured_error(),
        Some(RenderError::Failed { component, .. }) if component == "InnerBoundary"
    ));
    assert!(inner.state().has_error());
}

#[test]
fn project_page_without_detail_content_shows_coming_soon() {
    let projects = ProjectRegistry::core_seed();
    let mut details = ProjectDetailRegistry::core_seed();
    details.remove("imsop");
    let mut page = ProjectPage::new("imsop", &projects, &details);
    let mut boundary = ErrorBoundary::new(BoundaryConfig { is_development: true }, LogSink);

    match boundary.render(&mut page).unwrap() {
        BoundaryView::Fallback(view) => {
            assert_eq!(view.title, "Coming Soon");
            let detail = view.detail.unwrap();
            assert!(detail.contains("no detail content"));
            assert!(detail.contains("in ProjectDetail"));
            assert!(detail.contains("in ProjectPage"));
        }
        BoundaryView::Children(text) => panic!("expected fallback, rendered {text}"),
    }
}

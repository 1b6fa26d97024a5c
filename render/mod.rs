/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Plain text rendering for project cards, project pages and the fallback
//! screen.
//!
//! [`ProjectPage`] is the guarded subtree the command line host renders
//! through an [`ErrorBoundary`](crate::shell::boundary::ErrorBoundary).

use serde_json::json;

use crate::registries::atomic::project::{ProjectRecord, ProjectRegistry};
use crate::registries::atomic::project_detail::{ProjectDetail, ProjectDetailRegistry};
use crate::shell::boundary::{FallbackView, RenderContext, RenderError, Subtree};
use crate::shell::diagnostics::{
    CHANNEL_REGISTRY_PROJECT_LOOKUP_FAILED, DiagnosticEvent, DiagnosticSink, LogSink, emit_event,
};
use crate::shell::navigation::NavigationFlag;

const COMPONENT_PROJECT_PAGE: &str = "ProjectPage";
const COMPONENT_PROJECT_HEADER: &str = "ProjectHeader";
const COMPONENT_PROJECT_DETAIL: &str = "ProjectDetail";
const RULE: &str = "----------------------------------------";

pub fn render_project_card(record: &ProjectRecord) -> String {
    let mut lines = vec![record.title.clone()];
    if let Some(subtitle) = &record.subtitle {
        lines.push(format!("  {subtitle}"));
    }
    lines.push(format!("  {}", record.description));
    if !record.tags.is_empty() {
        let labels: Vec<_> = record.tags.iter().map(|tag| tag.label.as_str()).collect();
        lines.push(format!("  [{}]", labels.join(", ")));
    }
    if let Some(link) = &record.link {
        let marker = if record.is_external { " (external)" } else { "" };
        lines.push(format!("  -> {link}{marker}"));
    }
    lines.join("\n")
}

pub fn render_project_list(records: &[ProjectRecord]) -> String {
    records
        .iter()
        .map(render_project_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_not_found(id: &str) -> String {
    format!("Project not found\n\nNo project is registered under {id:?}.")
}

pub fn render_back_link(flag: NavigationFlag, back_target: &str) -> Option<String> {
    flag.show_back_button
        .then(|| format!("<- Back to projects ({back_target})"))
}

pub fn render_project_detail(detail: &ProjectDetail) -> String {
    let mut lines = vec![
        detail.title.clone(),
        detail.subtitle.clone(),
        RULE.to_string(),
        detail.description.clone(),
        String::new(),
    ];
    lines.extend(
        detail
            .stats
            .iter()
            .map(|stat| format!("  {:>8}  {}", stat.value, stat.label)),
    );

    lines.push(String::new());
    lines.push("Problem".to_string());
    lines.push(detail.problem_statement.clone());

    lines.push(String::new());
    lines.push("Requirements".to_string());
    lines.extend(detail.requirements.iter().map(|item| format!("  - {item}")));

    lines.push(String::new());
    lines.push("Architecture".to_string());
    lines.extend(
        detail
            .solution
            .architecture
            .iter()
            .map(|item| format!("  {}: {}", item.title, item.desc)),
    );

    lines.push(String::new());
    lines.push("Tech stack".to_string());
    lines.extend(
        detail
            .solution
            .tech_stack
            .iter()
            .map(|group| format!("  {}: {}", group.category, group.items.join(", "))),
    );

    lines.push(String::new());
    lines.push("Implementation".to_string());
    for phase in &detail.implementation {
        lines.push(format!("  {} ({})", phase.phase, phase.duration));
        lines.push(format!("    {}", phase.description));
    }

    lines.push(String::new());
    lines.push("Results".to_string());
    lines.extend(detail.results.iter().map(|item| format!("  - {item}")));

    lines.join("\n")
}

pub fn render_fallback(view: &FallbackView) -> String {
    let mut lines = vec![view.title.clone(), RULE.to_string(), view.message.clone()];
    if let Some(detail) = &view.detail {
        lines.push(String::new());
        lines.push(detail.clone());
    }
    lines.push(String::new());
    let actions: Vec<_> = view
        .actions
        .iter()
        .map(|action| format!("[{}]", action.label()))
        .collect();
    lines.push(actions.join(" "));
    lines.join("\n")
}

/// A project detail page.
///
/// Projects with a card render the card followed by the detail content.
/// Detail-only projects, which have no card in the listing, render the
/// detail content alone. Ids known to neither registry render a not-found
/// page. A project with a card but no detail content is a render failure.
pub struct ProjectPage<'a> {
    id: String,
    projects: &'a ProjectRegistry,
    details: &'a ProjectDetailRegistry,
    navigation: NavigationFlag,
    back_target: String,
    sink: Box<dyn DiagnosticSink>,
}

impl<'a> ProjectPage<'a> {
    pub fn new(
        id: impl Into<String>,
        projects: &'a ProjectRegistry,
        details: &'a ProjectDetailRegistry,
    ) -> Self {
        Self {
            id: id.into(),
            projects,
            details,
            navigation: NavigationFlag::default(),
            back_target: String::new(),
            sink: Box::new(LogSink),
        }
    }

    pub fn with_navigation(mut self, flag: NavigationFlag, back_target: impl Into<String>) -> Self {
        self.navigation = flag;
        self.back_target = back_target.into();
        self
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn render_found(
        &self,
        ctx: &mut RenderContext,
        record: &ProjectRecord,
    ) -> Result<String, RenderError> {
        let mut sections = Vec::new();
        if let Some(back) = render_back_link(self.navigation, &self.back_target) {
            sections.push(back);
        }
        sections.push(ctx.enter(COMPONENT_PROJECT_HEADER, |_| {
            Ok(render_project_card(record))
        })?);
        sections.push(ctx.enter(COMPONENT_PROJECT_DETAIL, |_| {
            self.details
                .get_by_id(&record.id)
                .map(render_project_detail)
                .ok_or_else(|| {
                    RenderError::new(
                        COMPONENT_PROJECT_DETAIL,
                        format!("no detail content for project {:?}", record.id),
                    )
                })
        })?);
        Ok(sections.join("\n\n"))
    }

    fn render_detail_only(
        &self,
        ctx: &mut RenderContext,
        detail: &ProjectDetail,
    ) -> Result<String, RenderError> {
        let mut sections = Vec::new();
        if let Some(back) = render_back_link(self.navigation, &self.back_target) {
            sections.push(back);
        }
        sections.push(ctx.enter(COMPONENT_PROJECT_DETAIL, |_| {
            Ok(render_project_detail(detail))
        })?);
        Ok(sections.join("\n\n"))
    }
}

impl Subtree for ProjectPage<'_> {
    type Output = String;

    fn render(&mut self, ctx: &mut RenderContext) -> Result<String, RenderError> {
        ctx.enter(COMPONENT_PROJECT_PAGE, |ctx| {
            if let Some(record) = self.projects.get_by_id(&self.id) {
                return self.render_found(ctx, record);
            }
            match self.details.get_by_id(&self.id) {
                Some(detail) => self.render_detail_only(ctx, detail),
                None => {
                    emit_event(
                        self.sink.as_ref(),
                        DiagnosticEvent::warn(
                            CHANNEL_REGISTRY_PROJECT_LOOKUP_FAILED,
                            format!("no project registered under {:?}", self.id),
                            json!({ "id": self.id }),
                        ),
                    );
                    Ok(render_not_found(&self.id))
                }
            }
        })
    }
}

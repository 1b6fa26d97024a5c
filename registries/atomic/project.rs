/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashMap;
use std::sync::OnceLock;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const PROJECT_ID_IMSOP: &str = "imsop";
pub(crate) const PROJECT_ID_SAP_BTP_AI_HUB: &str = "sap-btp-ai-hub";

static PROJECTS: OnceLock<ProjectRegistry> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Cyan,
    Blue,
    Purple,
    Green,
    Red,
    Indigo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTag {
    pub label: String,
    pub color: TagColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub description: String,
    pub tags: Vec<ProjectTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub is_external: bool,
    pub gradient: Gradient,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectRegistryError {
    #[error("project id {0:?} is already registered")]
    DuplicateId(String),
    #[error("project registry needs at least one record")]
    Empty,
}

/// Project cards in the order they were registered.
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    records: Vec<ProjectRecord>,
    index: HashMap<String, usize>,
}

impl ProjectRegistry {
    /// Build a registry from `records`, rejecting duplicate ids and empty
    /// input.
    pub fn from_records(
        records: impl IntoIterator<Item = ProjectRecord>,
    ) -> Result<Self, ProjectRegistryError> {
        let mut registry = Self::empty();
        for record in records {
            registry.register(record)?;
        }
        if registry.records.is_empty() {
            return Err(ProjectRegistryError::Empty);
        }
        Ok(registry)
    }

    fn empty() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn register(&mut self, record: ProjectRecord) -> Result<(), ProjectRegistryError> {
        if self.index.contains_key(&record.id) {
            return Err(ProjectRegistryError::DuplicateId(record.id));
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn core_seed() -> Self {
        let mut registry = Self::empty();
        for record in seed_records() {
            if let Err(error) = registry.register(record) {
                warn!("Skipping seed project: {error}");
            }
        }
        registry
    }

    /// Exact, case-sensitive lookup.
    pub fn get_by_id(&self, id: &str) -> Option<&ProjectRecord> {
        let found = self.index.get(id).map(|&slot| &self.records[slot]);
        if found.is_none() {
            debug!("project lookup missed: {id:?}");
        }
        found
    }

    pub fn get_all(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::core_seed()
    }
}

/// Process-wide registry, built on first use.
pub fn projects() -> &'static ProjectRegistry {
    PROJECTS.get_or_init(ProjectRegistry::core_seed)
}

fn tags(labels: &[&str], color: TagColor) -> Vec<ProjectTag> {
    labels
        .iter()
        .map(|label| ProjectTag {
            label: (*label).to_string(),
            color,
        })
        .collect()
}

fn seed_records() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: PROJECT_ID_IMSOP.to_string(),
            title: "IMSOP".to_string(),
            subtitle: Some("Intelligent Multi-Cloud Supply Chain & Operations Platform".to_string()),
            description: "Enterprise-grade microservices architecture with 7 bounded contexts, \
                          serving 10M+ requests per day with 99.99% uptime SLA."
                .to_string(),
            tags: tags(
                &[".NET Core", "Python", "Kubernetes", "Azure", "AWS", "Kafka", "Terraform"],
                TagColor::Cyan,
            ),
            link: Some("/projects/imsop".to_string()),
            is_external: false,
            gradient: Gradient {
                from: "from-cyan-500".to_string(),
                to: "to-teal-600".to_string(),
            },
        },
        ProjectRecord {
            id: PROJECT_ID_SAP_BTP_AI_HUB.to_string(),
            title: "SAP BTP AI Learning Hub".to_string(),
            subtitle: None,
            description: "Interactive learning platform with hands-on tutorials, AI playground, \
                          and architecture builder for mastering SAP Business Technology \
                          Platform AI solutions."
                .to_string(),
            tags: tags(
                &["React", "TypeScript", "SAP BTP", "AI/ML", "GitHub Pages"],
                TagColor::Blue,
            ),
            link: Some("/projects/sap-btp-ai-hub".to_string()),
            is_external: false,
            gradient: Gradient {
                from: "from-blue-600".to_string(),
                to: "to-indigo-700".to_string(),
            },
        },
    ]
}

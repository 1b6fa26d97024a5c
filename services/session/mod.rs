/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Session-scoped storage for the navigation referrer marker.

mod file_store;

pub use file_store::JsonFileSessionStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SESSION_MARKER_KEY: &str = "navigation.referrer";

/// Where the visitor arrived from, ordered from weakest to strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReferrerMarker {
    Direct,
    External,
    FeaturedProjects,
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session store encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Capability for reading and writing the persisted marker.
///
/// Reads are infallible: anything that cannot be read counts as no marker.
pub trait MarkerStore {
    fn read_marker(&self) -> Option<ReferrerMarker>;
    fn write_marker(&mut self, marker: ReferrerMarker) -> Result<(), SessionStoreError>;
    fn clear(&mut self) -> Result<(), SessionStoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySessionStore {
    marker: Option<ReferrerMarker>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(marker: ReferrerMarker) -> Self {
        Self {
            marker: Some(marker),
        }
    }
}

impl MarkerStore for MemorySessionStore {
    fn read_marker(&self) -> Option<ReferrerMarker> {
        self.marker
    }

    fn write_marker(&mut self, marker: ReferrerMarker) -> Result<(), SessionStoreError> {
        self.marker = Some(marker);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionStoreError> {
        self.marker = None;
        Ok(())
    }
}

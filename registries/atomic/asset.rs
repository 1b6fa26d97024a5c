/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Asset path resolution under the site base path.

use std::sync::OnceLock;

use thiserror::Error;

use crate::prefs::{BASE_PATH_ENV, process_env};

pub const DEFAULT_BASE_PATH: &str = "/";
pub const PROFILE_IMAGE_PATH: &str = "images/profile.jpg";

static PROCESS_BASE_PATH: OnceLock<String> = OnceLock::new();
static PROFILE_IMAGE: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetPathError {
    #[error("asset path {0:?} walks above the base path")]
    ParentTraversal(String),
    #[error("asset path {0:?} contains a control character or backslash")]
    InvalidCharacter(String),
}

/// Fix the process-wide base path. Only the first call wins; returns whether
/// this call did.
pub fn install_process_base_path(base_path: &str) -> bool {
    PROCESS_BASE_PATH.set(base_path.to_string()).is_ok()
}

/// The process-wide base path, read once from the environment when nobody
/// installed one.
pub fn process_base_path() -> &'static str {
    PROCESS_BASE_PATH.get_or_init(|| {
        process_env(BASE_PATH_ENV)
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string())
    })
}

/// Join `base` and `relative` with exactly one separator between them.
///
/// Runs of separators inside `relative` collapse to one; an empty
/// `relative` yields `base` unchanged. `base` itself is kept verbatim apart
/// from its trailing separators, so absolute CDN bases survive.
pub fn join_asset_path(base: &str, relative: &str) -> String {
    let base = if base.is_empty() { DEFAULT_BASE_PATH } else { base };

    let mut segments = relative.split('/').filter(|segment| !segment.is_empty()).peekable();
    if segments.peek().is_none() {
        return base.to_string();
    }

    let mut joined = base.trim_end_matches('/').to_string();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment);
    }
    if relative.ends_with('/') {
        joined.push('/');
    }
    joined
}

fn validate_relative(relative: &str) -> Result<(), AssetPathError> {
    if relative.chars().any(|c| c.is_control() || c == '\\') {
        return Err(AssetPathError::InvalidCharacter(relative.to_string()));
    }
    if relative.split('/').any(|segment| segment == "..") {
        return Err(AssetPathError::ParentTraversal(relative.to_string()));
    }
    Ok(())
}

/// Resolve `relative` under `base`, or under the process base path when
/// `base` is `None`.
pub fn resolve(relative: &str, base: Option<&str>) -> Result<String, AssetPathError> {
    validate_relative(relative)?;
    Ok(join_asset_path(base.unwrap_or_else(process_base_path), relative))
}

/// Profile image under the process base path. Computed once.
pub fn resolve_profile_image() -> &'static str {
    PROFILE_IMAGE.get_or_init(|| join_asset_path(process_base_path(), PROFILE_IMAGE_PATH))
}

/// Resolver bound to an injected base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePathResolver {
    base_path: String,
}

impl ImagePathResolver {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn from_process_default() -> Self {
        Self::new(process_base_path())
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn resolve(&self, relative: &str) -> Result<String, AssetPathError> {
        resolve(relative, Some(self.base_path.as_str()))
    }

    pub fn resolve_profile_image(&self) -> String {
        join_asset_path(&self.base_path, PROFILE_IMAGE_PATH)
    }
}

impl Default for ImagePathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

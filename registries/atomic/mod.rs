/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

pub mod asset;
pub mod project;
pub mod project_detail;

pub use asset::{AssetPathError, ImagePathResolver};
pub use project::{ProjectRecord, ProjectRegistry, ProjectRegistryError, projects};
pub use project_detail::{ProjectDetail, ProjectDetailRegistry, project_details};

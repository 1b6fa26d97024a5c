/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde_json::Value;

use super::{MarkerStore, ReferrerMarker, SESSION_MARKER_KEY, SessionStoreError};

/// Session store kept as a JSON object on disk, so the marker survives
/// between runs of the command line host.
#[derive(Debug, Clone)]
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> BTreeMap<String, Value> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return BTreeMap::new(),
            Err(error) => {
                warn!("Failed to read session store {:?}: {error}", self.path);
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(error) => {
                warn!("Ignoring corrupt session store {:?}: {error}", self.path);
                BTreeMap::new()
            }
        }
    }

    fn store_entries(&self, entries: &BTreeMap<String, Value>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("json.tmp");
        let written = fs::write(&staging, encoded).and_then(|()| fs::rename(&staging, &self.path));
        if let Err(error) = written {
            if let Err(cleanup) = fs::remove_file(&staging)
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!("Failed to remove session staging file {staging:?}: {cleanup}");
            }
            return Err(error.into());
        }
        Ok(())
    }
}

impl MarkerStore for JsonFileSessionStore {
    fn read_marker(&self) -> Option<ReferrerMarker> {
        let entries = self.load_entries();
        let value = entries.get(SESSION_MARKER_KEY)?;
        serde_json::from_value(value.clone()).ok()
    }

    fn write_marker(&mut self, marker: ReferrerMarker) -> Result<(), SessionStoreError> {
        let mut entries = self.load_entries();
        entries.insert(SESSION_MARKER_KEY.to_string(), serde_json::to_value(marker)?);
        self.store_entries(&entries)
    }

    fn clear(&mut self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

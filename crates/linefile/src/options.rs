// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction options for a line file

use crate::backend::{self, Backend};
use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Options used to construct a [`crate::File`]
///
/// Deserializable so hosts can embed it in their own config files:
///
/// ```toml
/// path = "/var/lib/app"
/// name = "events"
/// extension = "log"
/// backend = "aio"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOptions {
    /// Directory holding the file
    pub path: PathBuf,
    /// Base name, without extension
    pub name: String,
    pub extension: String,
    /// Backend selector: `"sync"` (default when empty) or `"aio"`
    pub backend: String,
    /// Leave the file closed after construction
    pub no_open: bool,
    /// Sync the handle to disk when closing
    pub sync_on_close: bool,
}

impl FileOptions {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            extension: extension.into(),
            ..Self::default()
        }
    }

    pub fn backend(mut self, selector: impl Into<String>) -> Self {
        self.backend = selector.into();
        self
    }

    pub fn no_open(mut self, no_open: bool) -> Self {
        self.no_open = no_open;
        self
    }

    pub fn sync_on_close(mut self, sync_on_close: bool) -> Self {
        self.sync_on_close = sync_on_close;
        self
    }

    /// Check required fields and the backend selector
    pub fn validate(&self) -> Result<(), FileError> {
        if self.path.as_os_str().is_empty() {
            return Err(FileError::InvalidOptions("path is empty"));
        }
        if self.name.is_empty() {
            return Err(FileError::InvalidOptions("name is empty"));
        }
        if self.extension.is_empty() {
            return Err(FileError::InvalidOptions("extension is empty"));
        }
        backend::check_selector(&self.backend)
    }

    /// `path/name.extension`
    pub fn location(&self) -> PathBuf {
        self.path.join(format!("{}.{}", self.name, self.extension))
    }

    /// Build the backend named by the selector
    pub(crate) fn build_backend(&self) -> Result<Arc<dyn Backend>, FileError> {
        backend::resolve(&self.backend)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;

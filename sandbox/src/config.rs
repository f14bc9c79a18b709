// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sandbox configuration, loaded from an optional JSON file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for a sandbox run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Number of top-level squads to spawn.
    pub squad_count: usize,
    /// Number of members spawned under each squad.
    pub members_per_squad: usize,
    /// Number of simulated ticks.
    pub ticks: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            squad_count: 2,
            members_per_squad: 3,
            ticks: 4,
        }
    }
}

impl SandboxConfig {
    /// Parses a configuration from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read sandbox config '{}'", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid sandbox config '{}'", path.display()))
    }
}

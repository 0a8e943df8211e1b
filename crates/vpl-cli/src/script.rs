//! Replay scripts: a JSON description of an editing session.
//!
//! ```json
//! {
//!   "slots": 3,
//!   "advanced": false,
//!   "steps": [
//!     { "op": "add", "row": 0, "kind": "tap" },
//!     { "op": "click", "row": 0, "role": "event", "index": 0 },
//!     { "op": "drag", "from": 0, "to": 2, "role": "event" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use vpl_model::ButtonRole;

/// A whole session.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Number of slots, at rows `0..slots`.
    pub slots: usize,
    #[serde(default)]
    pub advanced: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Slot side named in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Event,
    Action,
}

impl From<Role> for ButtonRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Event => ButtonRole::Event,
            Role::Action => ButtonRole::Action,
        }
    }
}

/// One editing operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Step {
    /// Place a fresh button; the kind decides the side.
    Add { row: usize, kind: String },
    /// Click a sub-button.
    Click { row: usize, role: Role, index: usize },
    /// Cycle a memory selector of the event button.
    ClickMemory { row: usize, index: usize },
    /// Switch advanced mode on every slot.
    Advanced { enabled: bool },
    /// Move a button from one slot to another.
    Drag { from: usize, to: usize, role: Role },
    /// Drag a new button out of the palette.
    PaletteDrop { kind: String, row: usize },
    /// Deliver hand-made payload bytes.
    DropRaw {
        row: usize,
        tag: String,
        hex: String,
    },
    /// Take a button away without dropping it anywhere.
    Detach { row: usize, role: Role },
    Reconcile,
}

impl Step {
    /// Name used in reports and logs.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Click { .. } => "click",
            Self::ClickMemory { .. } => "click-memory",
            Self::Advanced { .. } => "advanced",
            Self::Drag { .. } => "drag",
            Self::PaletteDrop { .. } => "palette-drop",
            Self::DropRaw { .. } => "drop-raw",
            Self::Detach { .. } => "detach",
            Self::Reconcile => "reconcile",
        }
    }
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON or unknown steps.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse replay script")
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("load script {}", path.display()))
    }
}

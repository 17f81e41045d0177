//! Session scripts: a JSON list of grid actions replayed against the host.

use gridedit_editor::{KeyCode, SaveData};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Step {
    /// Start editing a cell; any open edit is closed first
    Open {
        x: usize,
        y: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        val: Option<SaveData>,
        /// Registry name overriding the column's editor
        #[serde(default, skip_serializing_if = "Option::is_none")]
        editor: Option<String>,
    },

    /// Type characters into the editor
    Type { text: String },

    /// Press a single key
    Key { code: KeyCode },

    /// Discard the edit in progress
    Cancel,

    /// Unmount the editor
    Detach,

    /// Re-render the open editor
    Render,
}

pub fn load_script(path: &Path) -> anyhow::Result<Vec<Step>> {
    let content = std::fs::read_to_string(path)?;
    let steps: Vec<Step> = serde_json::from_str(&content)?;
    Ok(steps)
}

/// Script written by `gridedit init`
pub fn sample_script() -> Vec<Step> {
    vec![
        Step::Open {
            x: 0,
            y: 0,
            val: None,
            editor: None,
        },
        Step::Type {
            text: "Ada".to_string(),
        },
        Step::Key {
            code: KeyCode::Enter,
        },
        Step::Open {
            x: 0,
            y: 1,
            val: None,
            editor: None,
        },
        Step::Type {
            text: "Grace".to_string(),
        },
        Step::Detach,
        Step::Open {
            x: 0,
            y: 2,
            val: None,
            editor: Some("number".to_string()),
        },
        Step::Type {
            text: "42".to_string(),
        },
        Step::Key {
            code: KeyCode::Escape,
        },
    ]
}

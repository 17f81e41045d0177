//! Data shapes exchanged between the grid, the host and editors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value produced by an editor. An absent value is `Option::<SaveData>::None`.
pub type SaveData = Value;

/// Cell under edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCell {
    /// Column index
    pub x: usize,

    /// Row index
    pub y: usize,

    /// Current cell value, shown by the editor as its initial content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<SaveData>,
}

impl EditCell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y, val: None }
    }

    pub fn with_value(mut self, val: impl Into<SaveData>) -> Self {
        self.val = Some(val.into());
        self
    }

    /// Identity comparison; the carried value is ignored
    pub fn same_cell(&self, other: &EditCell) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Column descriptor. The host never looks inside it; it is handed to the
/// editor factory as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRegular {
    pub prop: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Registry key of a custom editor for this column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnRegular {
    pub fn new(prop: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            ..Self::default()
        }
    }

    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = Some(editor.into());
        self
    }
}

/// Committed value plus its coordinates, as emitted in `cellEdit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDataDetails {
    pub rg_col: usize,
    pub rg_row: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub val: Option<SaveData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_focus: Option<bool>,
}

/// Text form of a value for display in a text input
pub fn save_data_to_text(val: &SaveData) -> String {
    match val {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

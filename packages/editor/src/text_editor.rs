//! Default text editor, used when the grid supplies no editor factory.

use crate::cell::{save_data_to_text, ColumnRegular, SaveData};
use crate::editor::{Editor, EditorBinding, SaveCallback};
use crate::input::{KeyCode, KeyEvent};
use gridedit_vdom::{h, VNode};
use serde_json::Value;

/// Class of the rendered `<input>`
pub const EDIT_INPUT: &str = "edit-input";

/// Single-line `<input>` editor.
///
/// Enter and Tab commit through the save callback (Tab passes
/// `prevent_focus = true`); there is no close path of its own, so ending
/// the session is left to the grid.
pub struct TextEditor {
    binding: EditorBinding,
    column: Option<ColumnRegular>,
    save_callback: SaveCallback,
}

impl TextEditor {
    pub fn new(column: Option<ColumnRegular>, save_callback: SaveCallback) -> Self {
        Self {
            binding: EditorBinding::default(),
            column,
            save_callback,
        }
    }

    pub fn column(&self) -> Option<&ColumnRegular> {
        self.column.as_ref()
    }

    fn initial_text(&self) -> String {
        self.binding
            .edit_cell
            .as_ref()
            .and_then(|cell| cell.val.as_ref())
            .map(save_data_to_text)
            .unwrap_or_default()
    }
}

impl Editor for TextEditor {
    fn binding(&self) -> &EditorBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut EditorBinding {
        &mut self.binding
    }

    fn render(&mut self) -> VNode {
        h("input")
            .with_attr("type", "text")
            .with_class(EDIT_INPUT)
            .with_attr("value", self.initial_text())
    }

    fn get_value(&self) -> Option<SaveData> {
        self.binding
            .element
            .as_ref()
            .map(|input| Value::String(input.value()))
    }

    fn component_did_render(&mut self) {
        if let Some(input) = &self.binding.element {
            input.focus();
        }
    }

    fn on_key(&mut self, key: &KeyEvent) {
        let Some(input) = self.binding.element.clone() else {
            return;
        };

        match key.code {
            KeyCode::Char(c) => input.insert_text(c.encode_utf8(&mut [0; 4])),
            KeyCode::Backspace => input.delete_backward(),
            KeyCode::Enter | KeyCode::Tab if !key.is_composing => {
                // blur before save, focus belongs to the grid from here
                input.blur();
                let is_tab = key.code == KeyCode::Tab;
                self.save_callback.call(self.get_value(), Some(is_tab));
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

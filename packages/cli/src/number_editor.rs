//! Numeric cell editor registered by the scripted grid as `number`.

use gridedit_editor::{
    editor_factory, h, save_data_to_text, CloseCallback, ColumnRegular, Editor, EditorBinding,
    EditorFactory, KeyCode, KeyEvent, SaveCallback, SaveData, VNode, EDIT_INPUT,
};
use serde_json::{Number, Value};

pub struct NumberEditor {
    binding: EditorBinding,
    on_save: SaveCallback,
    on_close: Option<CloseCallback>,
}

impl NumberEditor {
    pub fn new(
        _column: Option<ColumnRegular>,
        on_save: SaveCallback,
        on_close: Option<CloseCallback>,
    ) -> Self {
        Self {
            binding: EditorBinding::default(),
            on_save,
            on_close,
        }
    }

    pub fn factory() -> EditorFactory {
        editor_factory(NumberEditor::new)
    }

    fn text(&self) -> Option<String> {
        self.binding.element.as_ref().map(|input| input.value())
    }
}

/// Parse editor text into a JSON number
fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Value::from(int));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

impl Editor for NumberEditor {
    fn binding(&self) -> &EditorBinding {
        &self.binding
    }

    fn binding_mut(&mut self) -> &mut EditorBinding {
        &mut self.binding
    }

    fn render(&mut self) -> VNode {
        let value = self
            .binding
            .edit_cell
            .as_ref()
            .and_then(|cell| cell.val.as_ref())
            .map(save_data_to_text)
            .unwrap_or_default();

        h("input")
            .with_attr("type", "number")
            .with_class(EDIT_INPUT)
            .with_attr("value", value)
    }

    /// Numbers when the text parses, the raw text otherwise
    fn get_value(&self) -> Option<SaveData> {
        let text = self.text()?;
        if text.trim().is_empty() {
            return Some(Value::Null);
        }
        Some(parse_number(&text).unwrap_or(Value::String(text)))
    }

    /// Never autosave text that is not a number
    fn before_auto_save(&mut self, val: Option<&SaveData>) -> bool {
        !matches!(val, Some(Value::String(_)))
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
            KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | 'e') => {
                input.insert_text(c.encode_utf8(&mut [0; 4]));
            }
            KeyCode::Char(_) => {}
            KeyCode::Backspace => input.delete_backward(),
            KeyCode::Enter if !key.is_composing => {
                input.blur();
                self.on_save.call(self.get_value(), Some(false));
            }
            KeyCode::Tab => {
                if let Some(on_close) = &self.on_close {
                    on_close.call(Some(true));
                }
            }
            KeyCode::Escape => {
                if let Some(on_close) = &self.on_close {
                    on_close.call(None);
                }
            }
            KeyCode::Enter => {}
        }
    }

    fn name(&self) -> &'static str {
        "number"
    }
}

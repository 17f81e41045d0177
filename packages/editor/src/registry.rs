//! Named editor factories, looked up through a column's `editor` field.

use crate::cell::ColumnRegular;
use crate::editor::EditorFactory;
use crate::errors::EditorError;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

#[derive(Clone, Default)]
pub struct EditorRegistry {
    editors: HashMap<String, EditorFactory>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, returning the one it replaced
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: EditorFactory,
    ) -> Option<EditorFactory> {
        let name = name.into();
        debug!(editor = %name, "Registering editor");
        self.editors.insert(name, factory)
    }

    pub fn get(&self, name: &str) -> Result<EditorFactory, EditorError> {
        self.editors
            .get(name)
            .cloned()
            .ok_or_else(|| EditorError::UnknownEditor(name.to_string()))
    }

    /// Factory for a column. `None` means the default text editor applies,
    /// either because the column names no editor or the name is unknown.
    pub fn resolve(&self, column: &ColumnRegular) -> Option<EditorFactory> {
        let name = column.editor.as_deref()?;
        let factory = self.editors.get(name).cloned();
        if factory.is_none() {
            debug!(editor = name, column = %column.prop, "Column editor not registered");
        }
        factory
    }

    pub fn contains(&self, name: &str) -> bool {
        self.editors.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.editors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

impl fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorRegistry")
            .field("editors", &self.names())
            .finish()
    }
}

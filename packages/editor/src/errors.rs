//! Error types for the editor host

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("No editor is active; render the host before dispatching input")]
    NoActiveEditor,

    #[error("Editor '{0}' is not registered")]
    UnknownEditor(String),
}

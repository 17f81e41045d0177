//! # Gridedit Editor
//!
//! Cell-edit lifecycle controller for a data grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ grid: edit cell, column, editor factory     │
//! └─────────────────────────────────────────────┘
//!                     ↓ props
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorHost                          │
//! │  - Lazily builds one editor per session     │
//! │  - Binds the live element into the editor   │
//! │  - At most one cellEdit per session         │
//! │  - Autosave on teardown unless finalized    │
//! └─────────────────────────────────────────────┘
//!                     ↓ cellEdit / closeEdit
//! ┌─────────────────────────────────────────────┐
//! │ grid: commit value, move focus, unmount     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridedit_editor::{EditCell, EditorHost, EventLog, HostProps, KeyCode, KeyEvent};
//! use gridedit_vdom::mount;
//!
//! let events = EventLog::new();
//! let mut host = EditorHost::new(HostProps::new(EditCell::new(2, 5)), events.clone());
//!
//! // Render, mount, then let the host bind the live element
//! let root = mount(&host.render().unwrap());
//! host.did_render(&root);
//!
//! for key in KeyEvent::typed("abc") {
//!     host.dispatch_key(&key)?;
//! }
//!
//! // Detaching without an explicit save autosaves
//! host.disconnect();
//! assert_eq!(events.cell_edits()[0].rg_row, 5);
//! ```

mod cell;
mod editor;
mod errors;
mod events;
mod host;
mod input;
mod registry;
mod text_editor;

pub use cell::{save_data_to_text, ColumnRegular, EditCell, SaveData, SaveDataDetails};
pub use editor::{
    editor_factory, CloseCallback, Editor, EditorBinding, EditorFactory, EditorRequest,
    SaveCallback,
};
pub use errors::EditorError;
pub use events::{EventLog, EventSink, HostEvent};
pub use host::{EditorHost, HostProps, SessionState, EDIT_INPUT_WR};
pub use input::{KeyCode, KeyEvent};
pub use registry::EditorRegistry;
pub use text_editor::{TextEditor, EDIT_INPUT};

// Re-export the node types editors render with
pub use gridedit_vdom::{h, ElementRef, VNode};

//! # Editor Capability
//!
//! The contract every cell editor satisfies, default or custom.
//!
//! ## Design
//!
//! Only [`Editor::render`] and the binding accessors are required. Every
//! other hook has a default that means "capability not present":
//! - `get_value` → `None` (nothing to autosave)
//! - `before_auto_save` → `true` (autosave allowed)
//! - `component_did_render` / `disconnected_callback` / `on_key` → no-op
//!
//! Editors talk back to the host through [`SaveCallback`] and
//! [`CloseCallback`]. Calling either enqueues an [`EditorRequest`]; the host
//! processes the queue as soon as the call into the editor returns, so an
//! editor never re-enters the host while the host is driving it.

use crate::cell::{ColumnRegular, EditCell, SaveData};
use crate::input::KeyEvent;
use gridedit_vdom::{ElementRef, VNode};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::trace;

/// State the host writes into an editor: the live element it rendered
/// into, and the cell being edited.
#[derive(Debug, Clone, Default)]
pub struct EditorBinding {
    pub element: Option<ElementRef>,
    pub edit_cell: Option<EditCell>,
}

/// Cell editor
pub trait Editor {
    fn binding(&self) -> &EditorBinding;

    fn binding_mut(&mut self) -> &mut EditorBinding;

    /// Produce the editor's tree for the bound cell. Called on every host
    /// render while the session is active; build nodes with
    /// [`gridedit_vdom::h`].
    fn render(&mut self) -> VNode;

    /// Current edited value
    fn get_value(&self) -> Option<SaveData> {
        None
    }

    /// Return `false` to veto an autosave in progress
    fn before_auto_save(&mut self, _val: Option<&SaveData>) -> bool {
        true
    }

    /// Runs after every render once `element` is bound
    fn component_did_render(&mut self) {}

    /// Runs at teardown, before `element` is cleared
    fn disconnected_callback(&mut self) {}

    /// User input forwarded by the host
    fn on_key(&mut self, _key: &KeyEvent) {}

    /// Debug name for logging
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Action requested by an editor through its callbacks
#[derive(Debug, Clone, PartialEq)]
pub enum EditorRequest {
    Save {
        val: Option<SaveData>,
        prevent_focus: Option<bool>,
    },
    Close {
        focus_next: Option<bool>,
    },
}

pub(crate) type RequestQueue = Rc<RefCell<VecDeque<EditorRequest>>>;

/// Routes an editor's save action into the host's save path
#[derive(Debug, Clone)]
pub struct SaveCallback {
    queue: RequestQueue,
}

impl SaveCallback {
    pub(crate) fn new(queue: RequestQueue) -> Self {
        Self { queue }
    }

    pub fn call(&self, val: Option<SaveData>, prevent_focus: Option<bool>) {
        trace!(?val, ?prevent_focus, "Editor requested save");
        self.queue.borrow_mut().push_back(EditorRequest::Save { val, prevent_focus });
    }
}

/// Lets an editor end the session on its own initiative
#[derive(Debug, Clone)]
pub struct CloseCallback {
    queue: RequestQueue,
}

impl CloseCallback {
    pub(crate) fn new(queue: RequestQueue) -> Self {
        Self { queue }
    }

    pub fn call(&self, focus_next: Option<bool>) {
        trace!(?focus_next, "Editor requested close");
        self.queue.borrow_mut().push_back(EditorRequest::Close { focus_next });
    }
}

/// Builds a custom editor for one session
pub type EditorFactory =
    Rc<dyn Fn(Option<ColumnRegular>, SaveCallback, Option<CloseCallback>) -> Box<dyn Editor>>;

/// Wrap a constructor function as an [`EditorFactory`]
pub fn editor_factory<E, F>(build: F) -> EditorFactory
where
    E: Editor + 'static,
    F: Fn(Option<ColumnRegular>, SaveCallback, Option<CloseCallback>) -> E + 'static,
{
    Rc::new(
        move |column: Option<ColumnRegular>,
              on_save: SaveCallback,
              on_close: Option<CloseCallback>|
              -> Box<dyn Editor> { Box::new(build(column, on_save, on_close)) },
    )
}

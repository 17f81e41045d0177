//! # Editor Host
//!
//! Owns the editor of one edit session and mediates between it and the
//! grid.
//!
//! ## Session lifecycle
//!
//! ```text
//!   Empty ──render──▶ Active ──save / close / cancel──▶ Saved
//!                      │  ▲                               │
//!                      └──┘ re-render                     │
//!                      │                                  │
//!                      └───────────disconnect─────────────┴──▶ Disposed
//! ```
//!
//! - The first `render` of a session builds the editor (the grid's factory
//!   if any, otherwise [`TextEditor`]).
//! - `save_running` records that the session was finalized: an explicit
//!   save, an editor-initiated close, or `cancel()`. Teardown autosaves
//!   only while it is still false.
//! - At most one `cellEdit` is emitted per session.
//! - `disconnect` (also run on drop) releases the editor and clears its
//!   element reference. A later `render` starts a fresh session.
//!
//! The host is single-threaded by construction (`Rc` inside), which is what
//! lets a plain `bool` serve as the finalization guard.

use crate::cell::{ColumnRegular, EditCell, SaveData, SaveDataDetails};
use crate::editor::{CloseCallback, Editor, EditorFactory, EditorRequest, RequestQueue, SaveCallback};
use crate::errors::EditorError;
use crate::events::{EventLog, EventSink, HostEvent};
use crate::input::KeyEvent;
use crate::text_editor::TextEditor;
use gridedit_vdom::{h, ElementRef, VNode};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Class of the container wrapping the editor's tree
pub const EDIT_INPUT_WR: &str = "edit-input-wrapper";

/// Inputs supplied by the grid
#[derive(Clone, Default)]
pub struct HostProps {
    pub edit_cell: Option<EditCell>,
    pub column: Option<ColumnRegular>,
    /// Custom editor; the default text editor is used when absent
    pub editor: Option<EditorFactory>,
    /// Reserved. Carried for the grid, not read by the host.
    pub save_on_close: bool,
}

impl HostProps {
    pub fn new(edit_cell: EditCell) -> Self {
        Self {
            edit_cell: Some(edit_cell),
            ..Self::default()
        }
    }

    pub fn with_column(mut self, column: ColumnRegular) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_editor(mut self, editor: EditorFactory) -> Self {
        self.editor = Some(editor);
        self
    }
}

impl fmt::Debug for HostProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostProps")
            .field("edit_cell", &self.edit_cell)
            .field("column", &self.column)
            .field("editor", &self.editor.as_ref().map(|_| "<factory>"))
            .field("save_on_close", &self.save_on_close)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No editor built yet
    Empty,
    /// Editor live, not finalized
    Active,
    /// Editor live, finalized by save, close or cancel
    Saved,
    /// Session torn down
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Empty,
    Live,
    Disposed,
}

pub struct EditorHost<S: EventSink = EventLog> {
    props: HostProps,
    sink: S,
    current_editor: Option<Box<dyn Editor>>,
    requests: RequestQueue,
    save_running: bool,
    cell_edit_emitted: bool,
    phase: Phase,
}

impl<S: EventSink> EditorHost<S> {
    pub fn new(props: HostProps, sink: S) -> Self {
        Self {
            props,
            sink,
            current_editor: None,
            requests: RequestQueue::default(),
            save_running: false,
            cell_edit_emitted: false,
            phase: Phase::Empty,
        }
    }

    pub fn props(&self) -> &HostProps {
        &self.props
    }

    /// Bind a cell. Moving to a different cell, or unbinding, while a
    /// session is live ends that session first and autosaves into the cell
    /// it was editing; an editor never spans two cells.
    pub fn set_edit_cell(&mut self, edit_cell: Option<EditCell>) {
        let moved = match (&self.props.edit_cell, &edit_cell) {
            (Some(current), Some(next)) => !current.same_cell(next),
            (None, None) => false,
            _ => true,
        };
        if moved && self.current_editor.is_some() {
            debug!("Edit cell changed during session, ending it");
            self.disconnect();
        }
        self.props.edit_cell = edit_cell;
    }

    /// Takes effect from the next session
    pub fn set_column(&mut self, column: Option<ColumnRegular>) {
        self.props.column = column;
    }

    /// Takes effect from the next session
    pub fn set_editor(&mut self, editor: Option<EditorFactory>) {
        self.props.editor = editor;
    }

    pub fn set_save_on_close(&mut self, save_on_close: bool) {
        self.props.save_on_close = save_on_close;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Empty => SessionState::Empty,
            Phase::Live if self.save_running => SessionState::Saved,
            Phase::Live => SessionState::Active,
            Phase::Disposed => SessionState::Disposed,
        }
    }

    pub fn is_save_running(&self) -> bool {
        self.save_running
    }

    pub fn has_editor(&self) -> bool {
        self.current_editor.is_some()
    }

    /// Element currently bound into the editor
    pub fn editor_element(&self) -> Option<ElementRef> {
        self.current_editor
            .as_ref()
            .and_then(|editor| editor.binding().element.clone())
    }

    /// Finalize the session without saving. Teardown will not autosave.
    pub fn cancel(&mut self) {
        debug!("Edit cancelled");
        self.save_running = true;
    }

    /// Build the editor if needed and render it inside the wrapper.
    #[instrument(skip(self), fields(cell = ?self.props.edit_cell.as_ref().map(|c| (c.x, c.y))))]
    pub fn render(&mut self) -> Option<VNode> {
        self.ensure_editor();

        let edit_cell = self.props.edit_cell.clone();
        let node = {
            let editor = self.current_editor.as_mut()?;
            editor.binding_mut().edit_cell = edit_cell;
            editor.render()
        };
        self.process_requests();

        Some(h("div").with_class(EDIT_INPUT_WR).with_child(node))
    }

    /// Called by the grid once the rendered tree is mounted; `host_element`
    /// is the live wrapper.
    pub fn did_render(&mut self, host_element: &ElementRef) {
        let Some(editor) = self.current_editor.as_mut() else {
            return;
        };
        editor.binding_mut().element = host_element.first_element_child();
        editor.component_did_render();
        self.process_requests();
    }

    /// Forward user input to the active editor
    #[instrument(skip(self), fields(code = ?key.code))]
    pub fn dispatch_key(&mut self, key: &KeyEvent) -> Result<(), EditorError> {
        let Some(editor) = self.current_editor.as_mut() else {
            warn!("Key event without an active editor");
            return Err(EditorError::NoActiveEditor);
        };
        editor.on_key(key);
        self.process_requests();
        Ok(())
    }

    /// Process requests an editor issued outside a host call
    pub fn flush(&mut self) {
        self.process_requests();
    }

    /// Save path. Without a bound cell the value is dropped.
    pub fn on_save(&mut self, val: Option<SaveData>, prevent_focus: Option<bool>) {
        self.save_running = true;

        let Some(edit_cell) = self.props.edit_cell.as_ref() else {
            debug!("No edit cell bound, dropping value");
            return;
        };
        if self.cell_edit_emitted {
            debug!("Session already committed, ignoring save");
            return;
        }

        let details = SaveDataDetails {
            rg_col: edit_cell.x,
            rg_row: edit_cell.y,
            val,
            prevent_focus,
        };
        self.cell_edit_emitted = true;
        debug!(rg_col = details.rg_col, rg_row = details.rg_row, "Emitting cellEdit");
        self.sink.emit(HostEvent::CellEdit(details));
    }

    /// Save triggered by teardown rather than by the user
    pub fn on_auto_save(&mut self) {
        self.save_running = true;

        let Some(editor) = self.current_editor.as_mut() else {
            debug!("No editor, nothing to autosave");
            return;
        };
        let val = editor.get_value();
        let allowed = editor.before_auto_save(val.as_ref());
        let name = editor.name();
        // a vetoing hook may have saved its own value
        self.process_requests();

        if !allowed {
            debug!(editor = name, "Autosave vetoed by editor");
            return;
        }
        self.on_save(val, Some(true));
    }

    /// Autosave unless the session was already finalized
    pub fn save_before_close(&mut self) {
        if !self.save_running {
            self.on_auto_save();
        }
    }

    /// End the session
    #[instrument(skip(self))]
    pub fn disconnect(&mut self) {
        // pending explicit requests win over the autosave
        self.process_requests();
        self.save_before_close();
        self.save_running = false;

        let Some(mut editor) = self.current_editor.take() else {
            return;
        };
        editor.disconnected_callback();
        editor.binding_mut().element = None;
        debug!(editor = editor.name(), "Editor released");
        drop(editor);

        let discarded = self.requests.borrow_mut().drain(..).count();
        if discarded > 0 {
            debug!(discarded, "Dropping requests issued during teardown");
        }
        self.cell_edit_emitted = false;
        self.phase = Phase::Disposed;
    }

    fn ensure_editor(&mut self) {
        if self.current_editor.is_some() {
            return;
        }
        self.save_running = false;
        self.cell_edit_emitted = false;
        self.requests = RequestQueue::default();

        let column = self.props.column.clone();
        let on_save = SaveCallback::new(self.requests.clone());
        let editor: Box<dyn Editor> = match &self.props.editor {
            Some(factory) => {
                let on_close = CloseCallback::new(self.requests.clone());
                factory(column, on_save, Some(on_close))
            }
            None => Box::new(TextEditor::new(column, on_save)),
        };

        debug!(editor = editor.name(), "Editor created");
        self.current_editor = Some(editor);
        self.phase = Phase::Live;
    }

    fn process_requests(&mut self) {
        loop {
            let request = self.requests.borrow_mut().pop_front();
            let Some(request) = request else {
                break;
            };
            match request {
                EditorRequest::Save { val, prevent_focus } => self.on_save(val, prevent_focus),
                EditorRequest::Close { focus_next } => {
                    self.save_running = true;
                    debug!(?focus_next, "Emitting closeEdit");
                    self.sink.emit(HostEvent::CloseEdit(focus_next));
                }
            }
        }
    }
}

impl<S: EventSink> Drop for EditorHost<S> {
    fn drop(&mut self) {
        if self.current_editor.is_some() {
            self.disconnect();
        }
    }
}

impl<S: EventSink> fmt::Debug for EditorHost<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorHost")
            .field("props", &self.props)
            .field("state", &self.state())
            .field(
                "editor",
                &self.current_editor.as_ref().map(|editor| editor.name()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{editor_factory, EditorBinding};
    use crate::input::KeyCode;
    use gridedit_vdom::mount;
    use serde_json::json;

    fn mounted(host: &mut EditorHost) -> ElementRef {
        let tree = host.render().unwrap();
        let root = mount(&tree);
        host.did_render(&root);
        root
    }

    struct Closing {
        binding: EditorBinding,
        on_close: Option<CloseCallback>,
    }

    impl Editor for Closing {
        fn binding(&self) -> &EditorBinding {
            &self.binding
        }

        fn binding_mut(&mut self) -> &mut EditorBinding {
            &mut self.binding
        }

        fn render(&mut self) -> VNode {
            h("select")
        }

        fn on_key(&mut self, key: &KeyEvent) {
            if key.code == KeyCode::Escape {
                if let Some(on_close) = &self.on_close {
                    on_close.call(Some(false));
                }
            }
        }
    }

    fn closing_factory() -> EditorFactory {
        editor_factory(|_column, _on_save, on_close| Closing {
            binding: EditorBinding::default(),
            on_close,
        })
    }

    #[test]
    fn test_state_transitions() {
        let log = EventLog::new();
        let mut host = EditorHost::new(HostProps::new(EditCell::new(0, 0)), log.clone());
        assert_eq!(host.state(), SessionState::Empty);

        mounted(&mut host);
        assert_eq!(host.state(), SessionState::Active);

        host.on_save(Some(json!("a")), None);
        assert_eq!(host.state(), SessionState::Saved);

        host.disconnect();
        assert_eq!(host.state(), SessionState::Disposed);
        assert!(!host.is_save_running());
        assert_eq!(log.cell_edits().len(), 1);
    }

    #[test]
    fn test_render_wraps_editor_tree() {
        let mut host = EditorHost::new(HostProps::new(EditCell::new(1, 2)), EventLog::new());
        let tree = host.render().unwrap();

        assert_eq!(tree.tag(), Some("div"));
        assert_eq!(tree.attr("class"), Some(EDIT_INPUT_WR));
        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].tag(), Some("input"));
    }

    #[test]
    fn test_did_render_binds_first_element_child() {
        let mut host = EditorHost::new(HostProps::new(EditCell::new(0, 0)), EventLog::new());
        let root = mounted(&mut host);

        let element = host.editor_element().unwrap();
        assert!(element.ptr_eq(&root.first_element_child().unwrap()));
        assert!(element.is_focused());
    }

    #[test]
    fn test_did_render_without_editor_is_noop() {
        let mut host = EditorHost::new(HostProps::default(), EventLog::new());
        host.did_render(&mount(&h("div")));
        assert!(!host.has_editor());
        assert_eq!(host.state(), SessionState::Empty);
    }

    #[test]
    fn test_dispatch_without_editor_errors() {
        let mut host = EditorHost::new(HostProps::default(), EventLog::new());
        let result = host.dispatch_key(&KeyEvent::new(KeyCode::Enter));
        assert_eq!(result, Err(EditorError::NoActiveEditor));
    }

    #[test]
    fn test_editor_close_emits_close_edit_and_finalizes() {
        let log = EventLog::new();
        let props = HostProps::new(EditCell::new(0, 0)).with_editor(closing_factory());
        let mut host = EditorHost::new(props, log.clone());
        mounted(&mut host);

        host.dispatch_key(&KeyEvent::new(KeyCode::Escape)).unwrap();
        assert_eq!(log.close_edits(), vec![Some(false)]);
        assert!(host.is_save_running());

        host.disconnect();
        assert!(log.cell_edits().is_empty());
    }

    #[test]
    fn test_second_save_in_session_is_ignored() {
        let log = EventLog::new();
        let mut host = EditorHost::new(HostProps::new(EditCell::new(3, 4)), log.clone());
        mounted(&mut host);

        host.on_save(Some(json!("first")), None);
        host.on_save(Some(json!("second")), None);
        host.disconnect();

        let edits = log.cell_edits();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].val, Some(json!("first")));
    }

    #[test]
    fn test_autosave_without_editor_emits_nothing() {
        let log = EventLog::new();
        let mut host = EditorHost::new(HostProps::new(EditCell::new(0, 0)), log.clone());

        host.on_auto_save();
        assert!(log.is_empty());
        assert!(host.is_save_running());
    }

    #[test]
    fn test_cancel_before_first_render_is_reset() {
        let log = EventLog::new();
        let mut host = EditorHost::new(HostProps::new(EditCell::new(0, 0)), log.clone());

        host.cancel();
        mounted(&mut host);
        assert!(!host.is_save_running());

        host.disconnect();
        assert_eq!(log.cell_edits().len(), 1);
    }

    #[test]
    fn test_changing_cell_ends_session() {
        let log = EventLog::new();
        let mut host = EditorHost::new(HostProps::new(EditCell::new(0, 0)), log.clone());
        mounted(&mut host);

        host.set_edit_cell(Some(EditCell::new(1, 0)));
        assert_eq!(host.state(), SessionState::Disposed);
        assert!(!host.has_editor());

        let edits = log.cell_edits();
        assert_eq!(edits.len(), 1);
        assert_eq!((edits[0].rg_col, edits[0].rg_row), (0, 0));

        mounted(&mut host);
        assert_eq!(host.state(), SessionState::Active);
    }

    #[test]
    fn test_unbinding_cell_ends_session_on_old_cell() {
        let log = EventLog::new();
        let mut host = EditorHost::new(HostProps::new(EditCell::new(3, 2)), log.clone());
        mounted(&mut host);

        host.set_edit_cell(None);
        assert_eq!(host.state(), SessionState::Disposed);
        assert!(!host.has_editor());

        let edits = log.cell_edits();
        assert_eq!(edits.len(), 1);
        assert_eq!((edits[0].rg_col, edits[0].rg_row), (3, 2));
    }

    #[test]
    fn test_rebinding_same_cell_keeps_session() {
        let mut host = EditorHost::new(HostProps::new(EditCell::new(0, 0)), EventLog::new());
        mounted(&mut host);

        host.set_edit_cell(Some(EditCell::new(0, 0).with_value("new")));
        assert_eq!(host.state(), SessionState::Active);
        assert!(host.has_editor());
    }

    #[test]
    fn test_drop_tears_down_live_session() {
        let log = EventLog::new();
        {
            let mut host = EditorHost::new(HostProps::new(EditCell::new(2, 5)), log.clone());
            mounted(&mut host);
        }
        assert_eq!(log.cell_edits().len(), 1);
        assert_eq!(log.cell_edits()[0].prevent_focus, Some(true));
    }

    #[test]
    fn test_debug_hides_factory() {
        let props = HostProps::new(EditCell::new(0, 0)).with_editor(closing_factory());
        let host = EditorHost::new(props, EventLog::new());
        let debug = format!("{:?}", host);
        assert!(debug.contains("<factory>"));
        assert!(debug.contains("Empty"));
    }
}

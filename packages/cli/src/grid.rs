//! # Scripted Grid
//!
//! A minimal grid that owns an [`EditorHost`] the way a real data grid
//! would: it opens edit sessions on cells, forwards keys, commits values on
//! `cellEdit`, and unmounts the editor on `closeEdit`.
//!
//! Focus handling follows the host's hints:
//! - `cellEdit` without `preventFocus` moves focus one row down
//! - `closeEdit(Some(true))` moves focus one column right
//! - Escape that the editor does not handle cancels the edit and unmounts

use crate::config::Config;
use crate::number_editor::NumberEditor;
use crate::script::Step;
use gridedit_editor::{
    EditCell, EditorError, EditorHost, EditorRegistry, EventLog, HostEvent, HostProps, KeyCode,
    KeyEvent, SaveData, VNode,
};
use gridedit_vdom::{mount, ElementRef};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GridError {
    #[error("No cell is being edited")]
    NotEditing,

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Open edit: the host plus the live tree it rendered into
struct OpenEdit {
    host: EditorHost,
    root: ElementRef,
}

pub struct ScriptedGrid {
    config: Config,
    registry: EditorRegistry,
    events: EventLog,
    open: Option<OpenEdit>,
    /// Committed values keyed by (row, column)
    cells: BTreeMap<(usize, usize), SaveData>,
    transcript: Vec<HostEvent>,
    /// Focused cell as (row, column)
    focus: Option<(usize, usize)>,
    last_render: Option<VNode>,
}

impl ScriptedGrid {
    pub fn new(config: Config) -> Self {
        let mut registry = EditorRegistry::new();
        registry.register("number", NumberEditor::factory());

        Self {
            config,
            registry,
            events: EventLog::new(),
            open: None,
            cells: BTreeMap::new(),
            transcript: Vec::new(),
            focus: None,
            last_render: None,
        }
    }

    /// Replay every step, then close whatever is still open
    pub fn run(&mut self, steps: &[Step]) -> Result<(), GridError> {
        for step in steps {
            self.apply(step)?;
        }
        self.detach();
        Ok(())
    }

    pub fn apply(&mut self, step: &Step) -> Result<(), GridError> {
        debug!(?step, "Applying step");
        match step {
            Step::Open { x, y, val, editor } => self.open(*x, *y, val.clone(), editor.as_deref())?,
            Step::Type { text } => {
                for key in KeyEvent::typed(text) {
                    self.press(key)?;
                }
            }
            Step::Key { code } => self.press(KeyEvent::new(*code))?,
            Step::Cancel => self.open_edit()?.host.cancel(),
            Step::Detach => self.detach(),
            Step::Render => self.rerender()?,
        }
        Ok(())
    }

    pub fn open(
        &mut self,
        x: usize,
        y: usize,
        val: Option<SaveData>,
        editor: Option<&str>,
    ) -> Result<(), GridError> {
        self.detach();

        let column = self.config.column(x);
        let factory = match editor {
            Some(name) => Some(self.registry.get(name)?),
            None => column.as_ref().and_then(|column| self.registry.resolve(column)),
        };

        let mut edit_cell = EditCell::new(x, y);
        edit_cell.val = val.or_else(|| self.cells.get(&(y, x)).cloned());

        let props = HostProps {
            edit_cell: Some(edit_cell),
            column,
            editor: factory,
            save_on_close: self.config.save_on_close,
        };
        let mut host = EditorHost::new(props, self.events.clone());

        let tree = host.render().ok_or(GridError::NotEditing)?;
        let root = mount(&tree);
        host.did_render(&root);
        self.last_render = Some(root.to_vnode());

        info!(x, y, "Editing cell");
        self.focus = Some((y, x));
        self.open = Some(OpenEdit { host, root });
        self.pump();
        Ok(())
    }

    fn press(&mut self, key: KeyEvent) -> Result<(), GridError> {
        self.open_edit()?.host.dispatch_key(&key)?;
        let closed = self.drain_events();

        if closed {
            self.detach();
        } else if key.code == KeyCode::Escape {
            // editor left Escape to us
            if let Some(open) = self.open.as_mut() {
                open.host.cancel();
            }
            self.detach();
        }
        Ok(())
    }

    fn rerender(&mut self) -> Result<(), GridError> {
        let open = self.open_edit()?;
        let tree = open.host.render().ok_or(GridError::NotEditing)?;
        open.root.patch(&tree);
        open.host.did_render(&open.root);
        let snapshot = open.root.to_vnode();

        self.last_render = Some(snapshot);
        self.pump();
        Ok(())
    }

    /// Discard the open edit's value; no-op when nothing is open
    pub fn cancel(&mut self) {
        if let Some(open) = self.open.as_mut() {
            open.host.cancel();
        }
    }

    /// Unmount the open editor, if any
    pub fn detach(&mut self) {
        if let Some(mut open) = self.open.take() {
            open.host.disconnect();
            drop(open);
            self.drain_events();
        }
    }

    fn open_edit(&mut self) -> Result<&mut OpenEdit, GridError> {
        self.open.as_mut().ok_or(GridError::NotEditing)
    }

    fn pump(&mut self) {
        if self.drain_events() {
            self.detach();
        }
    }

    /// Apply pending host events; true when the editor asked to close
    fn drain_events(&mut self) -> bool {
        let mut close_requested = false;

        for event in self.events.take() {
            match &event {
                HostEvent::CellEdit(details) => {
                    let value = details.val.clone().unwrap_or(Value::Null);
                    info!(row = details.rg_row, col = details.rg_col, "Committing value");
                    self.cells.insert((details.rg_row, details.rg_col), value);
                    if details.prevent_focus != Some(true) {
                        self.focus = Some((details.rg_row + 1, details.rg_col));
                    }
                }
                HostEvent::CloseEdit(focus_next) => {
                    close_requested = true;
                    if *focus_next == Some(true) {
                        self.focus = self.focus.map(|(row, col)| (row, col + 1));
                    }
                }
            }
            self.transcript.push(event);
        }

        close_requested
    }

    pub fn is_editing(&self) -> bool {
        self.open.is_some()
    }

    pub fn cells(&self) -> &BTreeMap<(usize, usize), SaveData> {
        &self.cells
    }

    pub fn transcript(&self) -> &[HostEvent] {
        &self.transcript
    }

    pub fn focus(&self) -> Option<(usize, usize)> {
        self.focus
    }

    /// Live tree as of the last open or re-render
    pub fn last_render(&self) -> Option<&VNode> {
        self.last_render.as_ref()
    }
}

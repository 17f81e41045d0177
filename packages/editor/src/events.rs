//! Events the host emits towards the grid.

use crate::cell::SaveDataDetails;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "detail", rename_all = "camelCase")]
pub enum HostEvent {
    /// A save completed for a bound cell
    CellEdit(SaveDataDetails),

    /// The editor closed itself; carries the focus-next hint
    CloseEdit(Option<bool>),
}

/// Receiver of host events
pub trait EventSink {
    fn emit(&mut self, event: HostEvent);
}

impl<F: FnMut(HostEvent)> EventSink for F {
    fn emit(&mut self, event: HostEvent) {
        self(event)
    }
}

/// Shared, clonable event buffer. The grid keeps one clone and drains it
/// after each call into the host.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<HostEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<HostEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    pub fn cell_edits(&self) -> Vec<SaveDataDetails> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::CellEdit(details) => Some(details.clone()),
                HostEvent::CloseEdit(_) => None,
            })
            .collect()
    }

    pub fn close_edits(&self) -> Vec<Option<bool>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::CloseEdit(focus_next) => Some(*focus_next),
                HostEvent::CellEdit(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

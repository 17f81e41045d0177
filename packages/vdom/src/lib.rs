//! # Gridedit VDOM
//!
//! Virtual node trees produced by cell editors, and the live node tree the
//! rendering engine mounts them into.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor::render() → VNode            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ vdom: mount / patch                         │
//! │  - VNode → ElementRef (live tree)           │
//! │  - In-place reconciliation on re-render     │
//! │  - Live input state (value, focus)          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: binds first element child to editor   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridedit_vdom::{h, mount};
//!
//! let tree = h("div")
//!     .with_class("edit-input-wrapper")
//!     .with_child(h("input").with_attr("value", "abc"));
//!
//! let root = mount(&tree);
//! let input = root.first_element_child().unwrap();
//! assert_eq!(input.value(), "abc");
//! ```

mod live;
mod vnode;

pub use live::{mount, ElementRef};
pub use vnode::{h, VNode};

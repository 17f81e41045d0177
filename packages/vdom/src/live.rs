//! # Live Node Tree
//!
//! The mounted counterpart of a [`VNode`] tree. Nodes are shared handles
//! (`Rc<RefCell<..>>`), so an editor can hold on to the element it rendered
//! and read input state back from it, the way a browser editor keeps a
//! reference to its `<input>`.
//!
//! Re-rendering goes through [`ElementRef::patch`], which reconciles the
//! live tree in place so handles held by editors stay attached:
//! - Same tag → attributes updated, children patched pairwise
//! - Different node kind or tag → child replaced by a freshly mounted node
//! - Extra new children → mounted and appended
//! - Missing children → removed
//!
//! Input state follows controlled-input semantics: the live `value` is
//! only overwritten when the `value` attribute itself changes between
//! renders, so text typed since the last render survives a re-render.

use crate::vnode::VNode;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug)]
enum LiveNode {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<ElementRef>,
        key: Option<String>,
        value: String,
        focused: bool,
    },
    Text(String),
    Comment(String),
}

/// Handle to a node in a mounted tree
#[derive(Debug, Clone)]
pub struct ElementRef(Rc<RefCell<LiveNode>>);

/// Mount a virtual tree, returning the live root
pub fn mount(node: &VNode) -> ElementRef {
    ElementRef(Rc::new(RefCell::new(build(node))))
}

fn build(node: &VNode) -> LiveNode {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
            key,
        } => LiveNode::Element {
            tag: tag.clone(),
            attributes: attributes.clone(),
            children: children.iter().map(mount).collect(),
            key: key.clone(),
            value: attributes.get("value").cloned().unwrap_or_default(),
            focused: false,
        },
        VNode::Text { content } => LiveNode::Text(content.clone()),
        VNode::Comment { content } => LiveNode::Comment(content.clone()),
    }
}

impl ElementRef {
    /// Reconcile this node (and its subtree) against a new virtual tree
    pub fn patch(&self, new: &VNode) {
        let mut node = self.0.borrow_mut();

        let same_tag = match (&*node, new) {
            (LiveNode::Element { tag, .. }, VNode::Element { tag: new_tag, .. }) => tag == new_tag,
            _ => false,
        };

        if !same_tag {
            if let (LiveNode::Text(content), VNode::Text { content: new_content }) = (&mut *node, new) {
                *content = new_content.clone();
                return;
            }
            if let (LiveNode::Comment(content), VNode::Comment { content: new_content }) =
                (&mut *node, new)
            {
                *content = new_content.clone();
                return;
            }
            trace!("Replacing live node in place");
            *node = build(new);
            return;
        }

        let (
            LiveNode::Element {
                attributes,
                children,
                key,
                value,
                ..
            },
            VNode::Element {
                attributes: new_attributes,
                children: new_children,
                key: new_key,
                ..
            },
        ) = (&mut *node, new)
        else {
            return;
        };

        if attributes.get("value") != new_attributes.get("value") {
            *value = new_attributes.get("value").cloned().unwrap_or_default();
        }
        *attributes = new_attributes.clone();
        *key = new_key.clone();

        for (index, new_child) in new_children.iter().enumerate() {
            if index >= children.len() {
                children.push(mount(new_child));
            } else if children[index].same_kind(new_child) {
                children[index].patch(new_child);
            } else {
                children[index] = mount(new_child);
            }
        }
        children.truncate(new_children.len());
    }

    fn same_kind(&self, other: &VNode) -> bool {
        match (&*self.0.borrow(), other) {
            (LiveNode::Element { tag, .. }, VNode::Element { tag: other_tag, .. }) => tag == other_tag,
            (LiveNode::Text(_), VNode::Text { .. }) => true,
            (LiveNode::Comment(_), VNode::Comment { .. }) => true,
            _ => false,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(&*self.0.borrow(), LiveNode::Element { .. })
    }

    pub fn tag(&self) -> Option<String> {
        match &*self.0.borrow() {
            LiveNode::Element { tag, .. } => Some(tag.clone()),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        match &*self.0.borrow() {
            LiveNode::Element { attributes, .. } => attributes.get(name).cloned(),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn children(&self) -> Vec<ElementRef> {
        match &*self.0.borrow() {
            LiveNode::Element { children, .. } => children.clone(),
            _ => Vec::new(),
        }
    }

    /// First child that is an element (text and comments are skipped)
    pub fn first_element_child(&self) -> Option<ElementRef> {
        match &*self.0.borrow() {
            LiveNode::Element { children, .. } => {
                children.iter().find(|child| child.is_element()).cloned()
            }
            _ => None,
        }
    }

    /// Live input value; empty for nodes without one
    pub fn value(&self) -> String {
        match &*self.0.borrow() {
            LiveNode::Element { value, .. } => value.clone(),
            _ => String::new(),
        }
    }

    pub fn set_value(&self, new_value: impl Into<String>) {
        if let LiveNode::Element { value, .. } = &mut *self.0.borrow_mut() {
            *value = new_value.into();
        }
    }

    pub fn insert_text(&self, text: &str) {
        if let LiveNode::Element { value, .. } = &mut *self.0.borrow_mut() {
            value.push_str(text);
        }
    }

    /// Remove the last character of the live value
    pub fn delete_backward(&self) {
        if let LiveNode::Element { value, .. } = &mut *self.0.borrow_mut() {
            value.pop();
        }
    }

    pub fn focus(&self) {
        if let LiveNode::Element { focused, .. } = &mut *self.0.borrow_mut() {
            *focused = true;
        }
    }

    pub fn blur(&self) {
        if let LiveNode::Element { focused, .. } = &mut *self.0.borrow_mut() {
            *focused = false;
        }
    }

    pub fn is_focused(&self) -> bool {
        matches!(&*self.0.borrow(), LiveNode::Element { focused: true, .. })
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match &*self.0.borrow() {
            LiveNode::Element { children, .. } => {
                children.iter().map(ElementRef::text_content).collect()
            }
            LiveNode::Text(content) => content.clone(),
            LiveNode::Comment(_) => String::new(),
        }
    }

    /// Whether two handles point at the same live node
    pub fn ptr_eq(&self, other: &ElementRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of handles currently pointing at this node
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Snapshot the live tree, with input values reflected as `value`
    pub fn to_vnode(&self) -> VNode {
        match &*self.0.borrow() {
            LiveNode::Element {
                tag,
                attributes,
                children,
                key,
                value,
                ..
            } => {
                let mut attributes = attributes.clone();
                if !value.is_empty() || attributes.contains_key("value") {
                    attributes.insert("value".to_string(), value.clone());
                }
                VNode::Element {
                    tag: tag.clone(),
                    attributes,
                    children: children.iter().map(ElementRef::to_vnode).collect(),
                    key: key.clone(),
                }
            }
            LiveNode::Text(content) => VNode::text(content.clone()),
            LiveNode::Comment(content) => VNode::comment(content.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vnode::h;

    fn wrapper(input_value: &str) -> VNode {
        h("div")
            .with_class("edit-input-wrapper")
            .with_child(VNode::comment("editor"))
            .with_child(h("input").with_attr("value", input_value))
    }

    #[test]
    fn test_mount_builds_live_tree() {
        let root = mount(&wrapper("abc"));

        assert_eq!(root.tag().as_deref(), Some("div"));
        assert!(root.has_class("edit-input-wrapper"));
        assert_eq!(root.children().len(), 2);

        let input = root.first_element_child().unwrap();
        assert_eq!(input.tag().as_deref(), Some("input"));
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_text_editing_operations() {
        let input = mount(&h("input"));

        input.insert_text("ab");
        input.insert_text("c");
        assert_eq!(input.value(), "abc");

        input.delete_backward();
        assert_eq!(input.value(), "ab");

        input.set_value("");
        input.delete_backward();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_focus_and_blur() {
        let input = mount(&h("input"));
        assert!(!input.is_focused());

        input.focus();
        assert!(input.is_focused());

        input.blur();
        assert!(!input.is_focused());
    }

    #[test]
    fn test_patch_keeps_handles_and_typed_value() {
        let root = mount(&wrapper("abc"));
        let input = root.first_element_child().unwrap();
        input.insert_text("def");

        root.patch(&wrapper("abc"));

        let patched = root.first_element_child().unwrap();
        assert!(patched.ptr_eq(&input));
        assert_eq!(patched.value(), "abcdef");
    }

    #[test]
    fn test_patch_resets_value_when_attribute_changes() {
        let root = mount(&wrapper("abc"));
        let input = root.first_element_child().unwrap();
        input.insert_text("def");

        root.patch(&wrapper("xyz"));

        assert!(root.first_element_child().unwrap().ptr_eq(&input));
        assert_eq!(input.value(), "xyz");
    }

    #[test]
    fn test_patch_replaces_child_with_different_tag() {
        let root = mount(&wrapper("abc"));
        let input = root.first_element_child().unwrap();

        root.patch(&h("div").with_child(h("select")));

        let replaced = root.first_element_child().unwrap();
        assert!(!replaced.ptr_eq(&input));
        assert_eq!(replaced.tag().as_deref(), Some("select"));
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_ref_count_tracks_handles() {
        let root = mount(&wrapper(""));
        let input = root.first_element_child().unwrap();
        assert_eq!(input.ref_count(), 2);

        let extra = input.clone();
        assert_eq!(input.ref_count(), 3);
        drop(extra);
        assert_eq!(input.ref_count(), 2);
    }

    #[test]
    fn test_to_vnode_reflects_live_value() {
        let root = mount(&wrapper("a"));
        root.first_element_child().unwrap().insert_text("b");

        let snapshot = root.to_vnode();
        let input = &snapshot.children()[1];
        assert_eq!(input.attr("value"), Some("ab"));
        assert_eq!(root.text_content(), "");
    }
}

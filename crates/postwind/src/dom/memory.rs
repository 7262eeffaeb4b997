//! An in-memory [`Document`].
//!
//! Elements live in a slot arena and keep their handle for the lifetime of
//! the document, detached or not, the way host DOM nodes outlive their
//! removal from the tree.

use indexmap::IndexMap;
use slotmap::SlotMap;

use super::document::{Document, ElementId};

#[derive(Debug, Clone, Default)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    class: String,
    styles: IndexMap<String, String>,
}

/// Arena-backed element tree that records observer registrations.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    root: ElementId,
    size_observer: bool,
    size_observed: Vec<ElementId>,
    intersection_observed: IndexMap<ElementId, f64>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates a document with an empty root element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::default());
        Self {
            nodes,
            root,
            size_observer: true,
            size_observed: Vec::new(),
            intersection_observed: IndexMap::new(),
        }
    }

    /// A document whose host cannot report element sizes.
    pub fn without_size_observer() -> Self {
        Self {
            size_observer: false,
            ..Self::new()
        }
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, class: &str) -> ElementId {
        self.nodes.insert(Node {
            class: class.to_string(),
            ..Node::default()
        })
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(parent) || self.is_ancestor_or_self(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Creates an element and appends it to `parent`.
    pub fn append(&mut self, parent: ElementId, class: &str) -> ElementId {
        let child = self.create_element(class);
        self.append_child(parent, child);
        child
    }

    /// Detaches `element` from its parent. The subtree stays intact.
    pub fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.nodes.get_mut(element).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|c| *c != element);
        }
    }

    /// Replaces the whole `class` attribute.
    pub fn set_class_attr(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.class = class.to_string();
        }
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(element)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    pub fn styles(&self, element: ElementId) -> Option<&IndexMap<String, String>> {
        self.nodes.get(element).map(|n| &n.styles)
    }

    pub fn is_size_observed(&self, element: ElementId) -> bool {
        self.size_observed.contains(&element)
    }

    pub fn intersection_threshold(&self, element: ElementId) -> Option<f64> {
        self.intersection_observed.get(&element).copied()
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> ElementId {
        self.root
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn class_attr(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.class.as_str())
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        let Some(node) = self.nodes.get_mut(element) else {
            return;
        };
        if node.class.split_whitespace().any(|c| c == class) {
            return;
        }
        if !node.class.is_empty() {
            node.class.push(' ');
        }
        node.class.push_str(class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.class = node
                .class
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, element: ElementId, property: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.styles.shift_remove(property);
        }
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.is_ancestor_or_self(self.root, element)
    }

    fn supports_size_observer(&self) -> bool {
        self.size_observer
    }

    fn observe_size(&mut self, element: ElementId) {
        if !self.size_observed.contains(&element) {
            self.size_observed.push(element);
        }
    }

    fn unobserve_size(&mut self, element: ElementId) {
        self.size_observed.retain(|e| *e != element);
    }

    fn observe_intersection(&mut self, element: ElementId, threshold: f64) {
        self.intersection_observed.insert(element, threshold);
    }

    fn unobserve_intersection(&mut self, element: ElementId) {
        self.intersection_observed.shift_remove(&element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_building() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.append(root, "p-4");
        let b = doc.append(a, "m-2 flex");

        assert_eq!(doc.children(root), vec![a]);
        assert_eq!(doc.children(a), vec![b]);
        assert_eq!(doc.class_attr(b), Some("m-2 flex"));
        assert!(doc.is_connected(b));
    }

    #[test]
    fn test_detach_keeps_subtree() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.append(root, "");
        let b = doc.append(a, "");

        doc.detach(a);
        assert!(doc.children(root).is_empty());
        assert_eq!(doc.children(a), vec![b]);
        assert!(!doc.is_connected(a));
        assert!(!doc.is_connected(b));
    }

    #[test]
    fn test_append_child_moves() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.append(root, "");
        let b = doc.append(root, "");
        let c = doc.append(a, "");

        doc.append_child(b, c);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), vec![c]);

        // Would create a cycle.
        doc.append_child(c, b);
        assert_eq!(doc.children(root), vec![a, b]);
        assert!(doc.children(c).is_empty());
    }

    #[test]
    fn test_class_edits() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "p-4");

        doc.add_class(el, "pw-visible");
        doc.add_class(el, "pw-visible");
        assert_eq!(doc.class_attr(el), Some("p-4 pw-visible"));
        assert!(doc.has_class(el, "pw-visible"));

        doc.remove_class(el, "p-4");
        assert_eq!(doc.class_attr(el), Some("pw-visible"));
    }

    #[test]
    fn test_styles() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "");
        doc.set_style(el, "display", "flex");
        assert_eq!(doc.style(el, "display"), Some("flex"));
        doc.remove_style(el, "display");
        assert_eq!(doc.style(el, "display"), None);
    }

    #[test]
    fn test_observers() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "");

        doc.observe_size(el);
        assert!(doc.is_size_observed(el));
        doc.unobserve_size(el);
        assert!(!doc.is_size_observed(el));

        doc.observe_intersection(el, 0.5);
        assert_eq!(doc.intersection_threshold(el), Some(0.5));
        doc.unobserve_intersection(el);
        assert_eq!(doc.intersection_threshold(el), None);

        assert!(!MemoryDocument::without_size_observer().supports_size_observer());
    }
}

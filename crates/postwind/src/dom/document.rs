//! The host document contract.

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to an element in the host document.
    pub struct ElementId;
}

/// What the reactive layer needs from a host tree.
///
/// Observation calls only register interest. The host reports sizes and
/// intersection ratios back through the matching `Reactor::handle_*` calls.
pub trait Document {
    fn root(&self) -> ElementId;

    /// Child elements in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// The raw `class` attribute, if the element exists and has one.
    fn class_attr(&self, element: ElementId) -> Option<&str>;

    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.class_attr(element)
            .is_some_and(|attr| attr.split_whitespace().any(|c| c == class))
    }

    /// Sets an inline style property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);
    fn remove_style(&mut self, element: ElementId, property: &str);

    /// True while the element is reachable from the root.
    fn is_connected(&self, element: ElementId) -> bool;

    /// Whether the host can report element sizes at all.
    fn supports_size_observer(&self) -> bool {
        true
    }

    fn observe_size(&mut self, element: ElementId);
    fn unobserve_size(&mut self, element: ElementId);

    /// Registers the element for intersection reports at `threshold` (0..=1).
    fn observe_intersection(&mut self, element: ElementId, threshold: f64);
    fn unobserve_intersection(&mut self, element: ElementId);
}

/// One structural or attribute change, as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Subtrees attached to or detached from the tree.
    ChildList {
        added: Vec<ElementId>,
        removed: Vec<ElementId>,
    },
    /// The `class` attribute of `target` changed.
    ClassAttribute { target: ElementId },
}

impl Mutation {
    pub fn added(elements: impl IntoIterator<Item = ElementId>) -> Self {
        Mutation::ChildList {
            added: elements.into_iter().collect(),
            removed: Vec::new(),
        }
    }

    pub fn removed(elements: impl IntoIterator<Item = ElementId>) -> Self {
        Mutation::ChildList {
            added: Vec::new(),
            removed: elements.into_iter().collect(),
        }
    }

    pub fn class(target: ElementId) -> Self {
        Mutation::ClassAttribute { target }
    }
}

//! Visibility helper class and deferred `onload:` classes.

use slotmap::SecondaryMap;

use super::document::{Document, ElementId};
use crate::parse::VISIBLE_CLASS;

/// Fraction of an element that must be in view for it to count as visible.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Delay between first sighting of an `onload:` token and its class landing.
pub const ONLOAD_DELAY_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
struct DeferredClass {
    element: ElementId,
    class: String,
    due_ms: u64,
}

/// Intersection registrations and the deferred-class queue.
#[derive(Debug, Default)]
pub struct Visibility {
    observed: SecondaryMap<ElementId, ()>,
    /// Classes already scheduled per element. Scheduling is one-shot.
    scheduled: SecondaryMap<ElementId, Vec<String>>,
    queue: Vec<DeferredClass>,
}

impl Visibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts toggling the visible helper class on `element`.
    pub fn observe(&mut self, doc: &mut dyn Document, element: ElementId) {
        if self.observed.insert(element, ()).is_none() {
            log::debug!("observing intersection of {:?}", element);
            doc.observe_intersection(element, VISIBILITY_THRESHOLD);
        }
    }

    /// Stops toggling the helper class on `element` and clears it.
    pub fn unobserve(&mut self, doc: &mut dyn Document, element: ElementId) {
        if self.observed.remove(element).is_some() {
            log::debug!("stopped observing intersection of {:?}", element);
            doc.unobserve_intersection(element);
            if doc.is_connected(element) {
                doc.remove_class(element, VISIBLE_CLASS);
            }
        }
    }

    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observed.contains_key(element)
    }

    /// Applies an intersection report for an observed element.
    pub fn intersect(&mut self, doc: &mut dyn Document, element: ElementId, ratio: f64) {
        if !self.observed.contains_key(element) {
            return;
        }
        if ratio >= VISIBILITY_THRESHOLD {
            doc.add_class(element, VISIBLE_CLASS);
        } else {
            doc.remove_class(element, VISIBLE_CLASS);
        }
    }

    /// Queues `class` for `element`, unless it was queued before.
    pub fn defer(&mut self, element: ElementId, class: &str, now_ms: u64) {
        let Some(scheduled) = self.scheduled.entry(element).map(|e| e.or_default()) else {
            return;
        };
        if scheduled.iter().any(|c| c == class) {
            return;
        }
        scheduled.push(class.to_string());
        self.queue.push(DeferredClass {
            element,
            class: class.to_string(),
            due_ms: now_ms.saturating_add(ONLOAD_DELAY_MS),
        });
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Adds every class that is due by `now_ms` to its element.
    ///
    /// Returns the `(element, class)` pairs that were applied, in queue order.
    pub fn advance(&mut self, doc: &mut dyn Document, now_ms: u64) -> Vec<(ElementId, String)> {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|task| task.due_ms <= now_ms);
        self.queue = waiting;

        let mut applied = Vec::with_capacity(due.len());
        for task in due {
            if doc.is_connected(task.element) {
                doc.add_class(task.element, &task.class);
                applied.push((task.element, task.class));
            }
        }
        applied
    }

    /// Stops observing `element` and drops its queued classes.
    pub fn forget(&mut self, doc: &mut dyn Document, element: ElementId) {
        self.unobserve(doc, element);
        self.scheduled.remove(element);
        self.queue.retain(|task| task.element != element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;

    #[test]
    fn test_intersection_toggles_helper_class() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "visible:opacity-100");
        let mut vis = Visibility::new();

        vis.observe(&mut doc, el);
        assert_eq!(doc.intersection_threshold(el), Some(0.5));

        vis.intersect(&mut doc, el, 0.6);
        assert!(doc.has_class(el, VISIBLE_CLASS));
        vis.intersect(&mut doc, el, 0.2);
        assert!(!doc.has_class(el, VISIBLE_CLASS));
    }

    #[test]
    fn test_unobserve_clears_helper_class() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "visible:opacity-100");
        let mut vis = Visibility::new();
        vis.observe(&mut doc, el);
        vis.intersect(&mut doc, el, 1.0);

        vis.unobserve(&mut doc, el);
        assert!(!vis.is_observed(el));
        assert_eq!(doc.intersection_threshold(el), None);
        assert!(!doc.has_class(el, VISIBLE_CLASS));

        vis.intersect(&mut doc, el, 1.0);
        assert!(!doc.has_class(el, VISIBLE_CLASS));
    }

    #[test]
    fn test_unobserved_elements_ignore_reports() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "");
        let mut vis = Visibility::new();
        vis.intersect(&mut doc, el, 1.0);
        assert!(!doc.has_class(el, VISIBLE_CLASS));
    }

    #[test]
    fn test_deferred_class_after_delay() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "onload:fade-in");
        let mut vis = Visibility::new();

        vis.defer(el, "fade-in", 1000);
        assert!(vis.advance(&mut doc, 1099).is_empty());
        assert!(!doc.has_class(el, "fade-in"));

        let applied = vis.advance(&mut doc, 1100);
        assert_eq!(applied, vec![(el, "fade-in".to_string())]);
        assert!(doc.has_class(el, "fade-in"));
        assert_eq!(vis.pending(), 0);
    }

    #[test]
    fn test_deferred_class_is_one_shot() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "onload:fade-in");
        let mut vis = Visibility::new();

        vis.defer(el, "fade-in", 0);
        vis.advance(&mut doc, 200);
        doc.remove_class(el, "fade-in");

        vis.defer(el, "fade-in", 300);
        assert_eq!(vis.pending(), 0);
        vis.advance(&mut doc, 1000);
        assert!(!doc.has_class(el, "fade-in"));
    }

    #[test]
    fn test_forget_drops_queue_and_observer() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "");
        let mut vis = Visibility::new();
        vis.observe(&mut doc, el);
        vis.defer(el, "fade-in", 0);

        vis.forget(&mut doc, el);
        assert!(!vis.is_observed(el));
        assert_eq!(doc.intersection_threshold(el), None);
        assert_eq!(vis.pending(), 0);
    }

    #[test]
    fn test_detached_elements_are_skipped() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "");
        let mut vis = Visibility::new();
        vis.defer(el, "fade-in", 0);
        doc.detach(el);
        assert!(vis.advance(&mut doc, 500).is_empty());
    }

    #[test]
    fn test_advance_applies_only_to_connected_elements() {
        let mut doc = MemoryDocument::new();
        let kept = doc.append(doc.root(), "");
        let gone = doc.append(doc.root(), "");
        let mut vis = Visibility::new();
        vis.defer(gone, "fade-in", 0);
        vis.defer(kept, "fade-in", 0);
        vis.defer(kept, "slide", 50);
        doc.detach(gone);

        assert_eq!(
            vis.advance(&mut doc, 120),
            vec![(kept, "fade-in".to_string())]
        );
        assert_eq!(vis.pending(), 1);
        assert_eq!(
            vis.advance(&mut doc, 150),
            vec![(kept, "slide".to_string())]
        );
        assert_eq!(doc.class_attr(kept), Some("fade-in slide"));
    }
}

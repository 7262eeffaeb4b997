//! Drives the compiler from host document events.
//!
//! The host owns the event loop. It calls [`Reactor::start`] once, then
//! forwards each callback to the matching `handle_*` method. Nothing here
//! blocks or keeps a clock of its own: time only moves when the host calls
//! [`Reactor::advance_time`].
//!
//! ```rust
//! use postwind::dom::{Document, MemoryDocument, Mutation, Reactor};
//! use postwind::Compiler;
//!
//! let mut doc = MemoryDocument::new();
//! let root = doc.root();
//! doc.append(root, "p-4 hover:bg-blue-500");
//!
//! let mut reactor = Reactor::new(Compiler::new());
//! reactor.start(&mut doc);
//! assert!(reactor.compiler().sheets().utilities().contains(".p-4"));
//!
//! let card = doc.append(root, "m-2");
//! reactor.handle_mutations(&mut doc, &[Mutation::added([card])]);
//! assert!(reactor.compiler().sheets().utilities().contains(".m-2"));
//! ```

use super::container::ContainerQueries;
use super::document::{Document, ElementId, Mutation};
use super::media::matches_width;
use super::visibility::Visibility;
use crate::compiler::Compiler;
use crate::parse::{container_query, deferred_class, parse_token, PseudoState};

/// Prefix of the viewport classes toggled on the root element.
pub const VIEWPORT_CLASS_PREFIX: &str = "pw-";

/// Owns the compiler and all per-element state.
#[derive(Debug)]
pub struct Reactor {
    compiler: Compiler,
    containers: ContainerQueries,
    visibility: Visibility,
    now_ms: u64,
}

impl Reactor {
    pub fn new(compiler: Compiler) -> Self {
        Self {
            compiler,
            containers: ContainerQueries::new(),
            visibility: Visibility::new(),
            now_ms: 0,
        }
    }

    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    pub fn compiler_mut(&mut self) -> &mut Compiler {
        &mut self.compiler
    }

    pub fn containers(&self) -> &ContainerQueries {
        &self.containers
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Scans the whole tree once.
    pub fn start(&mut self, doc: &mut dyn Document) {
        let root = doc.root();
        log::debug!("initial scan from {:?}", root);
        self.scan(doc, root);
    }

    /// Processes one batch of structural and class changes, in order.
    pub fn handle_mutations(&mut self, doc: &mut dyn Document, mutations: &[Mutation]) {
        for mutation in mutations {
            match mutation {
                Mutation::ChildList { added, removed } => {
                    for element in removed {
                        if !doc.is_connected(*element) {
                            self.release(doc, *element);
                        }
                    }
                    for element in added {
                        if doc.is_connected(*element) {
                            self.scan(doc, *element);
                        }
                    }
                }
                Mutation::ClassAttribute { target } => {
                    if doc.is_connected(*target) {
                        self.process(doc, *target);
                    }
                }
            }
        }
    }

    /// Size report for an element under container-query observation.
    pub fn handle_resize(&mut self, doc: &mut dyn Document, element: ElementId, width: f64) {
        self.containers
            .resize(doc, &mut self.compiler, element, width);
    }

    /// Intersection report for an element under visibility observation.
    pub fn handle_intersection(&mut self, doc: &mut dyn Document, element: ElementId, ratio: f64) {
        self.visibility.intersect(doc, element, ratio);
    }

    /// Viewport width change. Toggles `pw-<breakpoint>` on the root when
    /// viewport classes are enabled.
    pub fn handle_viewport(&mut self, doc: &mut dyn Document, width: f64) {
        if !self.compiler.body_class() {
            return;
        }
        let root = doc.root();
        for (key, media) in self.compiler.breakpoints() {
            let class = format!("{}{}", VIEWPORT_CLASS_PREFIX, key);
            if matches_width(media, width) {
                doc.add_class(root, &class);
            } else {
                doc.remove_class(root, &class);
            }
        }
    }

    /// Moves host time forward and applies due `onload:` classes.
    pub fn advance_time(&mut self, doc: &mut dyn Document, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        for (element, class) in self.visibility.advance(doc, self.now_ms) {
            log::debug!("deferred class '{}' added to {:?}", class, element);
            self.compiler.compile(&class);
        }
    }

    fn scan(&mut self, doc: &mut dyn Document, element: ElementId) {
        let mut stack = vec![element];
        while let Some(current) = stack.pop() {
            self.process(doc, current);
            stack.extend(doc.children(current).into_iter().rev());
        }
    }

    /// Compiles and registers every token of one element, in attribute order.
    fn process(&mut self, doc: &mut dyn Document, element: ElementId) {
        let tokens: Vec<String> = doc
            .class_attr(element)
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut wants_visibility = false;
        for token in &tokens {
            if container_query(token).is_some() {
                continue;
            }
            if let Some(class) = deferred_class(token) {
                self.visibility.defer(element, class, self.now_ms);
                continue;
            }
            self.compiler.compile(token);
            if parse_token(token, self.compiler.breakpoints()).has_state(PseudoState::Visible) {
                wants_visibility = true;
            }
        }
        if wants_visibility {
            self.visibility.observe(doc, element);
        } else {
            self.visibility.unobserve(doc, element);
        }

        let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        self.containers
            .sync(doc, &mut self.compiler, element, &refs);
    }

    /// Tears down a detached subtree.
    fn release(&mut self, doc: &mut dyn Document, element: ElementId) {
        let mut stack = vec![element];
        while let Some(current) = stack.pop() {
            self.containers.teardown(doc, current);
            self.visibility.forget(doc, current);
            stack.extend(doc.children(current));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dom::memory::MemoryDocument;
    use crate::parse::VISIBLE_CLASS;

    #[test]
    fn test_start_compiles_tree_in_order() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.append(root, "p-4");
        doc.append(a, "m-2");
        doc.append(root, "flex");

        let mut reactor = Reactor::new(Compiler::new());
        reactor.start(&mut doc);
        assert_eq!(
            reactor.compiler().sheets().utilities(),
            ".p-4 { padding: 16px; }\n.m-2 { margin: 8px; }\n.flex { display: flex; }"
        );
    }

    #[test]
    fn test_class_mutation() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "");
        let mut reactor = Reactor::new(Compiler::new());
        reactor.start(&mut doc);

        doc.set_class_attr(el, "p-1 p-1");
        reactor.handle_mutations(&mut doc, &[Mutation::class(el)]);
        assert_eq!(reactor.compiler().sheets().utilities(), ".p-1 { padding: 4px; }");
    }

    #[test]
    fn test_visible_token_registers_observer() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "visible:opacity-100 opacity-0");
        let mut reactor = Reactor::new(Compiler::new());
        reactor.start(&mut doc);

        assert!(reactor.visibility().is_observed(el));
        reactor.handle_intersection(&mut doc, el, 0.75);
        assert!(doc.has_class(el, VISIBLE_CLASS));
    }

    #[test]
    fn test_losing_visible_token_stops_observing() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "visible:opacity-100");
        let mut reactor = Reactor::new(Compiler::new());
        reactor.start(&mut doc);
        reactor.handle_intersection(&mut doc, el, 1.0);
        assert!(doc.has_class(el, VISIBLE_CLASS));

        doc.set_class_attr(el, "opacity-0 pw-visible");
        reactor.handle_mutations(&mut doc, &[Mutation::class(el)]);
        assert!(!reactor.visibility().is_observed(el));
        assert_eq!(doc.intersection_threshold(el), None);
        assert_eq!(doc.class_attr(el), Some("opacity-0"));
    }

    #[test]
    fn test_onload_token() {
        let mut doc = MemoryDocument::new();
        let el = doc.append(doc.root(), "onload:opacity-100");
        let mut reactor = Reactor::new(Compiler::new());
        reactor.advance_time(&mut doc, 5_000);
        reactor.start(&mut doc);

        assert!(reactor.compiler().sheets().utilities().is_empty());
        reactor.advance_time(&mut doc, 5_050);
        assert!(!doc.has_class(el, "opacity-100"));
        reactor.advance_time(&mut doc, 5_100);
        assert!(doc.has_class(el, "opacity-100"));
        assert!(reactor
            .compiler()
            .sheets()
            .utilities()
            .contains(".opacity-100 { opacity: 1; }"));
    }

    #[test]
    fn test_removed_subtree_is_released() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let wrapper = doc.append(root, "");
        let inner = doc.append(wrapper, "max-320:flex visible:p-1");
        let mut reactor = Reactor::new(Compiler::new());
        reactor.start(&mut doc);
        assert!(reactor.containers().is_tracked(inner));
        assert!(reactor.visibility().is_observed(inner));

        doc.detach(wrapper);
        reactor.handle_mutations(&mut doc, &[Mutation::removed([wrapper])]);
        assert!(!reactor.containers().is_tracked(inner));
        assert!(!reactor.visibility().is_observed(inner));
        assert!(!doc.is_size_observed(inner));
    }

    #[test]
    fn test_moved_element_keeps_state() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let a = doc.append(root, "");
        let b = doc.append(root, "");
        let el = doc.append(a, "max-320:flex");
        let mut reactor = Reactor::new(Compiler::new());
        reactor.start(&mut doc);

        doc.append_child(b, el);
        reactor.handle_mutations(
            &mut doc,
            &[Mutation::ChildList {
                added: vec![el],
                removed: vec![el],
            }],
        );
        assert!(reactor.containers().is_tracked(el));
    }

    #[test]
    fn test_viewport_classes() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let mut reactor = Reactor::new(Compiler::with_config(Config::new().body_class(true)));

        reactor.handle_viewport(&mut doc, 500.0);
        assert!(doc.has_class(root, "pw-m"));
        assert!(!doc.has_class(root, "pw-d"));

        reactor.handle_viewport(&mut doc, 1400.0);
        assert!(!doc.has_class(root, "pw-m"));
        assert!(doc.has_class(root, "pw-d"));
    }

    #[test]
    fn test_viewport_classes_off_by_default() {
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        let mut reactor = Reactor::new(Compiler::new());
        reactor.handle_viewport(&mut doc, 500.0);
        assert_eq!(doc.class_attr(root), Some(""));
    }
}

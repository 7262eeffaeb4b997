//! Container queries: inline declarations driven by an element's own width.
//!
//! Each element with at least one `min-<n>:` / `max-<n>:` token gets a
//! [`ContainerQueryState`] in an arena keyed by [`ElementId`], and one size
//! observation registered with the host. On every size report the
//! conditions are re-evaluated. Deactivations run before activations so a
//! property handed from one condition to another is never left unset.

use indexmap::IndexMap;
use slotmap::SecondaryMap;

use super::document::{Document, ElementId};
use crate::compiler::Compiler;
use crate::error::Warning;
use crate::parse::{container_query, ContainerToken};

/// One `(min|max)-<n>:<payload>` condition on an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub query: ContainerToken,
    pub active: bool,
    /// Inline properties this condition set while active.
    pub applied_styles: IndexMap<String, String>,
}

impl Condition {
    fn new(query: ContainerToken) -> Self {
        Self {
            query,
            active: false,
            applied_styles: IndexMap::new(),
        }
    }
}

/// Conditions of one element, keyed by token in attribute order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerQueryState {
    pub conditions: IndexMap<String, Condition>,
    /// Last width the host reported.
    pub width: Option<f64>,
}

/// Per-element container-query bookkeeping.
#[derive(Debug, Default)]
pub struct ContainerQueries {
    states: SecondaryMap<ElementId, ContainerQueryState>,
}

impl ContainerQueries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, element: ElementId) -> Option<&ContainerQueryState> {
        self.states.get(element)
    }

    pub fn is_tracked(&self, element: ElementId) -> bool {
        self.states.contains_key(element)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Brings an element's conditions in line with its current tokens.
    ///
    /// New conditions are evaluated at once if a width is already known.
    /// Dropped conditions retract their styles. An element left with no
    /// conditions is torn down.
    pub fn sync(
        &mut self,
        doc: &mut dyn Document,
        compiler: &mut Compiler,
        element: ElementId,
        tokens: &[&str],
    ) {
        let queries: Vec<(&str, ContainerToken)> = tokens
            .iter()
            .filter_map(|t| container_query(t).map(|q| (*t, q)))
            .collect();

        if queries.is_empty() && !self.states.contains_key(element) {
            return;
        }
        if !doc.supports_size_observer() {
            compiler
                .diagnostics_mut()
                .warn(Warning::SizeObserverUnavailable);
            return;
        }

        if !self.states.contains_key(element) {
            log::debug!("observing size of {:?}", element);
            doc.observe_size(element);
            self.states.insert(element, ContainerQueryState::default());
        }
        let Some(state) = self.states.get_mut(element) else {
            return;
        };

        let stale: Vec<String> = state
            .conditions
            .keys()
            .filter(|token| !queries.iter().any(|(t, _)| *t == token.as_str()))
            .cloned()
            .collect();
        for token in stale {
            if let Some(condition) = state.conditions.shift_remove(&token) {
                retract(doc, element, state, &condition.applied_styles);
            }
        }

        let mut added = false;
        for (token, query) in queries {
            if !state.conditions.contains_key(token) {
                state.conditions.insert(token.to_string(), Condition::new(query));
                added = true;
            }
        }

        if state.conditions.is_empty() {
            self.teardown(doc, element);
            return;
        }
        if added {
            if let Some(width) = state.width {
                evaluate(doc, compiler, element, state, width);
            }
        }
    }

    /// Applies a size report.
    pub fn resize(
        &mut self,
        doc: &mut dyn Document,
        compiler: &mut Compiler,
        element: ElementId,
        width: f64,
    ) {
        let Some(state) = self.states.get_mut(element) else {
            return;
        };
        state.width = Some(width);
        evaluate(doc, compiler, element, state, width);
    }

    /// Drops all bookkeeping for an element and stops observing it.
    pub fn teardown(&mut self, doc: &mut dyn Document, element: ElementId) {
        if self.states.remove(element).is_some() {
            log::debug!("stopped observing size of {:?}", element);
            doc.unobserve_size(element);
        }
    }
}

fn evaluate(
    doc: &mut dyn Document,
    compiler: &mut Compiler,
    element: ElementId,
    state: &mut ContainerQueryState,
    width: f64,
) {
    let mut activated = Vec::new();
    let mut deactivated = Vec::new();
    for (token, condition) in &state.conditions {
        let active = condition.query.mode.matches(width, condition.query.threshold);
        if active && !condition.active {
            activated.push(token.clone());
        } else if !active && condition.active {
            deactivated.push(token.clone());
        }
    }

    for token in &deactivated {
        let Some(condition) = state.conditions.get_mut(token) else {
            continue;
        };
        condition.active = false;
        let released = std::mem::take(&mut condition.applied_styles);
        retract(doc, element, state, &released);
    }

    for token in &activated {
        let Some(condition) = state.conditions.get_mut(token) else {
            continue;
        };
        let styles = compiler.inline_declarations(&condition.query.payload);
        for (property, value) in &styles {
            doc.set_style(element, property, value);
        }
        log::trace!("{:?}: '{}' active at {}px", element, token, width);
        condition.applied_styles = styles;
        condition.active = true;
    }
}

/// Removes the `released` inline properties, except those another active
/// condition still claims. Claimed properties get that condition's value back.
fn retract(
    doc: &mut dyn Document,
    element: ElementId,
    state: &ContainerQueryState,
    released: &IndexMap<String, String>,
) {
    for property in released.keys() {
        let claimed = state
            .conditions
            .values()
            .filter(|c| c.active)
            .filter_map(|c| c.applied_styles.get(property))
            .last();
        match claimed {
            Some(value) => doc.set_style(element, property, value),
            None => doc.remove_style(element, property),
        }
    }
}

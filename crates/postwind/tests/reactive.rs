//! The reactive layer driven through an in-memory document.

use postwind::dom::{Document, MemoryDocument, Mutation, Reactor, ONLOAD_DELAY_MS};
use postwind::{Compiler, Config, Warning};

fn started(doc: &mut MemoryDocument, compiler: Compiler) -> Reactor {
    let mut reactor = Reactor::new(compiler);
    reactor.start(doc);
    reactor
}

#[test]
fn test_container_query_crossing_and_overlap() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let card = doc.append(root, "p-4 max-320:flex");
    let mut reactor = started(&mut doc, Compiler::new());

    assert!(doc.is_size_observed(card));
    // Container tokens never reach the sheets.
    assert_eq!(
        reactor.compiler().sheets().utilities(),
        ".p-4 { padding: 16px; }"
    );

    reactor.handle_resize(&mut doc, card, 480.0);
    assert_eq!(doc.style(card, "display"), None);

    reactor.handle_resize(&mut doc, card, 320.0);
    assert_eq!(doc.style(card, "display"), Some("flex"));

    reactor.handle_resize(&mut doc, card, 321.0);
    assert_eq!(doc.style(card, "display"), None);

    // A second condition claiming the same property keeps it alive.
    doc.set_class_attr(card, "p-4 max-320:flex max-1000:flex");
    reactor.handle_mutations(&mut doc, &[Mutation::class(card)]);
    assert_eq!(doc.style(card, "display"), Some("flex"));

    reactor.handle_resize(&mut doc, card, 300.0);
    reactor.handle_resize(&mut doc, card, 600.0);
    assert_eq!(doc.style(card, "display"), Some("flex"));

    reactor.handle_resize(&mut doc, card, 1200.0);
    assert_eq!(doc.style(card, "display"), None);
}

#[test]
fn test_dropping_container_classes_tears_down() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let el = doc.append(root, "min-100:hidden");
    let mut reactor = started(&mut doc, Compiler::new());
    reactor.handle_resize(&mut doc, el, 200.0);
    assert_eq!(doc.style(el, "display"), Some("none"));

    doc.set_class_attr(el, "block");
    reactor.handle_mutations(&mut doc, &[Mutation::class(el)]);
    assert_eq!(doc.style(el, "display"), None);
    assert!(!doc.is_size_observed(el));
    assert!(reactor.containers().is_empty());
}

#[test]
fn test_detached_elements_stop_observing() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let list = doc.append(root, "");
    let item = doc.append(list, "max-200:hidden visible:opacity-100 onload:opacity-100");
    let mut reactor = started(&mut doc, Compiler::new());
    assert!(doc.is_size_observed(item));
    assert!(doc.intersection_threshold(item).is_some());

    doc.detach(list);
    reactor.handle_mutations(&mut doc, &[Mutation::removed([list])]);
    assert!(!doc.is_size_observed(item));
    assert!(doc.intersection_threshold(item).is_none());
    assert_eq!(reactor.visibility().pending(), 0);

    // Late reports for a released element are ignored.
    reactor.handle_resize(&mut doc, item, 10.0);
    assert_eq!(doc.style(item, "display"), None);
}

#[test]
fn test_added_subtree_is_compiled() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let mut reactor = started(&mut doc, Compiler::new());

    let section = doc.create_element("m-2");
    let child = doc.create_element("hover:underline");
    doc.append_child(section, child);
    doc.append_child(root, section);
    reactor.handle_mutations(&mut doc, &[Mutation::added([section])]);

    let sheet = reactor.compiler().sheets().utilities();
    assert!(sheet.contains(".m-2 { margin: 8px; }"));
    assert!(sheet.contains(".hover\\:underline:hover { text-decoration: underline; }"));
}

#[test]
fn test_visibility_and_deferred_classes() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let hero = doc.append(root, "opacity-0 visible:opacity-100 onload:rounded");
    let mut reactor = started(&mut doc, Compiler::new());

    assert!(reactor
        .compiler()
        .sheets()
        .utilities()
        .contains(".visible\\:opacity-100.pw-visible { opacity: 1; }"));

    reactor.handle_intersection(&mut doc, hero, 0.5);
    assert!(doc.has_class(hero, "pw-visible"));
    reactor.handle_intersection(&mut doc, hero, 0.1);
    assert!(!doc.has_class(hero, "pw-visible"));

    reactor.advance_time(&mut doc, ONLOAD_DELAY_MS - 1);
    assert!(!doc.has_class(hero, "rounded"));
    reactor.advance_time(&mut doc, ONLOAD_DELAY_MS);
    assert!(doc.has_class(hero, "rounded"));
    assert!(reactor
        .compiler()
        .sheets()
        .utilities()
        .contains(".rounded { border-radius: 4px; }"));
}

#[test]
fn test_runtime_shortcut_registration() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let el = doc.append(root, "card");
    let mut reactor = started(&mut doc, Compiler::new());
    assert!(reactor.compiler().sheets().shortcuts().is_empty());

    reactor.compiler_mut().add_shortcut("card", "p-4 rounded");
    reactor.handle_mutations(&mut doc, &[Mutation::class(el)]);
    assert!(reactor.compiler().sheets().shortcuts().starts_with(".card {\n"));
}

#[test]
fn test_missing_size_observer_degrades() {
    let mut doc = MemoryDocument::without_size_observer();
    let root = doc.root();
    let a = doc.append(root, "max-320:flex p-1");
    doc.append(root, "min-10:block");
    let mut reactor = started(&mut doc, Compiler::new());

    reactor.handle_resize(&mut doc, a, 100.0);
    assert_eq!(doc.style(a, "display"), None);
    assert!(reactor.compiler().sheets().utilities().contains(".p-1"));
    assert_eq!(
        reactor.compiler().diagnostics().warnings(),
        &[Warning::SizeObserverUnavailable]
    );
}

#[test]
fn test_viewport_classes_follow_breakpoints() {
    let mut doc = MemoryDocument::new();
    let root = doc.root();
    let config = Config::from_json(
        r#"{ "bodyClass": true, "breakpoints": { "small": "(max-width: 700px)", "large": "(min-width: 701px)" } }"#,
    )
    .unwrap();
    let mut reactor = started(&mut doc, Compiler::with_config(config));

    reactor.handle_viewport(&mut doc, 700.0);
    assert_eq!(doc.class_attr(root), Some("pw-small"));

    reactor.handle_viewport(&mut doc, 701.0);
    assert_eq!(doc.class_attr(root), Some("pw-large"));
}

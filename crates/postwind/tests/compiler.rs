//! End-to-end compiler behaviour through the public API.

use postwind::{Compiler, Config, Warning};

const SITE: &str = include_str!("fixtures/site.yaml");

fn site() -> Compiler {
    Compiler::with_config(Config::from_yaml(SITE).expect("fixture parses"))
}

#[test]
fn test_yaml_fixture_applies() {
    let compiler = site();

    let keys: Vec<_> = compiler.breakpoints().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["phone", "tablet", "desktop"]);
    assert!(compiler.body_class());

    // Preload, in order.
    assert_eq!(
        compiler.sheets().utilities(),
        ".flex { display: flex; }\n.p-4 { padding: 16px; }\n.m-2 { margin: 8px; }"
    );
    // Selector shortcuts are compiled on registration.
    assert!(compiler.sheets().shortcuts().starts_with("nav a {\n"));
}

#[test]
fn test_shorthand_follows_configured_breakpoints() {
    let mut compiler = site();
    let rules = compiler.compile("p-1|2|3").unwrap().to_string();
    let lines: Vec<_> = rules.lines().collect();
    assert_eq!(
        lines,
        vec![
            "@media (max-width: 599px) { .p-1\\|2\\|3 { padding: 4px; } }",
            "@media (min-width: 600px) and (max-width: 1199px) { .p-1\\|2\\|3 { padding: 8px; } }",
            "@media (min-width: 1200px) { .p-1\\|2\\|3 { padding: 12px; } }",
        ]
    );

    assert_eq!(compiler.compile("p-1|2"), None);
    assert!(compiler.compile("p-1:2").is_some());
}

#[test]
fn test_two_breakpoint_shorthand() {
    let mut compiler = Compiler::with_config(
        Config::new()
            .breakpoint("a", "(max-width: 100px)")
            .breakpoint("b", "(min-width: 101px)"),
    );
    let rules = compiler.compile("m-1|2").unwrap();
    assert!(rules.contains("@media (max-width: 100px) { .m-1\\|2 { margin: 4px; } }"));
    assert!(rules.contains("@media (min-width: 101px) { .m-1\\|2 { margin: 8px; } }"));
    assert_eq!(compiler.compile("m-1|2|3"), None);
}

#[test]
fn test_nested_shortcut_rule() {
    let mut compiler = site();
    let css = compiler.compile("btn-primary").unwrap().to_string();
    assert_eq!(
        css,
        ".btn-primary {\n  padding-left: 16px;\n  padding-right: 16px;\n  padding-top: 8px;\n  \
         padding-bottom: 8px;\n  border-radius: 4px;\n  background-color: #3b82f6;\n  \
         color: white;\n  &:hover {\n    background-color: #2563eb;\n  }\n}"
    );
    assert!(compiler.sheets().shortcuts().ends_with(&css));
}

#[test]
fn test_cycles_emit_nothing() {
    let mut compiler = Compiler::with_config(
        Config::new()
            .shortcut("a", "a b")
            .shortcut("x", "p-1 y")
            .shortcut("y", "x"),
    );
    assert_eq!(compiler.compile("a"), None);
    assert_eq!(compiler.compile("x"), None);
    assert_eq!(compiler.compile("y"), None);
    assert!(compiler.sheets().shortcuts().is_empty());
    assert!(compiler.sheets().utilities().is_empty());

    let cyclic = compiler
        .diagnostics()
        .warnings()
        .iter()
        .filter(|w| matches!(w, Warning::CyclicShortcut { .. }))
        .count();
    assert_eq!(cyclic, 3);
}

#[test]
fn test_importance_levels() {
    let mut compiler = Compiler::new();
    let important = compiler.compile("m-4!").unwrap().to_string();
    assert!(important.ends_with("margin: 16px !important; }"));

    let specific = compiler.compile("m-4!!").unwrap().to_string();
    assert!(specific.starts_with("html body "));
    assert!(!specific.contains("!important"));
}

#[test]
fn test_explicit_position_outranks_offset_default() {
    let mut compiler = Compiler::new();
    let explicit = compiler.compile("absolute").unwrap().to_string();
    // Two extra type selectors beat any single-class rule.
    assert!(explicit.starts_with("html body .absolute {"));

    // The offset default sits under `:where(..)` whatever the modifiers, so
    // it never outranks an explicit position.
    for token in ["top-0", "hover:top-0", "dark:top-0", "top-0!", "top-0!!", "m:right-2"] {
        let css = compiler.compile(token).unwrap().to_string();
        let default_rule = css
            .split("} ")
            .find(|rule| rule.contains("position: relative;"))
            .unwrap_or_else(|| panic!("{} has no offset default", token));
        assert!(default_rule.contains(":where("), "{}: {}", token, css);
        assert!(!default_rule.contains("!important"), "{}: {}", token, css);
    }
}

#[test]
fn test_breakpoint_prefix_on_shorthand() {
    let mut compiler = Compiler::new();
    let rules = compiler.compile("m:p-10|20|30!").unwrap().to_string();
    for line in rules.lines() {
        assert!(line.starts_with("@media (max-width: 640px) {"), "{}", line);
        assert!(line.contains("!important"), "{}", line);
    }
    assert_eq!(rules.lines().count(), 3);
}

#[test]
fn test_keyword_and_shortcut_conflict_warns_either_way() {
    let mut compiler = Compiler::new();
    compiler.add_shortcut("panel", "p-4 rounded");
    compiler.add_keyword("panel", "display: grid;");
    compiler.add_shortcut("flex", "p-1");

    let shadowed: Vec<_> = compiler
        .diagnostics()
        .warnings()
        .iter()
        .filter_map(|w| match w {
            Warning::ShortcutShadowsKeyword { name } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(shadowed, vec!["panel", "flex"]);
    assert!(compiler.compile("panel").unwrap().starts_with(".panel {\n"));
}

#[test]
fn test_fractions() {
    let mut compiler = Compiler::new();
    assert!(compiler.compile("w-1/3").unwrap().contains("width: 33.333333%;"));
    assert!(compiler.compile("w-1/2").unwrap().contains("width: 50.000000%;"));
    assert_eq!(compiler.compile("w-1/0"), None);
}

#[test]
fn test_arbitrary_values() {
    let mut compiler = Compiler::new();
    assert_eq!(
        compiler.compile("w-[calc(100%_-_2rem)]"),
        Some(".w-\\[calc\\(100\\%_-_2rem\\)\\] { width: calc(100% - 2rem); }")
    );
    assert_eq!(
        compiler.compile("bg-[#ff0000]"),
        Some(".bg-\\[\\#ff0000\\] { background-color: #ff0000; }")
    );
    assert_eq!(
        compiler.compile("text-[rgb(1,2,3)]"),
        Some(".text-\\[rgb\\(1\\,2\\,3\\)\\] { color: rgb(1,2,3); }")
    );
}

#[test]
fn test_garbage_never_stops_processing() {
    let mut compiler = Compiler::new();
    for token in ["", "!", "!!", ":", "::", "p-", "-", "--", "p-||", "[", "]", "w-/", "m:", "p-4!!!", "@"] {
        let _ = compiler.compile(token);
    }
    assert_eq!(compiler.compile("p-4"), Some(".p-4 { padding: 16px; }"));
}

#[test]
fn test_describe_listing() {
    let compiler = site();
    let listing = compiler.describe().unwrap();
    assert!(listing.contains("phone"));
    assert!(listing.contains("(min-width: 1200px)"));
    assert!(listing.contains("btn-primary"));
    assert!(listing.contains("nav a"));
}

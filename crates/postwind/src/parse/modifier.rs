//! Modifier parsing: `m:hover:p-4!` into breakpoint, states, importance and base.
//!
//! Prefix segments are consumed left to right while they name a configured
//! breakpoint or a supported pseudo-state. The first segment that is neither
//! ends the walk, and everything from there on (colons included) is the base
//! token. Parsing never fails; an odd base token just resolves to nothing.

use crate::config::Breakpoints;

/// How hard a rule fights the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Importance {
    #[default]
    None,
    /// `!` suffix: every declaration value gets `!important`.
    Important,
    /// `!!` suffix: the selector gets an ancestor chain instead.
    HighSpecificity,
}

impl Importance {
    /// The raw-token suffix that produces this level.
    pub fn suffix(self) -> &'static str {
        match self {
            Importance::None => "",
            Importance::Important => "!",
            Importance::HighSpecificity => "!!",
        }
    }
}

/// Splits a trailing `!!` or `!` off a raw token.
pub fn split_importance(raw: &str) -> (&str, Importance) {
    if let Some(rest) = raw.strip_suffix("!!") {
        (rest, Importance::HighSpecificity)
    } else if let Some(rest) = raw.strip_suffix('!') {
        (rest, Importance::Important)
    } else {
        (raw, Importance::None)
    }
}

/// A supported state or pseudo-element prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoState {
    Hover,
    Focus,
    Active,
    Disabled,
    Visited,
    FocusWithin,
    FocusVisible,
    First,
    Last,
    Odd,
    Even,
    /// Gated by the visibility helper class.
    Visible,
    Checked,
    Target,
    Open,
    PlaceholderShown,
    /// Targets immediate children instead of the element itself.
    Children,
    /// Applies under a `.dark` ancestor.
    Dark,
    Before,
    After,
    Placeholder,
    Selection,
    Marker,
    FirstLine,
    FirstLetter,
    File,
    Backdrop,
}

/// Class toggled on elements at least half in view.
pub const VISIBLE_CLASS: &str = "pw-visible";

/// Ancestor class that switches dark-mode rules on.
pub const DARK_CLASS: &str = "dark";

const ALL_STATES: &[PseudoState] = &[
    PseudoState::Hover,
    PseudoState::Focus,
    PseudoState::Active,
    PseudoState::Disabled,
    PseudoState::Visited,
    PseudoState::FocusWithin,
    PseudoState::FocusVisible,
    PseudoState::First,
    PseudoState::Last,
    PseudoState::Odd,
    PseudoState::Even,
    PseudoState::Visible,
    PseudoState::Checked,
    PseudoState::Target,
    PseudoState::Open,
    PseudoState::PlaceholderShown,
    PseudoState::Children,
    PseudoState::Dark,
    PseudoState::Before,
    PseudoState::After,
    PseudoState::Placeholder,
    PseudoState::Selection,
    PseudoState::Marker,
    PseudoState::FirstLine,
    PseudoState::FirstLetter,
    PseudoState::File,
    PseudoState::Backdrop,
];

impl PseudoState {
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_STATES.iter().copied().find(|state| state.name() == name)
    }

    /// Prefix spelling in a raw token.
    pub fn name(self) -> &'static str {
        match self {
            PseudoState::Hover => "hover",
            PseudoState::Focus => "focus",
            PseudoState::Active => "active",
            PseudoState::Disabled => "disabled",
            PseudoState::Visited => "visited",
            PseudoState::FocusWithin => "focus-within",
            PseudoState::FocusVisible => "focus-visible",
            PseudoState::First => "first",
            PseudoState::Last => "last",
            PseudoState::Odd => "odd",
            PseudoState::Even => "even",
            PseudoState::Visible => "visible",
            PseudoState::Checked => "checked",
            PseudoState::Target => "target",
            PseudoState::Open => "open",
            PseudoState::PlaceholderShown => "placeholder-shown",
            PseudoState::Children => "children",
            PseudoState::Dark => "dark",
            PseudoState::Before => "before",
            PseudoState::After => "after",
            PseudoState::Placeholder => "placeholder",
            PseudoState::Selection => "selection",
            PseudoState::Marker => "marker",
            PseudoState::FirstLine => "first-line",
            PseudoState::FirstLetter => "first-letter",
            PseudoState::File => "file",
            PseudoState::Backdrop => "backdrop",
        }
    }

    /// Selector fragment appended after the class selector.
    ///
    /// `Dark` has no suffix; it becomes an ancestor prefix instead.
    pub fn selector(self) -> &'static str {
        match self {
            PseudoState::Hover => ":hover",
            PseudoState::Focus => ":focus",
            PseudoState::Active => ":active",
            PseudoState::Disabled => ":disabled",
            PseudoState::Visited => ":visited",
            PseudoState::FocusWithin => ":focus-within",
            PseudoState::FocusVisible => ":focus-visible",
            PseudoState::First => ":first-child",
            PseudoState::Last => ":last-child",
            PseudoState::Odd => ":nth-child(odd)",
            PseudoState::Even => ":nth-child(even)",
            PseudoState::Visible => ".pw-visible",
            PseudoState::Checked => ":checked",
            PseudoState::Target => ":target",
            PseudoState::Open => "[open]",
            PseudoState::PlaceholderShown => ":placeholder-shown",
            PseudoState::Children => " > *",
            PseudoState::Dark => "",
            PseudoState::Before => "::before",
            PseudoState::After => "::after",
            PseudoState::Placeholder => "::placeholder",
            PseudoState::Selection => "::selection",
            PseudoState::Marker => "::marker",
            PseudoState::FirstLine => "::first-line",
            PseudoState::FirstLetter => "::first-letter",
            PseudoState::File => "::file-selector-button",
            PseudoState::Backdrop => "::backdrop",
        }
    }

    pub fn is_pseudo_element(self) -> bool {
        self.selector().starts_with("::")
    }
}

/// A raw token split into its modifiers and base.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedToken {
    pub breakpoint: Option<String>,
    pub pseudo_states: Vec<PseudoState>,
    pub importance: Importance,
    pub base: String,
}

impl ParsedToken {
    pub fn has_state(&self, state: PseudoState) -> bool {
        self.pseudo_states.contains(&state)
    }

    /// Rebuilds the `state:state:` prefix, without the breakpoint.
    pub fn state_prefix(&self) -> String {
        self.pseudo_states
            .iter()
            .map(|state| format!("{}:", state.name()))
            .collect()
    }
}

/// Splits `raw` into breakpoint, pseudo-states, importance and base token.
pub fn parse_token(raw: &str, breakpoints: &Breakpoints) -> ParsedToken {
    let (body, importance) = split_importance(raw);
    let segments: Vec<&str> = body.split(':').collect();

    let mut parsed = ParsedToken {
        importance,
        ..ParsedToken::default()
    };

    let mut consumed = 0;
    // The last segment is always the base, even when it names a state.
    while consumed + 1 < segments.len() {
        let segment = segments[consumed];
        if parsed.breakpoint.is_none() && breakpoints.contains_key(segment) {
            parsed.breakpoint = Some(segment.to_string());
        } else if let Some(state) = PseudoState::from_name(segment) {
            parsed.pseudo_states.push(state);
        } else {
            break;
        }
        consumed += 1;
    }

    parsed.base = segments[consumed..].join(":");
    log::trace!("parsed '{}' into {:?}", raw, parsed);
    parsed
}

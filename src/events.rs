//! Event handling split into classification (reads the DOM) and a pure
//! decision step that can be tested without a document.

use kuchiki::NodeRef;

use crate::dom;
use crate::preference::{EffectiveTheme, Preference};

#[derive(Debug, Clone)]
pub enum Event {
    /// A click whose target is this node.
    Click(NodeRef),
    /// The OS color-scheme signal changed.
    SchemeChanged,
    /// The document finished its initial load.
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Click inside a mode-selection control; `None` when its value is not a mode.
    ModeControl(Option<Preference>),
    Toggle,
    OtherClick,
    SchemeChanged,
    Loaded,
}

/// State a decision may look at, read just before deciding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub stored: Preference,
    pub root_theme: Option<EffectiveTheme>,
    pub system: EffectiveTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Persist and apply.
    SetPreference(Preference),
    /// Apply without touching storage.
    Apply(Preference),
    Ignore,
}

/// Mode-selection controls take priority over toggles when nested.
pub fn classify_click(target: &NodeRef) -> Trigger {
    if let Some(control) = dom::closest(target, dom::SET_SELECTOR) {
        let mode = dom::attr(&control, dom::SET_ATTR)
            .as_deref()
            .and_then(Preference::parse);
        return Trigger::ModeControl(mode);
    }
    if dom::closest(target, dom::TOGGLE_SELECTOR).is_some() {
        return Trigger::Toggle;
    }
    Trigger::OtherClick
}

pub fn classify(event: &Event) -> Trigger {
    match event {
        Event::Click(target) => classify_click(target),
        Event::SchemeChanged => Trigger::SchemeChanged,
        Event::Loaded => Trigger::Loaded,
    }
}

pub fn decide(trigger: Trigger, snapshot: &Snapshot) -> Action {
    match trigger {
        Trigger::ModeControl(Some(mode)) => Action::SetPreference(mode),
        Trigger::ModeControl(None) | Trigger::OtherClick => Action::Ignore,
        Trigger::Toggle => {
            let current = snapshot.root_theme.unwrap_or(snapshot.system);
            Action::SetPreference(current.opposite().into())
        }
        Trigger::SchemeChanged => match snapshot.stored {
            Preference::System => Action::Apply(Preference::System),
            Preference::Light | Preference::Dark => Action::Ignore,
        },
        Trigger::Loaded => Action::Apply(snapshot.stored),
    }
}

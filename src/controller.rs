use kuchiki::NodeRef;

use crate::dom;
use crate::events::{self, Action, Event, Snapshot, Trigger};
use crate::preference::{self, EffectiveTheme, Preference};
use crate::scheme::ColorSchemeSource;
use crate::storage::{PreferenceStore, STORAGE_KEY};

pub const SYSTEM_LABEL: &str = "Тема: Системная";
pub const DARK_LABEL: &str = "Тема: Темная";
pub const LIGHT_LABEL: &str = "Тема: Светлая";

/// `system` wins over the resolved theme so the button says where the theme
/// comes from, not just what it is.
pub fn label_for(preference: Preference, effective: EffectiveTheme) -> &'static str {
    match (preference, effective) {
        (Preference::System, _) => SYSTEM_LABEL,
        (_, EffectiveTheme::Dark) => DARK_LABEL,
        (_, EffectiveTheme::Light) => LIGHT_LABEL,
    }
}

/// Brings every toggle button in `document` in line with the given pair.
pub fn refresh_toggle_buttons(
    document: &NodeRef,
    preference: Preference,
    effective: EffectiveTheme,
) {
    let label = label_for(preference, effective);
    let pressed = if effective.is_dark() { "true" } else { "false" };

    let buttons = dom::toggle_buttons(document);
    for button in &buttons {
        if let Some(target) = dom::label_target(button) {
            dom::set_text(target.as_node(), label);
        }
        let mut attrs = button.attributes.borrow_mut();
        attrs.insert(dom::PRESSED_ATTR, pressed.to_string());
        attrs.insert(dom::MODE_ATTR, preference.as_str().to_string());
    }
    tracing::debug!(count = buttons.len(), %preference, %effective, "refreshed toggle buttons");
}

/// Applies a stored theme preference to documents.
///
/// The controller holds no state of its own: the preference lives in the
/// store and everything else is derived from it and the color-scheme signal
/// each time an operation runs.
pub struct ThemeController<S, C> {
    store: S,
    scheme: C,
}

impl<S: PreferenceStore, C: ColorSchemeSource> ThemeController<S, C> {
    pub fn new(store: S, scheme: C) -> Self {
        Self { store, scheme }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheme(&self) -> &C {
        &self.scheme
    }

    pub fn get_system_theme(&self) -> EffectiveTheme {
        self.scheme.theme()
    }

    /// Never fails: missing, empty, unknown and unreadable values all mean `system`.
    pub fn get_preference(&self) -> Preference {
        let raw = match self.store.load(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(
                    error = %format!("{err:#}"),
                    "cannot read theme preference; using system"
                );
                return Preference::System;
            }
        };
        let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
            return Preference::System;
        };
        match Preference::parse(&raw) {
            Some(preference) => preference,
            None => {
                tracing::warn!(value = %raw, "ignoring unknown stored theme preference");
                Preference::System
            }
        }
    }

    pub fn compute_effective_theme(&self, preference: Preference) -> EffectiveTheme {
        preference::compute_effective_theme(preference, self.get_system_theme())
    }

    pub fn apply_theme(&self, document: &NodeRef, preference: Preference) -> EffectiveTheme {
        let effective = self.compute_effective_theme(preference);
        dom::set_root_theme(document, effective);
        refresh_toggle_buttons(document, preference, effective);
        tracing::info!(%preference, theme = %effective, "applied theme");
        effective
    }

    /// Persists `mode` and re-applies it, even when it did not change.
    ///
    /// A failed write is logged; the page still shows the new theme.
    pub fn set_preference(&self, document: &NodeRef, mode: Preference) -> EffectiveTheme {
        if let Err(err) = self.store.save(STORAGE_KEY, mode.as_str()) {
            tracing::warn!(error = %format!("{err:#}"), %mode, "cannot persist theme preference");
        }
        self.apply_theme(document, mode)
    }

    pub fn snapshot(&self, document: &NodeRef) -> Snapshot {
        Snapshot {
            stored: self.get_preference(),
            root_theme: dom::root_theme(document),
            system: self.get_system_theme(),
        }
    }

    /// Runs one event to completion and returns what was done.
    pub fn dispatch(&self, document: &NodeRef, event: &Event) -> Action {
        self.dispatch_trigger(document, events::classify(event))
    }

    pub fn dispatch_trigger(&self, document: &NodeRef, trigger: Trigger) -> Action {
        let action = events::decide(trigger, &self.snapshot(document));
        tracing::debug!(?trigger, ?action, "theme event");
        match action {
            Action::SetPreference(mode) => {
                self.set_preference(document, mode);
            }
            Action::Apply(preference) => {
                self.apply_theme(document, preference);
            }
            Action::Ignore => {}
        }
        action
    }

    /// Same as clicking a toggle button; returns the preference now stored.
    pub fn toggle(&self, document: &NodeRef) -> Preference {
        match self.dispatch_trigger(document, Trigger::Toggle) {
            Action::SetPreference(mode) | Action::Apply(mode) => mode,
            Action::Ignore => self.get_preference(),
        }
    }
}

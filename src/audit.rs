use std::fmt;

use kuchiki::NodeRef;

use crate::dom;
use crate::preference::Preference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// A mode-selection control whose value is not a mode; clicks on it are ignored.
    InvalidModeValue { value: String },
    /// A toggle with no label child; only its attributes will be updated.
    ToggleWithoutLabel { index: usize },
    /// Nothing on the page lets the user change the theme.
    NoControls,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::InvalidModeValue { value } => write!(
                f,
                "[{}=\"{}\"] is not light, dark or system",
                dom::SET_ATTR,
                value
            ),
            Finding::ToggleWithoutLabel { index } => write!(
                f,
                "toggle #{} has no [{}] child; its label will not change",
                index + 1,
                dom::LABEL_ATTR
            ),
            Finding::NoControls => write!(
                f,
                "page has no [{}] or [{}] controls",
                dom::TOGGLE_ATTR,
                dom::SET_ATTR
            ),
        }
    }
}

/// Checks a page against the attributes the switcher relies on.
pub fn audit(document: &NodeRef) -> Vec<Finding> {
    let mut findings = Vec::new();

    let controls = dom::mode_controls(document);
    for control in &controls {
        let value = dom::attr(control, dom::SET_ATTR).unwrap_or_default();
        if Preference::parse(&value).is_none() {
            findings.push(Finding::InvalidModeValue { value });
        }
    }

    let toggles = dom::toggle_buttons(document);
    for (index, toggle) in toggles.iter().enumerate() {
        if dom::label_target(toggle).is_none() {
            findings.push(Finding::ToggleWithoutLabel { index });
        }
    }

    if controls.is_empty() && toggles.is_empty() {
        findings.push(Finding::NoControls);
    }
    findings
}

pub fn assert_clean(document: &NodeRef) -> anyhow::Result<()> {
    let findings = audit(document);
    if let Some(first) = findings.first() {
        anyhow::bail!(
            "theme audit failed with {} finding(s); first: {}",
            findings.len(),
            first
        );
    }
    Ok(())
}

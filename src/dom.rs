//! The page contract: which attributes the switcher reads and writes.

use kuchiki::iter::NodeIterator as _;
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use crate::preference::EffectiveTheme;

pub const ROOT_THEME_ATTR: &str = "data-theme";
pub const ROOT_FRAMEWORK_THEME_ATTR: &str = "data-bs-theme";

pub const SET_ATTR: &str = "data-theme-set";
pub const TOGGLE_ATTR: &str = "data-theme-toggle";
pub const LABEL_ATTR: &str = "data-theme-label";
pub const MODE_ATTR: &str = "data-theme-mode";
pub const PRESSED_ATTR: &str = "aria-pressed";

pub const SET_SELECTOR: &str = "[data-theme-set]";
pub const TOGGLE_SELECTOR: &str = "[data-theme-toggle]";
pub const LABEL_SELECTOR: &str = "[data-theme-label]";

pub type Element = NodeDataRef<ElementData>;

pub fn parse_document(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// The `<html>` element. html5ever always synthesizes one.
pub fn root_element(document: &NodeRef) -> Option<Element> {
    document.select_first("html").ok()
}

pub fn set_root_theme(document: &NodeRef, theme: EffectiveTheme) {
    let Some(root) = root_element(document) else {
        tracing::debug!("document has no root element");
        return;
    };
    let mut attrs = root.attributes.borrow_mut();
    attrs.insert(ROOT_THEME_ATTR, theme.as_str().to_string());
    attrs.insert(ROOT_FRAMEWORK_THEME_ATTR, theme.as_str().to_string());
}

/// The theme currently on the root, if it is a valid one.
pub fn root_theme(document: &NodeRef) -> Option<EffectiveTheme> {
    let root = root_element(document)?;
    let theme = root
        .attributes
        .borrow()
        .get(ROOT_THEME_ATTR)
        .and_then(EffectiveTheme::parse);
    theme
}

pub fn toggle_buttons(document: &NodeRef) -> Vec<Element> {
    match document.select(TOGGLE_SELECTOR) {
        Ok(nodes) => nodes.collect(),
        Err(()) => Vec::new(),
    }
}

pub fn mode_controls(document: &NodeRef) -> Vec<Element> {
    match document.select(SET_SELECTOR) {
        Ok(nodes) => nodes.collect(),
        Err(()) => Vec::new(),
    }
}

/// First label target strictly inside `button`.
pub fn label_target(button: &Element) -> Option<Element> {
    button
        .as_node()
        .descendants()
        .select(LABEL_SELECTOR)
        .ok()?
        .next()
}

/// `node` itself or its nearest ancestor matching `selector`.
pub fn closest(node: &NodeRef, selector: &str) -> Option<Element> {
    node.inclusive_ancestors().select(selector).ok()?.next()
}

/// Replaces all children with a single text node, like `textContent = ...`.
pub fn set_text(node: &NodeRef, text: &str) {
    for child in node.children().collect::<Vec<_>>() {
        child.detach();
    }
    node.append(NodeRef::new_text(text));
}

pub fn attr(element: &Element, name: &str) -> Option<String> {
    element.attributes.borrow().get(name).map(|s| s.to_string())
}

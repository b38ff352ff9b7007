use kuchiki::NodeRef;
use page_theme::{
    Action, DARK_LABEL, EffectiveTheme, Event, FixedColorScheme, LIGHT_LABEL, MemoryStore,
    Preference, STORAGE_KEY, SYSTEM_LABEL, ThemeController, markers, parse_document,
};

const PAGE: &str = r#"<!doctype html>
<html>
  <body>
    <header>
      <button id="toggle" data-theme-toggle><span data-theme-label>Theme</span></button>
      <button id="toggle-2" data-theme-toggle>
        <i class="icon"></i><span data-theme-label></span>
      </button>
    </header>
    <nav>
      <button id="light" data-theme-set="light"><span class="inner">Light</span></button>
      <button id="dark" data-theme-set="dark">Dark</button>
      <button id="system" data-theme-set="system">System</button>
    </nav>
    <p id="text">Body text</p>
  </body>
</html>"#;

fn node(doc: &NodeRef, selector: &str) -> NodeRef {
    doc.select_first(selector).unwrap().as_node().clone()
}

fn attr(doc: &NodeRef, selector: &str, name: &str) -> Option<String> {
    let element = doc.select_first(selector).unwrap();
    let value = element.attributes.borrow().get(name).map(|s| s.to_string());
    value
}

fn root_theme(doc: &NodeRef) -> Option<String> {
    attr(doc, "html", markers::ROOT_THEME_ATTR)
}

fn label(doc: &NodeRef, toggle: &str) -> String {
    doc.select_first(&format!("{toggle} [data-theme-label]"))
        .unwrap()
        .as_node()
        .text_contents()
}

#[test]
fn absent_preference_with_dark_os_loads_dark_in_system_mode() {
    let controller = ThemeController::new(MemoryStore::new(), FixedColorScheme::new(true));
    let doc = parse_document(PAGE);

    let action = controller.dispatch(&doc, &Event::Loaded);

    assert_eq!(action, Action::Apply(Preference::System));
    assert_eq!(root_theme(&doc).as_deref(), Some("dark"));
    assert_eq!(
        attr(&doc, "html", markers::ROOT_FRAMEWORK_THEME_ATTR).as_deref(),
        Some("dark")
    );
    for toggle in ["#toggle", "#toggle-2"] {
        assert_eq!(attr(&doc, toggle, markers::PRESSED_ATTR).as_deref(), Some("true"));
        assert_eq!(attr(&doc, toggle, markers::MODE_ATTR).as_deref(), Some("system"));
        assert_eq!(label(&doc, toggle), SYSTEM_LABEL);
    }
    // Loading never writes storage.
    assert_eq!(controller.store().get(STORAGE_KEY), None);
}

#[test]
fn selecting_light_overrides_dark_os() {
    let controller = ThemeController::new(MemoryStore::new(), FixedColorScheme::new(true));
    let doc = parse_document(PAGE);
    controller.dispatch(&doc, &Event::Loaded);

    let action = controller.dispatch(&doc, &Event::Click(node(&doc, "#light .inner")));

    assert_eq!(action, Action::SetPreference(Preference::Light));
    assert_eq!(controller.store().get(STORAGE_KEY).as_deref(), Some("light"));
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));
    assert_eq!(label(&doc, "#toggle"), LIGHT_LABEL);
    assert_eq!(attr(&doc, "#toggle", markers::PRESSED_ATTR).as_deref(), Some("false"));
}

#[test]
fn toggle_from_dark_preference_stores_light() {
    let controller = ThemeController::new(
        MemoryStore::with_entry(STORAGE_KEY, "dark"),
        FixedColorScheme::new(false),
    );
    let doc = parse_document(PAGE);
    controller.dispatch(&doc, &Event::Loaded);
    assert_eq!(root_theme(&doc).as_deref(), Some("dark"));

    let action = controller.dispatch(&doc, &Event::Click(node(&doc, "#toggle-2 .icon")));

    assert_eq!(action, Action::SetPreference(Preference::Light));
    assert_eq!(controller.store().get(STORAGE_KEY).as_deref(), Some("light"));
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));
}

#[test]
fn toggle_before_load_falls_back_to_system_theme() {
    let controller = ThemeController::new(MemoryStore::new(), FixedColorScheme::new(true));
    let doc = parse_document(PAGE);

    controller.dispatch(&doc, &Event::Click(node(&doc, "#toggle")));

    assert_eq!(controller.store().get(STORAGE_KEY).as_deref(), Some("light"));
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));
}

#[test]
fn os_change_is_followed_only_in_system_mode() {
    let scheme = FixedColorScheme::new(false);
    let controller = ThemeController::new(MemoryStore::new(), scheme.clone());
    let doc = parse_document(PAGE);
    controller.dispatch(&doc, &Event::Loaded);
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));

    scheme.set_dark(true);
    let action = controller.dispatch(&doc, &Event::SchemeChanged);
    assert_eq!(action, Action::Apply(Preference::System));
    assert_eq!(root_theme(&doc).as_deref(), Some("dark"));
    assert_eq!(attr(&doc, "#toggle", markers::PRESSED_ATTR).as_deref(), Some("true"));

    controller.dispatch(&doc, &Event::Click(node(&doc, "#light")));
    scheme.set_dark(false);
    scheme.set_dark(true);
    let action = controller.dispatch(&doc, &Event::SchemeChanged);
    assert_eq!(action, Action::Ignore);
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));
}

#[test]
fn explicit_dark_survives_os_switching_to_light() {
    let scheme = FixedColorScheme::new(true);
    let controller = ThemeController::new(MemoryStore::new(), scheme.clone());
    let doc = parse_document(PAGE);
    controller.dispatch(&doc, &Event::Loaded);

    controller.dispatch(&doc, &Event::Click(node(&doc, "#dark")));
    assert_eq!(controller.store().get(STORAGE_KEY).as_deref(), Some("dark"));

    scheme.set_dark(false);
    let action = controller.dispatch(&doc, &Event::SchemeChanged);

    assert_eq!(action, Action::Ignore);
    assert_eq!(root_theme(&doc).as_deref(), Some("dark"));
    assert_eq!(attr(&doc, "#toggle", markers::PRESSED_ATTR).as_deref(), Some("true"));
    assert_eq!(label(&doc, "#toggle"), DARK_LABEL);
    assert_eq!(controller.store().get(STORAGE_KEY).as_deref(), Some("dark"));
}

#[test]
fn returning_to_system_mode_resumes_following_os() {
    let scheme = FixedColorScheme::new(true);
    let controller = ThemeController::new(
        MemoryStore::with_entry(STORAGE_KEY, "light"),
        scheme.clone(),
    );
    let doc = parse_document(PAGE);
    controller.dispatch(&doc, &Event::Loaded);
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));

    controller.dispatch(&doc, &Event::Click(node(&doc, "#system")));
    assert_eq!(controller.store().get(STORAGE_KEY).as_deref(), Some("system"));
    assert_eq!(root_theme(&doc).as_deref(), Some("dark"));
    assert_eq!(label(&doc, "#toggle"), SYSTEM_LABEL);

    scheme.set_dark(false);
    controller.dispatch(&doc, &Event::SchemeChanged);
    assert_eq!(root_theme(&doc).as_deref(), Some("light"));
    assert_eq!(label(&doc, "#toggle"), SYSTEM_LABEL);
}

#[test]
fn clicks_elsewhere_change_nothing() {
    let controller = ThemeController::new(MemoryStore::new(), FixedColorScheme::new(false));
    let doc = parse_document(PAGE);
    controller.dispatch(&doc, &Event::Loaded);
    let before = doc.to_string();

    let action = controller.dispatch(&doc, &Event::Click(node(&doc, "#text")));

    assert_eq!(action, Action::Ignore);
    assert_eq!(doc.to_string(), before);
    assert_eq!(controller.store().get(STORAGE_KEY), None);
}

#[test]
fn reselecting_the_same_mode_reapplies() {
    let controller = ThemeController::new(
        MemoryStore::with_entry(STORAGE_KEY, "dark"),
        FixedColorScheme::new(false),
    );
    let doc = parse_document(PAGE);

    // Page not loaded yet: re-selecting still writes the root attributes.
    let action = controller.dispatch(&doc, &Event::Click(node(&doc, "#dark")));
    assert_eq!(action, Action::SetPreference(Preference::Dark));
    assert_eq!(root_theme(&doc).as_deref(), Some("dark"));
    assert_eq!(
        controller.compute_effective_theme(controller.get_preference()),
        EffectiveTheme::Dark
    );
}

pub const BUILTIN_CSS: &str = include_str!("builtin.css");

/// Browser-side switcher for pages that are not processed ahead of time.
///
/// Same contract as [`crate::ThemeController`]: storage key, root attributes,
/// toggle/label/mode markers and labels must stay in step with `dom` and
/// `controller`.
pub const THEME_SWITCH_JS: &str = r#"(function () {
  var storageKey = "theme";
  var root = document.documentElement;
  var media = null;
  try {
    media = window.matchMedia ? window.matchMedia("(prefers-color-scheme: dark)") : null;
  } catch (_) {
    media = null;
  }

  var labels = {
    system: "Тема: Системная",
    dark: "Тема: Темная",
    light: "Тема: Светлая"
  };

  function isMode(value) {
    return value === "light" || value === "dark" || value === "system";
  }

  function systemTheme() {
    return media && media.matches ? "dark" : "light";
  }

  function storedMode() {
    var value = null;
    try {
      value = localStorage.getItem(storageKey);
    } catch (_) {
      value = null;
    }
    return isMode(value) ? value : "system";
  }

  function storeMode(mode) {
    try {
      localStorage.setItem(storageKey, mode);
    } catch (_) {}
  }

  function refreshButtons(mode, theme) {
    var text = mode === "system" ? labels.system : labels[theme];
    var buttons = document.querySelectorAll("[data-theme-toggle]");
    for (var i = 0; i < buttons.length; i++) {
      var button = buttons[i];
      var label = button.querySelector("[data-theme-label]");
      if (label) {
        label.textContent = text;
      }
      button.setAttribute("aria-pressed", theme === "dark" ? "true" : "false");
      button.setAttribute("data-theme-mode", mode);
    }
  }

  function applyTheme(mode) {
    var theme = mode === "system" ? systemTheme() : mode;
    root.setAttribute("data-theme", theme);
    root.setAttribute("data-bs-theme", theme);
    refreshButtons(mode, theme);
  }

  function setMode(mode) {
    storeMode(mode);
    applyTheme(mode);
  }

  function closest(node, selector) {
    while (node && node.nodeType !== 1) {
      node = node.parentNode;
    }
    return node && node.closest ? node.closest(selector) : null;
  }

  document.addEventListener("click", function (event) {
    var control = closest(event.target, "[data-theme-set]");
    if (control) {
      var mode = control.getAttribute("data-theme-set");
      if (isMode(mode)) {
        setMode(mode);
      }
      return;
    }

    if (closest(event.target, "[data-theme-toggle]")) {
      var current = root.getAttribute("data-theme");
      if (current !== "light" && current !== "dark") {
        current = systemTheme();
      }
      setMode(current === "dark" ? "light" : "dark");
    }
  });

  if (media) {
    var onChange = function () {
      if (storedMode() === "system") {
        applyTheme("system");
      }
    };
    if (media.addEventListener) {
      media.addEventListener("change", onChange);
    } else if (media.addListener) {
      media.addListener(onChange);
    }
  }

  if (document.readyState === "loading") {
    document.addEventListener("DOMContentLoaded", function () {
      applyTheme(storedMode());
    });
  } else {
    applyTheme(storedMode());
  }
})();"#;

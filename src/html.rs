use anyhow::Context as _;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::builtin;
use crate::controller::SYSTEM_LABEL;

pub const SCRIPT_ID: &str = "page-theme-script";

/// A standalone page wired up with every control the switcher understands.
pub fn build_demo_page(title: &str) -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (title) }
                style { (PreEscaped(builtin::BUILTIN_CSS)) }
            }
            body {
                header class="pt-container pt-topbar" {
                    h1 { (title) }
                    button type="button" class="pt-btn" data-theme-toggle aria-pressed="false" {
                        span data-theme-label { (SYSTEM_LABEL) }
                    }
                }
                main class="pt-container" {
                    p class="pt-muted" {
                        "Pick a mode explicitly, or use the toggle to flip between light and dark."
                    }
                    div class="pt-modes" {
                        button type="button" class="pt-btn" data-theme-set="light" { "Light" }
                        button type="button" class="pt-btn" data-theme-set="dark" { "Dark" }
                        button type="button" class="pt-btn" data-theme-set="system" { "System" }
                    }
                }
                (switch_script())
            }
        }
    };
    markup.into_string()
}

fn switch_script() -> Markup {
    html! {
        script id=(SCRIPT_ID) { (PreEscaped(builtin::THEME_SWITCH_JS)) }
    }
}

/// Appends the browser script to `<body>` unless the page already has it.
///
/// Returns whether anything was added.
pub fn embed_switch_script(document: &NodeRef) -> anyhow::Result<bool> {
    if document.select_first(&format!("#{SCRIPT_ID}")).is_ok() {
        return Ok(false);
    }
    let body = document
        .select_first("body")
        .map_err(|()| anyhow::anyhow!("page has no <body>"))?;

    let fragment = kuchiki::parse_html().one(switch_script().into_string());
    let script = fragment
        .select_first("script")
        .map_err(|()| anyhow::anyhow!("script fragment did not parse"))?;
    let node = script.as_node().clone();
    node.detach();
    body.as_node().append(node);
    Ok(true)
}

pub fn serialize_document(document: &NodeRef) -> anyhow::Result<String> {
    let mut out = Vec::new();
    document
        .serialize(&mut out)
        .context("serialize document")?;
    String::from_utf8(out).context("document html not utf-8")
}

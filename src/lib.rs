mod audit;
mod builtin;
mod cli;
mod controller;
mod dom;
mod events;
mod html;
mod preference;
mod scheme;
mod storage;

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use kuchiki::NodeRef;

pub use audit::{Finding, audit};
pub use builtin::{BUILTIN_CSS, THEME_SWITCH_JS};
pub use cli::{Args as CliArgs, Command, OptionalPage, PageArgs, SystemMode};
pub use controller::{
    DARK_LABEL, LIGHT_LABEL, SYSTEM_LABEL, ThemeController, label_for, refresh_toggle_buttons,
};
pub use dom::parse_document;
pub use events::{Action, Event, Snapshot, Trigger, decide};
pub use html::{build_demo_page, embed_switch_script, serialize_document};
pub use preference::{EffectiveTheme, Preference, compute_effective_theme};
pub use scheme::{ColorSchemeSource, FixedColorScheme, OsColorScheme, SchemeSource};
pub use storage::{FileStore, MemoryStore, PreferenceStore, STORAGE_KEY};

/// Attribute names making up the page contract.
pub mod markers {
    pub use crate::dom::{
        LABEL_ATTR, MODE_ATTR, PRESSED_ATTR, ROOT_FRAMEWORK_THEME_ATTR, ROOT_THEME_ATTR, SET_ATTR,
        TOGGLE_ATTR,
    };
}

type CliController = ThemeController<FileStore, SchemeSource>;

pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let scheme = match args.system {
        SystemMode::Auto => SchemeSource::Os(OsColorScheme),
        SystemMode::Light => SchemeSource::Fixed(FixedColorScheme::new(false)),
        SystemMode::Dark => SchemeSource::Fixed(FixedColorScheme::new(true)),
    };
    let controller = ThemeController::new(FileStore::new(&args.store), scheme);
    tracing::debug!(store = %args.store.display(), system = ?args.system, "starting");

    match args.command {
        Command::Get => {
            let preference = controller.get_preference();
            let effective = controller.compute_effective_theme(preference);
            println!("preference: {preference}");
            println!("theme: {effective}");
        }
        Command::Set { mode, page } => match page.as_page() {
            Some(page) => {
                let document = read_page(&page.page)?;
                persist(&controller, mode)?;
                controller.apply_theme(&document, mode);
                write_page(&document, page.out_path())?;
            }
            None => persist(&controller, mode)?,
        },
        Command::Toggle { page } => match page.as_page() {
            Some(page) => {
                let document = read_page(&page.page)?;
                controller.dispatch(&document, &Event::Loaded);
                let mode = controller.toggle(&document);
                write_page(&document, page.out_path())?;
                println!("preference: {mode}");
            }
            None => {
                // No page: the current theme is what a freshly loaded page would show.
                let current = controller.compute_effective_theme(controller.get_preference());
                let mode = Preference::from(current.opposite());
                persist(&controller, mode)?;
                println!("preference: {mode}");
            }
        },
        Command::Apply { page, embed_script } => {
            let document = read_page(&page.page)?;
            controller.dispatch(&document, &Event::Loaded);
            if embed_script && html::embed_switch_script(&document)? {
                tracing::info!("embedded switcher script");
            }
            write_page(&document, page.out_path())?;
        }
        Command::Click { page, selector } => {
            let document = read_page(&page.page)?;
            controller.dispatch(&document, &Event::Loaded);
            let target = document
                .select_first(&selector)
                .map_err(|()| anyhow::anyhow!("no element matches selector {selector:?}"))?;
            let action = controller.dispatch(&document, &Event::Click(target.as_node().clone()));
            if action == Action::Ignore {
                tracing::warn!(%selector, "click did not reach a theme control");
            }
            write_page(&document, page.out_path())?;
        }
        Command::Watch {
            page,
            interval_ms,
            max_ticks,
        } => {
            let interval = Duration::from_millis(interval_ms);
            watch_page(&controller, &page, interval, max_ticks).await?;
        }
        Command::Audit { page, strict } => {
            let document = read_page(&page)?;
            let findings = audit::audit(&document);
            for finding in &findings {
                tracing::warn!(page = %page.display(), "{finding}");
            }
            if findings.is_empty() {
                tracing::info!(page = %page.display(), "no theme findings");
            } else if strict {
                audit::assert_clean(&document)?;
            }
        }
        Command::Demo { title, out } => {
            let page = html::build_demo_page(&title);
            write_file(&out, &page)?;
            tracing::info!(out = %out.display(), "wrote demo page");
        }
    }
    Ok(())
}

/// Polls the OS signal and re-applies the page each time it flips.
///
/// The page is written once after the initial load and again only when a
/// scheme change actually re-applied the theme.
pub async fn watch_page<S: PreferenceStore, C: ColorSchemeSource>(
    controller: &ThemeController<S, C>,
    page: &PageArgs,
    interval: Duration,
    max_ticks: Option<u64>,
) -> anyhow::Result<()> {
    let out = page.out_path();
    let document = read_page(&page.page)?;
    controller.dispatch(&document, &Event::Loaded);
    write_page(&document, out)?;

    let mut last_dark = controller.scheme().prefers_dark();
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(10)));
    ticker.tick().await;
    let mut ticks = 0u64;

    loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {}
            res = tokio::signal::ctrl_c() => {
                res.context("listen for ctrl-c")?;
                tracing::info!("interrupted");
                break;
            }
        }
        ticks += 1;

        let dark = controller.scheme().prefers_dark();
        if dark == last_dark {
            continue;
        }
        last_dark = dark;
        tracing::info!(dark, "os color scheme changed");
        if controller.dispatch(&document, &Event::SchemeChanged) != Action::Ignore {
            write_page(&document, out)?;
        }
    }
    Ok(())
}

fn persist(controller: &CliController, mode: Preference) -> anyhow::Result<()> {
    let store = controller.store();
    store
        .save(STORAGE_KEY, mode.as_str())
        .with_context(|| format!("store preference in {}", store.path().display()))?;
    tracing::info!(%mode, "stored theme preference");
    Ok(())
}

fn read_page(path: &Path) -> anyhow::Result<NodeRef> {
    let html =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(dom::parse_document(&html))
}

fn write_page(document: &NodeRef, path: &Path) -> anyhow::Result<()> {
    let html = html::serialize_document(document)?;
    write_file(path, &html)
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::preference::Preference;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SystemMode {
    /// Ask the desktop environment.
    Auto,
    /// Pretend the OS prefers a light scheme.
    Light,
    /// Pretend the OS prefers a dark scheme.
    Dark,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// JSON file holding the persisted preference (created on first write).
    #[arg(long, global = true, default_value = "page-theme.json")]
    pub store: PathBuf,

    /// Source of the OS color-scheme signal: `auto`, `light`, or `dark`.
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub system: SystemMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the stored preference and the theme it resolves to.
    Get,
    /// Store a preference, optionally applying it to a page.
    Set {
        mode: Preference,
        #[command(flatten)]
        page: OptionalPage,
    },
    /// Flip between light and dark, pinning an explicit choice.
    Toggle {
        #[command(flatten)]
        page: OptionalPage,
    },
    /// Apply the stored preference to a page, as on page load.
    Apply {
        #[command(flatten)]
        page: PageArgs,
        /// Also embed the browser-side switcher script.
        #[arg(long)]
        embed_script: bool,
    },
    /// Click the first element matching a CSS selector.
    Click {
        #[command(flatten)]
        page: PageArgs,
        /// CSS selector of the click target (e.g. `[data-theme-set=dark]`).
        #[arg(long)]
        selector: String,
    },
    /// Re-apply the page whenever the OS color scheme changes.
    Watch {
        #[command(flatten)]
        page: PageArgs,
        /// Poll interval for the OS signal.
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Stop after this many polls (runs until Ctrl-C when omitted).
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Check a page for controls the switcher cannot use.
    Audit {
        #[arg(long)]
        page: PathBuf,
        /// Fail when any finding is reported.
        #[arg(long)]
        strict: bool,
    },
    /// Write a standalone demo page with the switcher embedded.
    Demo {
        #[arg(long, default_value = "Theme switcher")]
        title: String,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PageArgs {
    /// HTML page to read.
    #[arg(long)]
    pub page: PathBuf,

    /// Where to write the result. Defaults to overwriting `--page`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, ClapArgs)]
pub struct OptionalPage {
    /// HTML page to update as well.
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Where to write the page. Defaults to overwriting `--page`.
    #[arg(long, requires = "page")]
    pub out: Option<PathBuf>,
}

impl PageArgs {
    pub fn out_path(&self) -> &PathBuf {
        self.out.as_ref().unwrap_or(&self.page)
    }
}

impl OptionalPage {
    pub fn as_page(&self) -> Option<PageArgs> {
        self.page.clone().map(|page| PageArgs {
            page,
            out: self.out.clone(),
        })
    }
}

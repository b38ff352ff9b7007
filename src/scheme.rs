use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dark_light::Mode as OsThemeMode;

use crate::preference::EffectiveTheme;

/// The OS-level "prefers dark color scheme" signal.
pub trait ColorSchemeSource {
    fn prefers_dark(&self) -> bool;

    fn theme(&self) -> EffectiveTheme {
        EffectiveTheme::from_dark(self.prefers_dark())
    }
}

impl<T: ColorSchemeSource + ?Sized> ColorSchemeSource for &T {
    fn prefers_dark(&self) -> bool {
        (**self).prefers_dark()
    }
}

/// Live detection through the desktop environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsColorScheme;

impl ColorSchemeSource for OsColorScheme {
    fn prefers_dark(&self) -> bool {
        matches!(dark_light::detect(), OsThemeMode::Dark)
    }
}

/// A scheme that only changes when told to.
///
/// Clones share the same flag, so a test (or the `--system` override) can hold
/// one handle and flip the signal seen by a controller holding another.
#[derive(Debug, Clone, Default)]
pub struct FixedColorScheme {
    dark: Arc<AtomicBool>,
}

impl FixedColorScheme {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Arc::new(AtomicBool::new(dark)),
        }
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.store(dark, Ordering::Relaxed);
    }
}

impl ColorSchemeSource for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.load(Ordering::Relaxed)
    }
}

/// Either source, picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum SchemeSource {
    Os(OsColorScheme),
    Fixed(FixedColorScheme),
}

impl ColorSchemeSource for SchemeSource {
    fn prefers_dark(&self) -> bool {
        match self {
            SchemeSource::Os(os) => os.prefers_dark(),
            SchemeSource::Fixed(fixed) => fixed.prefers_dark(),
        }
    }
}

//! Light/dark theme selection and palettes.

use crate::chart::ChartStyle;
use crate::error::StorageError;
use crate::storage::KeyValueStore;
use crate::Color;
use serde::{Deserialize, Serialize};

/// Storage key for the selected mode.
pub const THEME_KEY: &str = "vitrine-theme";

/// User-selected theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Always light
    Light,
    /// Always dark
    Dark,
    /// Follow the system preference
    #[default]
    Auto,
}

impl ThemeMode {
    /// Next mode in the toggle order Light → Dark → Auto → Light.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Auto,
            Self::Auto => Self::Light,
        }
    }

    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Parse the stored string form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    /// Whether this mode renders dark given the system preference.
    #[must_use]
    pub const fn is_dark(self, system_prefers_dark: bool) -> bool {
        match self {
            Self::Light => false,
            Self::Dark => true,
            Self::Auto => system_prefers_dark,
        }
    }
}

/// Named colors for one appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Accent
    pub primary: Color,
    /// Darker accent
    pub primary_dark: Color,
    /// Page background
    pub background: Color,
    /// Card background
    pub surface: Color,
    /// Body text
    pub text: Color,
    /// Muted text
    pub text_secondary: Color,
    /// Borders and grid lines
    pub border: Color,
}

impl Palette {
    /// Light appearance.
    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::from_rgba8(0x25, 0x63, 0xeb, 1.0),
            primary_dark: Color::from_rgba8(0x1d, 0x4e, 0xd8, 1.0),
            background: Color::from_rgba8(0xff, 0xff, 0xff, 1.0),
            surface: Color::from_rgba8(0xf8, 0xfa, 0xfc, 1.0),
            text: Color::from_rgba8(0x33, 0x41, 0x55, 1.0),
            text_secondary: Color::from_rgba8(0x64, 0x74, 0x8b, 1.0),
            border: Color::from_rgba8(0xe2, 0xe8, 0xf0, 1.0),
        }
    }

    /// Dark appearance.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::from_rgba8(0x60, 0xa5, 0xfa, 1.0),
            primary_dark: Color::from_rgba8(0x3b, 0x82, 0xf6, 1.0),
            background: Color::from_rgba8(0x0f, 0x17, 0x2a, 1.0),
            surface: Color::from_rgba8(0x1e, 0x29, 0x3b, 1.0),
            text: Color::from_rgba8(0xf1, 0xf5, 0xf9, 1.0),
            text_secondary: Color::from_rgba8(0xcb, 0xd5, 0xe1, 1.0),
            border: Color::from_rgba8(0x33, 0x41, 0x55, 1.0),
        }
    }

    /// Chart colors derived from this palette. Slice colors are shared.
    #[must_use]
    pub fn chart_style(&self) -> ChartStyle {
        ChartStyle {
            series: self.primary,
            series_fill: self.primary.with_alpha(0.3),
            grid: self.border,
            label: self.text_secondary,
            text: self.text,
            ..ChartStyle::default()
        }
    }
}

/// Persists the selected mode and resolves it to a palette.
#[derive(Debug)]
pub struct ThemeManager<S: KeyValueStore> {
    store: S,
    mode: ThemeMode,
}

impl<S: KeyValueStore> ThemeManager<S> {
    /// Load the stored mode; missing or unrecognized values fall back to Auto.
    pub fn new(store: S) -> Self {
        let mode = store
            .get(THEME_KEY)
            .and_then(|stored| {
                let parsed = ThemeMode::parse(&stored);
                if parsed.is_none() {
                    log::warn!("ignoring unknown stored theme '{stored}'");
                }
                parsed
            })
            .unwrap_or_default();
        Self { store, mode }
    }

    /// Selected mode.
    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Select and persist a mode.
    ///
    /// The in-memory mode changes even if persisting fails.
    pub fn set_mode(&mut self, mode: ThemeMode) -> Result<(), StorageError> {
        self.mode = mode;
        log::debug!("theme set to {}", mode.as_str());
        self.store.set(THEME_KEY, mode.as_str())
    }

    /// Advance to the next mode and persist it.
    pub fn cycle(&mut self) -> Result<ThemeMode, StorageError> {
        let next = self.mode.cycle();
        self.set_mode(next)?;
        Ok(next)
    }

    /// Whether the page should render dark right now.
    #[must_use]
    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        self.mode.is_dark(system_prefers_dark)
    }

    /// Palette for the current mode.
    #[must_use]
    pub fn palette(&self, system_prefers_dark: bool) -> Palette {
        if self.is_dark(system_prefers_dark) {
            Palette::dark()
        } else {
            Palette::light()
        }
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

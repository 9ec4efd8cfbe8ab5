//! Language and theme preferences

use serde::{Deserialize, Serialize};

use crate::i18n::{Language, Translator};
use crate::storage::{KeyValueStore, StorageError, LANGUAGE_KEY, THEME_KEY};

/// UI colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn code(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Language and theme, each in its own slot
#[derive(Debug)]
pub struct Preferences<S: KeyValueStore> {
    slots: S,
    language: Language,
    theme: Theme,
}

impl<S: KeyValueStore> Preferences<S> {
    /// Load stored preferences. An unknown language code falls back to `fallback`.
    pub fn open(slots: S, fallback: Language) -> Result<Self, StorageError> {
        let language = slots
            .get(LANGUAGE_KEY)?
            .and_then(|code| Language::from_code(code.trim()))
            .unwrap_or(fallback);
        let theme = slots
            .get(THEME_KEY)?
            .and_then(|code| code.trim().parse::<Theme>().ok())
            .unwrap_or_default();

        tracing::debug!("Preferences: language={}, theme={}", language, theme.code());
        Ok(Self {
            slots,
            language,
            theme,
        })
    }

    /// Same as [`Preferences::open`] using the process locale as fallback
    pub fn open_with_env(slots: S) -> Result<Self, StorageError> {
        Self::open(slots, Language::from_env())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), StorageError> {
        self.slots.set(LANGUAGE_KEY, language.code())?;
        self.language = language;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.slots.set(THEME_KEY, theme.code())?;
        self.theme = theme;
        Ok(())
    }

    pub fn into_slots(self) -> S {
        self.slots
    }
}

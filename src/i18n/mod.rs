//! Localization
//!
//! Language codes, translation tables and locale-aware date labels.

pub mod dates;

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Parse a stored two-letter code. Anything but `es`/`en` is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Pick a language from a POSIX locale string such as `es_AR.UTF-8`
    pub fn from_locale(locale: &str) -> Self {
        if locale.to_ascii_lowercase().starts_with("es") {
            Language::Es
        } else {
            Language::En
        }
    }

    /// Language of the process environment (`LC_ALL`, then `LANG`)
    pub fn from_env() -> Self {
        let locale = std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .unwrap_or_default();
        Self::from_locale(&locale)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// Translatable UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Today,
    Yesterday,
    Participants,
    LastSeenToday,
    NoChats,
    NoMessages,
    You,
    DeletedMessage,
    Photo,
    DeleteEveryone,
    DeleteMe,
    OnlyOwnMessages,
    FilterAll,
    FilterUnread,
    FilterGroups,
    FilterFavorites,
    LoggedOut,
}

/// Translation lookup bound to one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t(&self, key: TextKey) -> &'static str {
        match self.language {
            Language::Es => spanish(key),
            Language::En => english(key),
        }
    }
}

fn spanish(key: TextKey) -> &'static str {
    match key {
        TextKey::Today => "Hoy",
        TextKey::Yesterday => "Ayer",
        TextKey::Participants => "participantes",
        TextKey::LastSeenToday => "últ. vez hoy a las",
        TextKey::NoChats => "No hay chats",
        TextKey::NoMessages => "Sin mensajes",
        TextKey::You => "Tú",
        TextKey::DeletedMessage => "Se eliminó este mensaje",
        TextKey::Photo => "Foto",
        TextKey::DeleteEveryone => "Eliminar para todos",
        TextKey::DeleteMe => "Eliminar para mí",
        TextKey::OnlyOwnMessages => "Solo puedes eliminar para todos tus propios mensajes",
        TextKey::FilterAll => "Todos",
        TextKey::FilterUnread => "No leídos",
        TextKey::FilterGroups => "Grupos",
        TextKey::FilterFavorites => "Favoritos",
        TextKey::LoggedOut => "Sesión cerrada",
    }
}

fn english(key: TextKey) -> &'static str {
    match key {
        TextKey::Today => "Today",
        TextKey::Yesterday => "Yesterday",
        TextKey::Participants => "participants",
        TextKey::LastSeenToday => "last seen today at",
        TextKey::NoChats => "No chats",
        TextKey::NoMessages => "No messages",
        TextKey::You => "You",
        TextKey::DeletedMessage => "This message was deleted",
        TextKey::Photo => "Photo",
        TextKey::DeleteEveryone => "Delete for everyone",
        TextKey::DeleteMe => "Delete for me",
        TextKey::OnlyOwnMessages => "You can only delete your own messages for everyone",
        TextKey::FilterAll => "All",
        TextKey::FilterUnread => "Unread",
        TextKey::FilterGroups => "Groups",
        TextKey::FilterFavorites => "Favorites",
        TextKey::LoggedOut => "Logged out",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("es"), Some(Language::Es));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::En.code(), "en");
    }

    #[test]
    fn test_language_from_locale() {
        assert_eq!(Language::from_locale("es_AR.UTF-8"), Language::Es);
        assert_eq!(Language::from_locale("ES"), Language::Es);
        assert_eq!(Language::from_locale("en_US.UTF-8"), Language::En);
        assert_eq!(Language::from_locale(""), Language::En);
    }

    #[test]
    fn test_translations() {
        assert_eq!(Translator::new(Language::Es).t(TextKey::Today), "Hoy");
        assert_eq!(Translator::new(Language::En).t(TextKey::Yesterday), "Yesterday");
    }

    #[test]
    fn test_delete_refusal_is_translated() {
        let es = Translator::new(Language::Es);
        let en = Translator::new(Language::En);
        assert_eq!(
            es.t(TextKey::OnlyOwnMessages),
            "Solo puedes eliminar para todos tus propios mensajes"
        );
        assert_eq!(
            en.t(TextKey::OnlyOwnMessages),
            "You can only delete your own messages for everyone"
        );
        assert_ne!(es.t(TextKey::DeleteMe), en.t(TextKey::DeleteMe));
    }
}

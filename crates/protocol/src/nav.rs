use serde::{Deserialize, Serialize};

/// A navigable entry as supplied by the page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub key: String,
    pub href: String,
    pub label: String,
}

impl NavItem {
    pub fn new(key: impl Into<String>, href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            href: href.into(),
            label: label.into(),
        }
    }
}

/// A menu entry with its active flag derived from the current route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub href: String,
    pub label: String,
    pub is_active: bool,
}

/// What selecting a menu entry does once the overlay has closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavAction {
    /// Client-side route change.
    Route { path: String },
    /// Smooth-scroll to an element id on the current page.
    Anchor { id: String },
    /// Change route, then scroll to the element once the new page rendered.
    RouteThenAnchor { path: String, id: String },
}

/// Supported site locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
    Zh,
    Es,
    Ar,
    Ja,
    De,
    Fr,
    Pt,
    Ko,
    It,
    He,
}

impl Locale {
    pub const ALL: [Locale; 12] = [
        Self::En,
        Self::Ru,
        Self::Zh,
        Self::Es,
        Self::Ar,
        Self::Ja,
        Self::De,
        Self::Fr,
        Self::Pt,
        Self::Ko,
        Self::It,
        Self::He,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Zh => "zh",
            Self::Es => "es",
            Self::Ar => "ar",
            Self::Ja => "ja",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Pt => "pt",
            Self::Ko => "ko",
            Self::It => "it",
            Self::He => "he",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Unknown or missing codes fall back to the default locale.
    pub fn resolve(code: Option<&str>) -> Self {
        code.and_then(Self::from_code).unwrap_or_default()
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Ar | Self::He)
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ru => "Русский",
            Self::Zh => "中文",
            Self::Es => "Español",
            Self::Ar => "العربية",
            Self::Ja => "日本語",
            Self::De => "Deutsch",
            Self::Fr => "Français",
            Self::Pt => "Português",
            Self::Ko => "한국어",
            Self::It => "Italiano",
            Self::He => "עברית",
        }
    }

    pub fn region(self) -> Region {
        Region::ALL
            .into_iter()
            .find(|r| r.locales().contains(&self))
            .unwrap_or(Region::Amer)
    }
}

/// Grouping used by the language switcher palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Amer,
    Emea,
    Apac,
    Mena,
}

impl Region {
    pub const ALL: [Region; 4] = [Self::Amer, Self::Emea, Self::Apac, Self::Mena];

    pub fn locales(self) -> &'static [Locale] {
        match self {
            Self::Amer => &[Locale::En, Locale::Es, Locale::Pt],
            Self::Emea => &[Locale::De, Locale::Fr, Locale::It, Locale::Ru],
            Self::Apac => &[Locale::Zh, Locale::Ja, Locale::Ko],
            Self::Mena => &[Locale::Ar, Locale::He],
        }
    }
}

/// Display language of a lesson, fixed when the stage is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "ar" | "arabic" => Some(Self::Ar),
            _ => None,
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Ar)
    }
}

/// A piece of on-screen text in both lesson languages. Arabic falls back to English.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bilingual {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,
}

impl Bilingual {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: Some(ar.into()),
        }
    }

    pub fn en_only(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: None,
        }
    }

    pub fn pick(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => self.ar.as_deref().unwrap_or(&self.en),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lesson/locale.rs"]
mod tests;

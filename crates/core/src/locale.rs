use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Interface language, sent to the server in the `lang` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Arabic, the primary interface language.
    #[default]
    Ar,
    /// English.
    En,
}

impl Locale {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Returns whether text in this locale is laid out right-to-left.
    #[must_use]
    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }

    /// Returns the other supported locale.
    #[must_use]
    pub fn other(&self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            other => Err(AppError::Validation(format!("unknown locale '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Locale;

    #[test]
    fn parses_case_insensitively() {
        assert!(matches!("EN".parse::<Locale>(), Ok(Locale::En)));
        assert!(matches!(" ar ".parse::<Locale>(), Ok(Locale::Ar)));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn arabic_is_default_and_rtl() {
        assert_eq!(Locale::default(), Locale::Ar);
        assert!(Locale::Ar.is_rtl());
        assert!(!Locale::En.is_rtl());
    }
}

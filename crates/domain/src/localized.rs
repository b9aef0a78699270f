use tahfeez_core::Locale;

/// A bilingual field as sent by the backend.
///
/// The backend stores `*_ar`, `*_en` and an unlocalized legacy column that
/// older rows still rely on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalizedText<'a> {
    /// Arabic value.
    pub ar: Option<&'a str>,
    /// English value.
    pub en: Option<&'a str>,
    /// Unlocalized legacy value.
    pub legacy: Option<&'a str>,
}

impl<'a> LocalizedText<'a> {
    /// Resolves the text for a locale.
    ///
    /// Order: requested locale, legacy column, other locale. Blank values are
    /// treated as missing; returns `""` when nothing is present.
    #[must_use]
    pub fn resolve(&self, locale: Locale) -> &'a str {
        let (preferred, other) = match locale {
            Locale::Ar => (self.ar, self.en),
            Locale::En => (self.en, self.ar),
        };

        [preferred, self.legacy, other]
            .into_iter()
            .find_map(present)
            .unwrap_or_default()
    }
}

/// Resolves a bilingual field kept as three flat columns.
#[must_use]
pub fn localized<'a>(
    ar: Option<&'a str>,
    en: Option<&'a str>,
    legacy: Option<&'a str>,
    locale: Locale,
) -> &'a str {
    LocalizedText { ar, en, legacy }.resolve(locale)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

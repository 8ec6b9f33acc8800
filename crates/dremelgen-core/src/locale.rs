/// A language code paired with the country it is spoken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub code: &'static str,
    pub country: &'static str,
}

/// Locales a generated `Language` entry may be drawn from.
pub const LOCALES: &[Locale] = &[
    Locale {
        code: "en-us",
        country: "us",
    },
    Locale {
        code: "en-gb",
        country: "gb",
    },
    Locale {
        code: "de-de",
        country: "de",
    },
];

/// Country that belongs to `code`, if the code is a known locale.
pub fn country_for_code(code: &str) -> Option<&'static str> {
    LOCALES
        .iter()
        .find(|locale| locale.code == code)
        .map(|locale| locale.country)
}

//! Known countries and flag glyph derivation.

/// Countries the app knows how to display. Dataset entries whose country
/// code is not listed here are dropped during catalog load.
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("JP", "Japan"),
    ("IN", "India"),
    ("FR", "France"),
    ("DE", "Germany"),
    ("NL", "Netherlands"),
    ("AU", "Australia"),
    ("CA", "Canada"),
    ("BR", "Brazil"),
    ("CN", "China"),
    ("ZA", "South Africa"),
    ("RU", "Russia"),
    ("ES", "Spain"),
    ("IT", "Italy"),
    ("MX", "Mexico"),
];

/// Display name for a 2-letter country code, if known.
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRY_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Regional indicator offset: 'A' (0x41) maps to 🇦 (U+1F1E6).
const FLAG_BASE_OFFSET: u32 = 127_397;

/// Flag emoji for a 2-letter uppercase country code.
///
/// Each ASCII letter is shifted by a fixed Unicode offset into the regional
/// indicator block; the two glyphs concatenated render as the flag.
pub fn flag_glyph(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_uppercase())
        .filter_map(|c| char::from_u32(FLAG_BASE_OFFSET + c as u32))
        .collect()
}

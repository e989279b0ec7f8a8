//! Field text normalization.

use std::fmt::Display;

use deunicode::deunicode_with_tofu;

/// Normalize one field value.
///
/// Applied in order: transliterate to ASCII (accents stripped, characters
/// without a transliteration dropped), upper-case, then collapse every
/// whitespace run into a single space with none at either end.
///
/// The result is always ASCII and `normalize_text(&normalize_text(s)) ==
/// normalize_text(s)`.
pub fn normalize_text(value: &str) -> String {
    let ascii = deunicode_with_tofu(value, "");
    let mut out = String::with_capacity(ascii.len());
    for word in ascii.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().map(|c| c.to_ascii_uppercase()));
    }
    out
}

/// Normalize any displayable value through its `Display` rendering.
pub fn normalize_value<T: Display + ?Sized>(value: &T) -> String {
    normalize_text(&value.to_string())
}

/// Normalize every field of `row` in place.
pub fn normalize_row(row: &mut [String]) {
    for field in row.iter_mut() {
        *field = normalize_text(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize_text("ação"), "ACAO");
        assert_eq!(normalize_text("josé"), "JOSE");
        assert_eq!(normalize_text("são paulo"), "SAO PAULO");
        assert_eq!(normalize_text("Ñandú"), "NANDU");
        assert_eq!(normalize_text("Straße"), "STRASSE");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_text("  ana   maria "), "ANA MARIA");
        assert_eq!(normalize_text("a\t\tb\r\nc"), "A B C");
        assert_eq!(normalize_text("   "), "");
        assert_eq!(normalize_text("dois\x0birmãos"), "DOIS IRMAOS");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_text("JOÃO  DA SILVA");
        assert_eq!(once, "JOAO DA SILVA");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn keeps_empty_and_punctuation() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("12.345.678/0001-90"), "12.345.678/0001-90");
        assert_eq!(normalize_text("av. brasil, 10"), "AV. BRASIL, 10");
    }

    #[test]
    fn renders_non_text_values() {
        assert_eq!(normalize_value(&42), "42");
        assert_eq!(normalize_value(&1.5_f64), "1.5");
        assert_eq!(normalize_value("côte"), "COTE");
    }

    #[test]
    fn normalizes_rows_in_place() {
        let mut row = vec!["  ana  ".to_string(), "rio".to_string(), String::new()];
        normalize_row(&mut row);
        assert_eq!(row, vec!["ANA", "RIO", ""]);
    }
}

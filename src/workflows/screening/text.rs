//! Text helpers shared by the validators, the region resolver and the importer.

/// Known mis-decoded glyphs that show up when the export was saved in the wrong encoding.
pub(crate) const GARBLED_GLYPHS: [char; 3] = ['闖', '驥', '伴'];

pub(crate) fn strip_invisible(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

/// Parses a wage-unit code. Numeric text is truncated toward zero, so `"2.0"` reads as 2.
pub(crate) fn parse_unit_code(value: &str) -> Option<i64> {
    let amount = parse_amount(value)?;
    let truncated = amount.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

pub(crate) fn parse_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Splits a contact field holding one or more addresses.
pub(crate) fn split_emails(value: &str) -> Vec<&str> {
    value
        .split(|c: char| c == ',' || c == '、' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Heuristic for text corrupted by a wrong decode.
pub(crate) fn has_garbled_text(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    if trimmed.chars().any(char::is_whitespace) {
        return true;
    }

    if trimmed
        .chars()
        .any(|c| c.is_ascii_control() && c != '\t' && c != '\n' && c != '\r' && c != '\u{7f}')
    {
        return true;
    }

    trimmed.chars().any(|c| GARBLED_GLYPHS.contains(&c))
}

/// First token from `tokens` (in list order) contained in `text`.
pub(crate) fn first_token_in<'a>(text: &str, tokens: &[&'a str]) -> Option<&'a str> {
    tokens.iter().copied().find(|token| text.contains(token))
}

/// Renders a number the way a spreadsheet shows it: integral values without a fraction.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_codes_truncate_numeric_text() {
        assert_eq!(parse_unit_code("1"), Some(1));
        assert_eq!(parse_unit_code(" 2.0 "), Some(2));
        assert_eq!(parse_unit_code("3.9"), Some(3));
        assert_eq!(parse_unit_code("monthly"), None);
        assert_eq!(parse_unit_code(""), None);
        assert_eq!(parse_unit_code("NaN"), None);
    }

    #[test]
    fn amounts_reject_thousands_separators() {
        assert_eq!(parse_amount("1300"), Some(1300.0));
        assert_eq!(parse_amount("1300.5"), Some(1300.5));
        assert_eq!(parse_amount("1,300"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn emails_split_on_every_supported_separator() {
        let parts = split_emails("a@x.jp, b@x.jp、c@x.jp;d@x.jp\te@x.jp\n f@x.jp");
        assert_eq!(
            parts,
            vec!["a@x.jp", "b@x.jp", "c@x.jp", "d@x.jp", "e@x.jp", "f@x.jp"]
        );
        assert!(split_emails(" ,、; ").is_empty());
    }

    #[test]
    fn garbling_heuristics() {
        assert!(!has_garbled_text("渋谷区"));
        assert!(!has_garbled_text("  渋谷区  "));
        assert!(has_garbled_text("渋谷 区"));
        assert!(has_garbled_text("渋谷\u{3000}区"));
        assert!(has_garbled_text("渋谷\u{1}区"));
        assert!(has_garbled_text("闖谷区"));
        assert!(!has_garbled_text(""));
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(format_number(1300.0), "1300");
        assert_eq!(format_number(1000.5), "1000.5");
    }

    #[test]
    fn invisible_characters_are_stripped() {
        assert_eq!(strip_invisible("\u{feff} 職種\u{200b} "), "職種");
    }
}

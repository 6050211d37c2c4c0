//! core/tags/util.rs
//! Small parsing helpers for tag reading.

/// Pull a 4-digit year out of an ID3v2.4 timestamp ("2001-05-03T12:00").
pub(crate) fn year_from_date_text(s: &str) -> Option<String> {
    let s = s.trim();
    let year: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if year.len() == 4 { Some(year) } else { None }
}

/// "7" for Some(7), "" for None.
pub(crate) fn number_or_empty(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_from_timestamps() {
        assert_eq!(year_from_date_text("2001-05-03T12:00"), Some("2001".into()));
        assert_eq!(year_from_date_text(" 1987 "), Some("1987".into()));
        assert_eq!(year_from_date_text("87"), None);
        assert_eq!(year_from_date_text(""), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(number_or_empty(Some(7)), "7");
        assert_eq!(number_or_empty(None), "");
    }
}

use serde::Deserialize;

use crate::api::NewBook;

#[derive(Debug, Clone, Default, Deserialize, Eq, PartialEq)]
/// Raw values of the "add book" form, exactly as typed
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub copies: String,
}

impl BookForm {
    /// Maps the form into a create payload.
    /// Blank (or non numeric) copies default both counters to 1, a blank year is sent as null.
    pub fn to_new_book(&self) -> NewBook {
        let copies = parse_leading_int(&self.copies).unwrap_or(1);
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            publisher: self.publisher.clone(),
            year: parse_leading_int(&self.year),
            copies,
            available_copies: copies,
        }
    }
}

/// Parses an optionally signed run of leading digits, ignoring surrounding whitespace
/// and anything after the digits. Returns None when there are no digits, values past
/// the i64 range saturate.
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let (sign, rest) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value.strip_prefix('+').unwrap_or(value)),
    };
    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    match format!("{}{}", sign, digits).parse() {
        Ok(number) => Some(number),
        Err(_) if sign.is_empty() => Some(i64::MAX),
        Err(_) => Some(i64::MIN),
    }
}

#[cfg(test)]
mod form_tests {
    use crate::form::{parse_leading_int, BookForm};

    #[test]
    fn test_blank_copies_default_to_one() {
        let form = BookForm {
            title: "Dune".to_string(),
            ..BookForm::default()
        };

        let payload = form.to_new_book();
        assert_eq!(payload.copies, 1);
        assert_eq!(payload.available_copies, 1);
        assert_eq!(payload.year, None);
    }

    #[test]
    fn test_copies_set_both_counters() {
        let form = BookForm {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "978-0441013593".to_string(),
            publisher: "Chilton".to_string(),
            year: "1965".to_string(),
            copies: "4".to_string(),
        };

        let payload = form.to_new_book();
        assert_eq!(payload.title, "Dune");
        assert_eq!(payload.author, "Herbert");
        assert_eq!(payload.isbn, "978-0441013593");
        assert_eq!(payload.publisher, "Chilton");
        assert_eq!(payload.year, Some(1965));
        assert_eq!(payload.copies, 4);
        assert_eq!(payload.available_copies, 4);
    }

    #[test]
    fn test_text_fields_are_sent_verbatim() {
        let form = BookForm {
            title: "  Dune ".to_string(),
            ..BookForm::default()
        };

        let payload = form.to_new_book();
        assert_eq!(payload.title, "  Dune ");
        assert_eq!(payload.author, "");
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int(" 12 "), Some(12));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("1e3"), Some(1));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("   "), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999"), Some(99_999_999_999));
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn test_large_copies_are_kept() {
        let form = BookForm {
            title: "Dune".to_string(),
            copies: "99999999999".to_string(),
            ..BookForm::default()
        };

        let payload = form.to_new_book();
        assert_eq!(payload.copies, 99_999_999_999);
        assert_eq!(payload.available_copies, 99_999_999_999);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let form = BookForm {
            title: "Dune".to_string(),
            year: "unknown".to_string(),
            copies: "many".to_string(),
            ..BookForm::default()
        };

        let payload = form.to_new_book();
        assert_eq!(payload.year, None);
        assert_eq!(payload.copies, 1);
        assert_eq!(payload.available_copies, 1);
    }
}

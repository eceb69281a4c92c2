//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Turns a label into a lowercase, hyphenated token for CSS class names.
///
/// Usage in templates: `{{ interest|slug }}` renders `Visa Support` as `visa-support`.
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn slug(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(slugify(&value.to_string()))
}

fn slugify(value: &str) -> String {
    value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Visa Support"), "visa-support");
        assert_eq!(slugify("German Consultancy"), "german-consultancy");
        assert_eq!(slugify("  Other "), "other");
        assert_eq!(slugify(""), "");
    }
}

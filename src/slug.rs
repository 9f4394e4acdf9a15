/// Generate a URL-friendly slug from free text.
///
/// Lowercases ASCII alphanumerics and collapses every other run of
/// characters into a single hyphen, trimming hyphens at both ends.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Rust -- The  Language!"), "rust-the-language");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(slugify("  ...Portfolio Site?!  "), "portfolio-site");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("café latte"), "caf-latte");
    }

    #[test]
    fn empty_input_yields_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }
}

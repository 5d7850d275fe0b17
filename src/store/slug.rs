//! URL slugs derived from document titles.

use std::sync::OnceLock;

use regex::Regex;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new("[^a-z0-9]+").expect("static slug pattern"))
}

/// Lowercase, collapse every run of non-alphanumerics into `-`, and trim
/// leading/trailing dashes.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    separators()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Pomodoro Technique"), "the-pomodoro-technique");
        assert_eq!(slugify("  Deep Work: Rules!  "), "deep-work-rules");
        assert_eq!(slugify("C++ & Rust -- 2024"), "c-rust-2024");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Café Études"), "caf-tudes");
        assert_eq!(slugify("!!!"), "");
    }
}

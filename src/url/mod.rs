pub use crate::url::location::DocumentLocation;

pub mod error;
pub mod location;

/// Whitespace stripped by [`trim`] in addition to the caller supplied characters.
const EXTENDED_WHITESPACE: [char; 22] = [
    ' ', '\n', '\r', '\t', '\x0c', '\x0b', '\u{a0}', '\u{2000}', '\u{2001}', '\u{2002}',
    '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}',
    '\u{200a}', '\u{200b}', '\u{2028}', '\u{2029}', '\u{3000}',
];

/// Strips the extended whitespace set and every char in `extra` from both ends.
///
/// `str::trim` only knows about `White_Space`, which leaves out U+200B and
/// treats U+0085 as whitespace, so the set is spelled out here.
pub fn trim<'a>(text: &'a str, extra: &[char]) -> &'a str {
    text.trim_matches(|c: char| EXTENDED_WHITESPACE.contains(&c) || extra.contains(&c))
}

/// Combines a possibly relative `reference` with `base`.
pub fn resolve(reference: &str, base: &str) -> String {
    if reference.contains("//") {
        return reference.to_string();
    }

    if base.starts_with("//") {
        let base = base.strip_suffix('/').unwrap_or(base);
        return format!("{}/{}", base, trim(reference, &['/']));
    }

    if base.contains("//") {
        return format!("{}/{}", trim(base, &['/']), trim(reference, &['/']));
    }

    reference.to_string()
}

/// Everything up to and including the last `/`, or an empty string.
pub fn directory_of(url: &str) -> &str {
    match url.rfind('/') {
        Some(index) => &url[..=index],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_reference_is_joined_to_scheme_base() {
        assert_eq!(
            resolve("thumb.jpg", "http://x.com/a/"),
            "http://x.com/a/thumb.jpg"
        );
    }

    #[test]
    fn qualified_reference_is_returned_unchanged() {
        assert_eq!(
            resolve("//x.com/b.jpg", "https://other.com/"),
            "//x.com/b.jpg"
        );
        assert_eq!(
            resolve("https://cdn.com/b.jpg", "//x.com/a/"),
            "https://cdn.com/b.jpg"
        );
    }

    #[test]
    fn protocol_relative_base_keeps_leading_slashes() {
        assert_eq!(resolve("thumb.jpg", "//x.com/a/"), "//x.com/a/thumb.jpg");
        assert_eq!(resolve("/thumb.jpg ", "//x.com/a"), "//x.com/a/thumb.jpg");
    }

    #[test]
    fn protocol_relative_base_only_loses_one_trailing_slash() {
        assert_eq!(resolve("thumb.jpg", "//x.com/a//"), "//x.com/a//thumb.jpg");
    }

    #[test]
    fn scheme_base_and_reference_slashes_collapse_to_one() {
        assert_eq!(
            resolve("/sprites/thumb.jpg", "http://x.com/a/"),
            "http://x.com/a/sprites/thumb.jpg"
        );
    }

    #[test]
    fn base_without_scheme_leaves_reference_alone() {
        assert_eq!(resolve("thumb.jpg", "assets/"), "thumb.jpg");
        assert_eq!(resolve("thumb.jpg", ""), "thumb.jpg");
    }

    #[test]
    fn trim_strips_extended_whitespace_and_extra_chars() {
        assert_eq!(trim("\u{200b}\u{3000} /a/b/ \u{a0}", &['/']), "a/b");
        assert_eq!(trim("  x  ", &[]), "x");
        assert_eq!(trim("///", &['/']), "");
        assert_eq!(trim("/a/", &[]), "/a/");
    }

    #[test]
    fn directory_of_keeps_trailing_slash() {
        assert_eq!(directory_of("http://x.com/a/thumbs.vtt"), "http://x.com/a/");
        assert_eq!(directory_of("thumbs/thumbs.vtt"), "thumbs/");
        assert_eq!(directory_of("thumbs.vtt"), "");
    }
}

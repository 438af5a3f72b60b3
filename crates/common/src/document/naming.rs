//! Duplicate naming
//!
//! A duplicate of `about.md` is called `about_copyN.md`, where `N` is one
//! past the highest copy number among *all* names that share the base name
//! `about`. Copies of copies therefore keep counting up from the same base
//! instead of nesting suffixes (`about_copy1_copy1.md`).

/// Marker separating a base name from its copy number
pub const COPY_MARKER: &str = "_copy";

/// The extension after the last `.`, if any
pub fn extension(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Split a trailing `_copy<digits>` off `s`, returning the head and the digits
fn split_copy_suffix(s: &str) -> Option<(&str, &str)> {
    let head = s.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &s[head.len()..];
    if digits.is_empty() {
        return None;
    }
    head.strip_suffix(COPY_MARKER).map(|base| (base, digits))
}

fn stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Name with the extension(s) and a trailing copy suffix stripped.
///
/// Everything from the first `.` onwards is dropped first, then a
///  `_copy<digits>` at the end of what remains, so both `about_copy2.md` and
///  `about.md_copy2` share the base name `about`. A marker that is not
///  followed by digits is part of the name (`my_copyedit.md`).
pub fn base_name(name: &str) -> &str {
    let stem = stem(name);
    split_copy_suffix(stem).map_or(stem, |(base, _)| base)
}

/// The copy number at the end of the stem or of the whole name, `0` if
///  there is none. Numbers too large for a `u64` saturate.
pub fn copy_number(name: &str) -> u64 {
    split_copy_suffix(stem(name))
        .or_else(|| split_copy_suffix(name))
        .map_or(0, |(_, digits)| digits.parse().unwrap_or(u64::MAX))
}

/// Derive the name for a duplicate of `source` given every name currently
///  in the namespace. The result never collides with `existing`.
///
/// Returns `None` once the copy numbers for the base are exhausted.
pub fn duplicate_name<S: AsRef<str>>(source: &str, existing: &[S]) -> Option<String> {
    let base = base_name(source);
    let ext = extension(source);

    let names: Vec<&str> = existing.iter().map(|name| AsRef::<str>::as_ref(name)).collect();

    let mut next = names
        .iter()
        .copied()
        .filter(|name| base_name(name) == base)
        .map(copy_number)
        .max()
        .unwrap_or(0)
        .checked_add(1)?;

    loop {
        let candidate = match ext {
            Some(ext) => format!("{base}{COPY_MARKER}{next}.{ext}"),
            None => format!("{base}{COPY_MARKER}{next}"),
        };
        if !names.contains(&candidate.as_str()) {
            return Some(candidate);
        }
        next = next.checked_add(1)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("about.md"), "about");
        assert_eq!(base_name("about_copy3.md"), "about");
        assert_eq!(base_name("about.md_copy4"), "about");
        assert_eq!(base_name("archive.tar.md"), "archive");
        assert_eq!(base_name("notes"), "notes");
        assert_eq!(base_name("my_copyedit.md"), "my_copyedit");
        assert_eq!(base_name("about_copy.md"), "about_copy");
        assert_eq!(base_name("a_copy1_b.md"), "a_copy1_b");
    }

    #[test]
    fn test_copy_number() {
        assert_eq!(copy_number("about.md"), 0);
        assert_eq!(copy_number("about_copy1.md"), 1);
        assert_eq!(copy_number("about.md_copy4"), 4);
        assert_eq!(copy_number("about_copy12.txt"), 12);
        assert_eq!(copy_number("about_copy.md"), 0);
        assert_eq!(copy_number("about_copyX.md"), 0);
        assert_eq!(copy_number("my_copyedit.md"), 0);
        assert_eq!(copy_number("about_copy007.md"), 7);
        assert_eq!(copy_number("about_copy99999999999999999999.md"), u64::MAX);
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("about.md"), Some("md"));
        assert_eq!(extension("archive.tar.md"), Some("md"));
        assert_eq!(extension("noextension"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn test_first_duplicate() {
        let existing = ["about.md", "changes.txt"];
        assert_eq!(duplicate_name("about.md", &existing).as_deref(), Some("about_copy1.md"));
    }

    #[test]
    fn test_second_duplicate() {
        let existing = ["about.md", "about_copy1.md"];
        assert_eq!(duplicate_name("about.md", &existing).as_deref(), Some("about_copy2.md"));
    }

    #[test]
    fn test_duplicate_of_a_copy_continues_numbering() {
        let existing = ["about.md", "about_copy1.md", "about_copy2.md"];
        assert_eq!(duplicate_name("about_copy1.md", &existing).as_deref(), Some("about_copy3.md"));
    }

    #[test]
    fn test_duplicate_scans_whole_namespace() {
        let existing = [
            "about.md",
            "about.md_copy1",
            "about.md_copy2",
            "about.md_copy3",
            "about.md_copy4",
            "changes.txt",
        ];
        assert_eq!(duplicate_name("about.md", &existing).as_deref(), Some("about_copy5.md"));
    }

    #[test]
    fn test_duplicate_ignores_other_bases() {
        let existing = ["about.md", "aboutme_copy9.md", "changes_copy3.txt"];
        assert_eq!(duplicate_name("about.md", &existing).as_deref(), Some("about_copy1.md"));
    }

    #[test]
    fn test_duplicate_keeps_extension() {
        let existing = ["about.md", "about_copy1.md", "changes.txt"];
        assert_eq!(duplicate_name("changes.txt", &existing).as_deref(), Some("changes_copy1.txt"));
        // copies of other kinds still count towards the base
        assert_eq!(duplicate_name("about.txt", &existing).as_deref(), Some("about_copy2.txt"));
    }

    #[test]
    fn test_duplicate_without_extension() {
        let existing = ["readme"];
        assert_eq!(duplicate_name("readme", &existing).as_deref(), Some("readme_copy1"));
    }

    #[test]
    fn test_duplicate_keeps_marker_without_digits() {
        let existing = ["my_copyedit.md", "my_copy2.md"];
        assert_eq!(
            duplicate_name("my_copyedit.md", &existing).as_deref(),
            Some("my_copyedit_copy1.md")
        );
    }

    #[test]
    fn test_duplicate_after_leading_zeros() {
        let existing = ["about.md", "about_copy007.md"];
        assert_eq!(
            duplicate_name("about.md", &existing).as_deref(),
            Some("about_copy8.md")
        );
    }

    #[test]
    fn test_duplicate_at_the_top_of_the_range() {
        let existing = ["a.md", "a_copy18446744073709551614.md"];
        assert_eq!(
            duplicate_name("a.md", &existing).as_deref(),
            Some("a_copy18446744073709551615.md")
        );

        let existing = ["a.md", "a_copy18446744073709551615.md"];
        assert_eq!(duplicate_name("a.md", &existing), None);
    }

    #[test]
    fn test_duplicate_after_oversized_copy_number() {
        let existing = ["a.md", "a_copy99999999999999999999.md"];
        assert_eq!(duplicate_name("a.md", &existing), None);
        // other bases are unaffected
        assert_eq!(
            duplicate_name("b.md", &existing).as_deref(),
            Some("b_copy1.md")
        );
    }
}

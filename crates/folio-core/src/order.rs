//! Natural filename ordering.
//!
//! Orders filenames the way a camera roll or scanner export reads to a human:
//! embedded numeric runs compare by value, so `a2.jpg` sorts before `a10.jpg`
//! and `IMG_12 (2).jpg` before `IMG_12 (10).jpg`. A filename is tokenized into
//! a five-field [`FileNameKey`] and two names compare field by field.
//!
//! The tokenizer is deliberately explicit rather than one large pattern:
//! every absent group is a visible default and there is no backtracking.

use std::cmp::Ordering;
use std::path::Path;

/// Comparison key derived from one filename.
///
/// Text fields are stored lower-cased so the derived ordering is
/// case-insensitive codepoint order; numeric fields default to 0 when the
/// corresponding group is absent. Keys are computed per comparison and never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileNameKey {
    base: String,
    base_number: u64,
    sub_base: String,
    sub_number: u64,
    paren_number: u64,
}

impl FileNameKey {
    /// Tokenize a filename.
    ///
    /// Grammar, applied left to right with every group optional:
    /// leading non-digit run (`base`), digit run (`base_number`), non-digit
    /// run (`sub_base`), digit run (`sub_number`), then an optional trailing
    /// `(digits)` group, with `-`/`_`/whitespace separator runs consumed
    /// between groups and trailing `.ext` groups ignored entirely.
    ///
    /// Never fails: unparseable tails are ignored and missing groups keep
    /// their defaults.
    pub fn parse(name: &str) -> Self {
        let stem = strip_extensions(name);
        let (head, paren_number) = split_paren_number(stem);

        let mut rest = head;
        let base = take_text(&mut rest);
        let base_number = take_number(&mut rest);
        let sub_base = take_text(&mut rest);
        let sub_number = take_number(&mut rest);

        Self {
            base,
            base_number,
            sub_base,
            sub_number,
            paren_number,
        }
    }
}

/// Compare two filenames in natural order.
///
/// Total order: `base` → `base_number` → `sub_base` → `sub_number` →
/// `paren_number`, first non-equal field decides. Case-insensitive on the
/// text fields, numeric on the rest.
pub fn compare(a: &str, b: &str) -> Ordering {
    FileNameKey::parse(a).cmp(&FileNameKey::parse(b))
}

/// Compare two possibly-absent filenames; absent sorts before present.
///
/// The absent case never arises when comparing names discovered by the
/// scanner, but the order must stay total for arbitrary path input.
pub fn compare_optional(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare(a, b),
    }
}

/// Compare two paths by their filename components.
pub fn compare_paths(a: &Path, b: &Path) -> Ordering {
    compare_optional(
        a.file_name().and_then(|n| n.to_str()),
        b.file_name().and_then(|n| n.to_str()),
    )
}

fn is_separator(c: char) -> bool {
    c == '-' || c == '_' || c.is_whitespace()
}

/// Strip trailing `.ext` groups (`archive.tar.gz` → `archive`). A name that
/// is nothing but a dot-group (`.hidden`) is kept whole.
fn strip_extensions(name: &str) -> &str {
    let mut stem = name;
    while let Some(idx) = stem.rfind('.') {
        if idx == 0 {
            break;
        }
        let ext = &stem[idx + 1..];
        if ext.is_empty() || !ext.chars().all(|c| c.is_alphanumeric() || c == '_') {
            break;
        }
        stem = &stem[..idx];
    }
    stem
}

/// Detect a trailing `(digits)` group and split it off.
fn split_paren_number(stem: &str) -> (&str, u64) {
    let trimmed = stem.trim_end();
    if let Some(body) = trimmed.strip_suffix(')') {
        if let Some(open) = body.rfind('(') {
            let digits = &body[open + 1..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return (&body[..open], parse_digits(digits));
            }
        }
    }
    (stem, 0)
}

/// Consume a run of non-digit characters; the trailing separator run is
/// consumed but not captured.
fn take_text(rest: &mut &str) -> String {
    let end = rest
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (text, tail) = rest.split_at(end);
    *rest = tail;
    text.trim_end_matches(is_separator).to_lowercase()
}

/// Consume a run of digits plus the separator run after it.
fn take_number(rest: &mut &str) -> u64 {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (digits, tail) = rest.split_at(end);
    *rest = tail.trim_start_matches(is_separator);
    parse_digits(digits)
}

/// Parse a digit run without panicking; absurdly long runs saturate.
fn parse_digits(digits: &str) -> u64 {
    digits
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| compare(a, b));
        names
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        assert_eq!(compare("a2.jpg", "a10.jpg"), Ordering::Less);
        assert_eq!(compare("a10.jpg", "a2.jpg"), Ordering::Greater);
    }

    #[test]
    fn test_plain_before_parenthesized_duplicate() {
        assert_eq!(compare("IMG_9.jpg", "IMG_9 (2).jpg"), Ordering::Less);
    }

    #[test]
    fn test_parenthesized_numbers_compare_numerically() {
        assert_eq!(compare("IMG_12 (2).jpg", "IMG_12 (10).jpg"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive_base() {
        assert_eq!(compare("A.jpg", "a.jpg"), Ordering::Equal);
        assert_eq!(compare("Photo_3.PNG", "photo_3.png"), Ordering::Equal);
    }

    #[test]
    fn test_sub_components() {
        // scan_1_page_2 < scan_1_page_10 on the sub number
        assert_eq!(
            compare("scan_1_page_2.png", "scan_1_page_10.png"),
            Ordering::Less
        );
        // sub base decides when numbers tie
        assert_eq!(compare("scan_1_a.png", "scan_1_b.png"), Ordering::Less);
    }

    #[test]
    fn test_camera_roll_order() {
        let names = sorted(vec![
            "IMG_12 (10).jpg",
            "IMG_2.jpg",
            "IMG_12.jpg",
            "IMG_12 (2).jpg",
            "IMG_10.jpg",
        ]);
        assert_eq!(
            names,
            vec![
                "IMG_2.jpg",
                "IMG_10.jpg",
                "IMG_12.jpg",
                "IMG_12 (2).jpg",
                "IMG_12 (10).jpg",
            ]
        );
    }

    #[test]
    fn test_transitive_spot_check() {
        let a = "page2.png";
        let b = "page10.png";
        let c = "page11.png";
        assert_eq!(compare(a, b), Ordering::Less);
        assert_eq!(compare(b, c), Ordering::Less);
        assert_eq!(compare(a, c), Ordering::Less);
    }

    #[test]
    fn test_separator_runs_not_captured() {
        // The separator between base and number does not influence the base
        assert_eq!(compare("IMG-5.jpg", "IMG_5.jpg"), Ordering::Equal);
        assert_eq!(compare("IMG 5.jpg", "IMG_5.jpg"), Ordering::Equal);
    }

    #[test]
    fn test_absent_sorts_first() {
        assert_eq!(compare_optional(None, Some("a.jpg")), Ordering::Less);
        assert_eq!(compare_optional(Some("a.jpg"), None), Ordering::Greater);
        assert_eq!(compare_optional(None, None), Ordering::Equal);
    }

    #[test]
    fn test_compare_paths_uses_file_name() {
        assert_eq!(
            compare_paths(Path::new("/z/a2.jpg"), Path::new("/a/a10.jpg")),
            Ordering::Less
        );
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        for name in ["", ".", "...", "(((", ")", "((7)", "a..b", ".hidden", "𝔘𝔫𝔦𝔠𝔬𝔡𝔢.png"] {
            let _ = FileNameKey::parse(name);
            assert_eq!(compare(name, name), Ordering::Equal);
        }
    }

    #[test]
    fn test_huge_digit_runs_saturate() {
        let a = "img_99999999999999999999999999999999.jpg";
        let b = "img_1.jpg";
        assert_eq!(compare(b, a), Ordering::Less);
        assert_eq!(compare(a, a), Ordering::Equal);
    }

    #[test]
    fn test_multi_extension_ignored() {
        assert_eq!(compare("scan_2.tar.gz", "scan_2.jpg"), Ordering::Equal);
    }

    #[test]
    fn test_missing_groups_default() {
        let key = FileNameKey::parse("cover.jpg");
        assert_eq!(key, FileNameKey {
            base: "cover".into(),
            ..Default::default()
        });
    }
}

//! Pure text utilities: natural ordering, slugs, and area-title parsing.

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Natural sorting
// ============================================================================

/// One segment of a natural sort key.
///
/// Derived `Ord` places every integer segment before every string segment, so
/// comparing keys of different shapes stays total: "10" orders ahead of "a".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment {
    Num(u128),
    Text(String),
}

/// Split `text` on maximal decimal-digit runs. Digit runs become integer
/// segments, everything else becomes a lower-cased string segment, so that
/// "Area 2" compares below "Area 10".
pub fn natural_key(text: &str) -> Vec<Segment> {
    let mut key = Vec::new();
    let mut run = String::new();
    let mut in_digits = false;

    for ch in text.chars() {
        let is_digit = ch.is_ascii_digit();
        if !run.is_empty() && is_digit != in_digits {
            key.push(segment(&run, in_digits));
            run.clear();
        }
        in_digits = is_digit;
        run.push(ch);
    }
    if !run.is_empty() {
        key.push(segment(&run, in_digits));
    }
    key
}

fn segment(run: &str, digits: bool) -> Segment {
    if digits {
        // a run long enough to overflow u128 clamps to the maximum
        Segment::Num(run.parse().unwrap_or(u128::MAX))
    } else {
        Segment::Text(run.to_lowercase())
    }
}

/// Stable sort by the natural key of each item's name. Items without a usable
/// name should surface it as "" through the accessor; they then group at the
/// front (or at the back when `reverse` is set). Empty and single-element
/// slices return immediately.
pub fn sort_by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str, reverse: bool) {
    if items.len() < 2 {
        return;
    }
    if reverse {
        items.sort_by_cached_key(|item| std::cmp::Reverse(natural_key(name(item))));
    } else {
        items.sort_by_cached_key(|item| natural_key(name(item)));
    }
}

// ============================================================================
// Slugs
// ============================================================================

/// Derive a URL-safe slug: NFD-decompose and drop combining marks, lower-case,
/// and collapse every maximal run outside `[a-z0-9]` into a single hyphen with
/// no hyphen at either edge. Idempotent; "" maps to "".
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Turn a slug back into a display label: hyphens become spaces and each word
/// is title-cased. Lossy by construction; callers must not expect
/// `unslugify(slugify(x)) == x`.
pub fn unslugify(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

/// Upper-case the first letter of each whitespace-delimited token, leaving the
/// remainder of the token unchanged. Whitespace runs collapse to one space.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ============================================================================
// Area slugs
// ============================================================================

/// Parse an `area-<digits>-<rest>` slug into `("Area <digits>", title)`.
///
/// The match is anchored and case-insensitive; the title keeps only
/// word characters, whitespace, and "&" before being title-cased. A slug with
/// no trailing segment at all ("area-10") does not match; "area-10-" matches
/// with an empty title. `None` is the ordinary not-an-area signal, not an
/// error.
pub fn extract_area_and_title(slug: &str) -> Option<(String, String)> {
    let re = Regex::new(r"(?i)^area-(\d+)-(.*)$").unwrap();
    let caps = re.captures(slug)?;

    let area = format!("Area {}", &caps[1]);
    let rest = caps[2].replace('-', " ");
    let cleaned = Regex::new(r"[^\w\s&]").unwrap().replace_all(&rest, "");
    Some((area, title_case(&cleaned)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn natural_key_splits_digit_runs() {
        assert_eq!(
            natural_key("Area 10"),
            vec![Segment::Text("area ".into()), Segment::Num(10)]
        );
        assert_eq!(natural_key(""), Vec::<Segment>::new());
        assert_eq!(natural_key("42"), vec![Segment::Num(42)]);
    }

    #[test]
    fn numeric_segments_order_before_text_segments() {
        assert!(natural_key("10") < natural_key("a"));
    }

    #[test]
    fn sorts_embedded_numbers_numerically() {
        let mut names = vec!["Area 10", "Area 2", "Area 1"];
        sort_by_name(&mut names, |n| n, false);
        assert_eq!(names, vec!["Area 1", "Area 2", "Area 10"]);
    }

    #[test]
    fn reverse_sort_inverts_the_order() {
        let mut names = vec!["Area 2", "Area 10", "Area 1"];
        sort_by_name(&mut names, |n| n, true);
        assert_eq!(names, vec!["Area 10", "Area 2", "Area 1"]);
    }

    #[test]
    fn empty_names_group_first() {
        let mut names = vec!["b", "", "a"];
        sort_by_name(&mut names, |n| n, false);
        assert_eq!(names, vec!["", "a", "b"]);
    }

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Vision, Mission & Goals"), "vision-mission-goals");
        assert_eq!(slugify("Café  Menu"), "cafe-menu");
        assert_eq!(slugify("--Already-Slugged--"), "already-slugged");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn unslugify_title_cases_words() {
        assert_eq!(unslugify("vision-mission"), "Vision Mission");
        assert_eq!(unslugify("area-2"), "Area 2");
        assert_eq!(unslugify(""), "");
    }

    #[test]
    fn extracts_area_and_title() {
        assert_eq!(
            extract_area_and_title("area-10-vision-mission-&-goals"),
            Some(("Area 10".into(), "Vision Mission & Goals".into()))
        );
        assert_eq!(
            extract_area_and_title("AREA-2-faculty"),
            Some(("Area 2".into(), "Faculty".into()))
        );
        // empty remainder is a match with an empty title
        assert_eq!(
            extract_area_and_title("area-10-"),
            Some(("Area 10".into(), String::new()))
        );
    }

    #[test]
    fn non_area_slugs_do_not_match() {
        assert_eq!(extract_area_and_title("not-an-area"), None);
        assert_eq!(extract_area_and_title("area-x-title"), None);
        assert_eq!(extract_area_and_title("area-10"), None);
        assert_eq!(extract_area_and_title("prefix-area-10-x"), None);
    }

    proptest! {
        #[test]
        fn slugify_output_is_a_well_formed_slug(s in ".*") {
            let slug = slugify(&s);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn slugify_is_idempotent(s in ".*") {
            let once = slugify(&s);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn sort_by_name_preserves_length_and_is_idempotent(
            mut names in proptest::collection::vec(".*", 0..20)
        ) {
            let len = names.len();
            sort_by_name(&mut names, |n| n.as_str(), false);
            prop_assert_eq!(names.len(), len);

            let sorted_once = names.clone();
            sort_by_name(&mut names, |n| n.as_str(), false);
            prop_assert_eq!(names, sorted_once);
        }
    }
}

//! Layout-independent classifiers for roster text.
//!
//! Everything here is a pure function of its input: a string, or an element
//! and its ancestors.

use super::dom;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use unicode_normalization::UnicodeNormalization;

/// Position codes recognized in roster cells and card text.
pub const POSITION_CODES: &str =
    "QB|RB|FB|HB|WR|TE|OL|OT|OG|DL|DT|NT|DE|EDGE|LB|ILB|OLB|MLB|DB|CB|S|SS|FS|K|PK|P|LS|SNP|C|ATH|KR|PR";

static POSITION_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:{POSITION_CODES})(?:\s*/\s*(?:{POSITION_CODES}))*$"
    ))
    .unwrap()
});

static POSITION_IN_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b({POSITION_CODES})\b")).unwrap());

static YEAR_IN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\w-])((?:R-|RS-?\s?|Redshirt\s+)?(?:Fr\.|So\.|Jr\.|Sr\.|Gr\.|Freshman|Sophomore|Junior|Senior|Graduate|Grad|GR|[56]th(?:\s+|-)Year))(?:$|[^\w])",
    )
    .unwrap()
});

static HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|[^\d])(\d\s?['′’-]\s?\d{1,2}["″”]?)(?:$|[^\d])"#).unwrap());

static WEIGHT_WITH_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{2,3})\s*(?:lbs?\.?|pounds?)(?:$|[^a-z])").unwrap());

static BARE_WEIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}$").unwrap());

static JERSEY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:#|No\.?\s*)?(\d{1,2})$").unwrap());

static HOMETOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\p{Lu}[\p{L}.'-]+(?:\s+\p{Lu}[\p{L}.'-]+)*,\s*(?:[A-Z]{2}\.?(?:\s|$)|\p{Lu}[\p{Ll}.]+(?:\s+\p{Lu}[\p{Ll}.]+)?$)")
        .unwrap()
});

static NAME_EXCLUSIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(roster|bio|stats|schedule|news|staff|coach|coordinator|director|analyst|assistant|trainer|manager|operations|jersey\s*number|number\s*\d|full\s*bio|view\s*bio|social\s*media)\b",
    )
    .unwrap()
});

static SCHOOL_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(high school|h\.s\.|hs|academy|prep|school|christian|catholic|central|north|south|east|west|regional|county|college|university|community)\b",
    )
    .unwrap()
});

static TRAILING_STATE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*[A-Z]{2}$").unwrap());

static COACH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(coach|coordinator|director|analyst|assistant|specialist|quality|control|operations|recruiting|strength|conditioning|manager|chief|general|video|associate)\b",
    )
    .unwrap()
});

static STAFF_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)staff|coach|directory").unwrap());

/// Levels inspected by [`is_in_staff_section`], counting the element itself.
const STAFF_SEARCH_DEPTH: usize = 10;

/// NFKC-normalizes and collapses runs of whitespace into single spaces.
pub fn clean_text(text: &str) -> String {
    text.nfkc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn looks_like_player_name(text: &str) -> bool {
    let text = text.trim();
    let len = text.chars().count();
    if !(3..=50).contains(&len) {
        return false;
    }

    let words = text.split_whitespace().count();
    if !(1..=5).contains(&words) {
        return false;
    }

    if NAME_EXCLUSIONS.is_match(text) {
        return false;
    }

    if !text.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    !is_position_token(text)
}

pub fn looks_like_school_name(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    SCHOOL_KEYWORDS.is_match(text)
        || (TRAILING_STATE.is_match(text) && text.split_whitespace().count() > 3)
}

/// Name-shaped and not a school: the test every name candidate must pass.
pub fn is_valid_name(text: &str) -> bool {
    looks_like_player_name(text) && !looks_like_school_name(text)
}

pub fn is_coach_position(text: &str) -> bool {
    !text.trim().is_empty() && COACH_KEYWORDS.is_match(text)
}

/// Walks `element` and its ancestors looking for a staff or coaching
/// directory marker in class names, ids, or the first heading inside.
/// The walk stops below `<body>`: page-level headings say nothing about
/// which section an element sits in.
pub fn is_in_staff_section(element: ElementRef) -> bool {
    dom::self_and_ancestors(element)
        .take(STAFF_SEARCH_DEPTH)
        .take_while(|level| !dom::tag_is(*level, "body") && !dom::tag_is(*level, "html"))
        .any(|level| {
            let mut haystack = dom::class_and_id(level);
            if let Some(heading) = dom::first_heading_text(level) {
                haystack.push(' ');
                haystack.push_str(&heading);
            }
            STAFF_MARKER.is_match(&haystack)
        })
}

/// True when the whole text is a position code, or several joined by `/`.
pub fn is_position_token(text: &str) -> bool {
    POSITION_CELL.is_match(text.trim())
}

/// First position code appearing as a word inside free text, uppercased.
pub fn find_position_token(text: &str) -> Option<String> {
    POSITION_IN_TEXT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

pub fn find_year_token(text: &str) -> Option<String> {
    YEAR_IN_TEXT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| clean_text(m.as_str()))
}

pub fn find_height(text: &str) -> Option<String> {
    HEIGHT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(' ', ""))
}

/// Weight as `"NNN lbs"`. Accepts a bare three-digit cell or any
/// two-to-three digit figure followed by a pound unit.
pub fn find_weight(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if BARE_WEIGHT.is_match(trimmed) {
        return Some(format!("{trimmed} lbs"));
    }
    WEIGHT_WITH_UNIT
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{} lbs", m.as_str()))
}

/// A cell that holds nothing but a one- or two-digit jersey number.
pub fn parse_jersey_number(text: &str) -> Option<u32> {
    JERSEY_NUMBER
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Leading digits of a number cell such as `"7"`, `"#12"` or `"88 "`.
pub fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .trim_start_matches('#')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() || digits.len() > 3 {
        return None;
    }
    digits.parse().ok()
}

pub fn looks_like_hometown(text: &str) -> bool {
    let text = text.trim();
    HOMETOWN.is_match(text) && !looks_like_school_name(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::dom::selector;
    use scraper::Html;

    #[test]
    fn player_names() {
        assert!(looks_like_player_name("Jane Doe"));
        assert!(looks_like_player_name("Marvin Harrison Jr."));
        assert!(looks_like_player_name("Émile O'Neal"));
        assert!(!looks_like_player_name("jane doe"));
        assert!(!looks_like_player_name("Jo"));
        assert!(!looks_like_player_name("Full Bio"));
        assert!(!looks_like_player_name("Head Coach"));
        assert!(!looks_like_player_name("Jersey Number 12"));
        assert!(!looks_like_player_name("123 456"));
        assert!(!looks_like_player_name("ATH"));
        assert!(!looks_like_player_name("One Two Three Four Five Six"));
    }

    #[test]
    fn school_names() {
        assert!(looks_like_school_name("Central Catholic"));
        assert!(looks_like_school_name("IMG Academy"));
        assert!(looks_like_school_name("Lake Travis High School"));
        assert!(looks_like_school_name("St. Thomas More Of Texas, TX"));
        assert!(!looks_like_school_name("Austin, TX"));
        assert!(!looks_like_school_name("Jane Doe"));
        assert!(!is_valid_name("Westlake Prep"));
    }

    #[test]
    fn coach_titles() {
        assert!(is_coach_position("Offensive Coordinator"));
        assert!(is_coach_position("Director of Football Operations"));
        assert!(is_coach_position("Strength & Conditioning"));
        assert!(!is_coach_position("QB"));
        assert!(!is_coach_position(""));
    }

    #[test]
    fn staff_sections_by_class_and_heading() {
        let html = Html::parse_document(
            r#"<div class="roster"><p class="p1"><a>Jane Doe</a></p></div>
               <section id="coaching-staff"><div><a class="c">Sam Boss</a></div></section>
               <div class="block"><h3>Support Directory</h3><span class="s">Pat Kim</span></div>"#,
        );
        let player = html.select(&selector("p.p1 a")).next().unwrap();
        let coach = html.select(&selector("a.c")).next().unwrap();
        let support = html.select(&selector("span.s")).next().unwrap();

        assert!(!is_in_staff_section(player));
        assert!(is_in_staff_section(coach));
        assert!(is_in_staff_section(support));
    }

    #[test]
    fn position_tokens() {
        assert!(is_position_token("QB"));
        assert!(is_position_token("wr"));
        assert!(is_position_token("WR/KR"));
        assert!(!is_position_token("Quarterback"));
        assert_eq!(find_position_token("12 Jane Doe QB 6-2"), Some("QB".into()));
        assert_eq!(find_position_token("nothing here"), None);
    }

    #[test]
    fn year_tokens() {
        assert_eq!(find_year_token("So."), Some("So.".into()));
        assert_eq!(find_year_token("Class: Redshirt Junior"), Some("Redshirt Junior".into()));
        assert_eq!(find_year_token("R-Fr. 6-1 190"), Some("R-Fr.".into()));
        assert_eq!(find_year_token("5th Year"), Some("5th Year".into()));
        assert_eq!(find_year_token("Jordan Smith"), None);
    }

    #[test]
    fn heights_and_weights() {
        assert_eq!(find_height("6-2"), Some("6-2".into()));
        assert_eq!(find_height(r#"5'11""#), Some(r#"5'11""#.into()));
        assert_eq!(find_height("2024-25 season"), None);
        assert_eq!(find_weight("215"), Some("215 lbs".into()));
        assert_eq!(find_weight("198 lbs"), Some("198 lbs".into()));
        assert_eq!(find_weight("Weight: 305 lbs."), Some("305 lbs".into()));
        assert_eq!(find_weight("12"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_jersey_number("7"), Some(7));
        assert_eq!(parse_jersey_number("#12"), Some(12));
        assert_eq!(parse_jersey_number("123"), None);
        assert_eq!(leading_number("88 "), Some(88));
        assert_eq!(leading_number("#0"), Some(0));
        assert_eq!(leading_number("--"), None);
    }

    #[test]
    fn hometowns() {
        assert!(looks_like_hometown("Austin, TX"));
        assert!(looks_like_hometown("Columbus, Ohio"));
        assert!(looks_like_hometown("St. Louis, Mo."));
        assert!(!looks_like_hometown("Central Catholic, Ohio"));
        assert!(!looks_like_hometown("QB"));
    }

    #[test]
    fn clean_text_folds_whitespace() {
        assert_eq!(clean_text("  Jane\u{a0}\n Doe "), "Jane Doe");
    }
}

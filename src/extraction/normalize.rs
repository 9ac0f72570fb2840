//! Canonical position and class-year codes.
//!
//! Both normalizers are table lookups over immutable statics. Input that
//! maps to nothing comes back as [`UNKNOWN`], so every stored record holds a
//! canonical code or that marker.

use super::detectors::{clean_text, find_year_token};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const UNKNOWN: &str = "Unknown";

pub const CANONICAL_POSITIONS: &[&str] = &[
    "QB", "RB", "FB", "WR", "TE", "OL", "OT", "OG", "C", "DL", "DT", "DE", "NT", "LB", "CB", "S",
    "DB", "K", "P", "LS", "KR", "PR", "ATH",
];

pub const CANONICAL_YEARS: &[&str] = &[
    "Fr.", "So.", "Jr.", "Sr.", "R-Fr.", "R-So.", "R-Jr.", "R-Sr.", "Gr.",
];

static POSITION_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, &'static str> =
        CANONICAL_POSITIONS.iter().map(|code| (*code, *code)).collect();

    map.extend([
        ("HB", "RB"),
        ("TB", "RB"),
        ("EDGE", "DE"),
        ("ILB", "LB"),
        ("OLB", "LB"),
        ("MLB", "LB"),
        ("SS", "S"),
        ("FS", "S"),
        ("SAF", "S"),
        ("PK", "K"),
        ("SNP", "LS"),
        ("QUARTERBACK", "QB"),
        ("RUNNING BACK", "RB"),
        ("TAILBACK", "RB"),
        ("HALFBACK", "RB"),
        ("FULLBACK", "FB"),
        ("WIDE RECEIVER", "WR"),
        ("RECEIVER", "WR"),
        ("TIGHT END", "TE"),
        ("OFFENSIVE LINE", "OL"),
        ("OFFENSIVE LINEMAN", "OL"),
        ("OFFENSIVE TACKLE", "OT"),
        ("TACKLE", "OT"),
        ("OFFENSIVE GUARD", "OG"),
        ("GUARD", "OG"),
        ("CENTER", "C"),
        ("DEFENSIVE LINE", "DL"),
        ("DEFENSIVE LINEMAN", "DL"),
        ("DEFENSIVE END", "DE"),
        ("EDGE RUSHER", "DE"),
        ("DEFENSIVE TACKLE", "DT"),
        ("NOSE TACKLE", "NT"),
        ("NOSE GUARD", "NT"),
        ("LINEBACKER", "LB"),
        ("INSIDE LINEBACKER", "LB"),
        ("OUTSIDE LINEBACKER", "LB"),
        ("MIDDLE LINEBACKER", "LB"),
        ("CORNERBACK", "CB"),
        ("CORNER", "CB"),
        ("SAFETY", "S"),
        ("FREE SAFETY", "S"),
        ("STRONG SAFETY", "S"),
        ("DEFENSIVE BACK", "DB"),
        ("KICKER", "K"),
        ("PLACEKICKER", "K"),
        ("PLACE KICKER", "K"),
        ("PUNTER", "P"),
        ("LONG SNAPPER", "LS"),
        ("SNAPPER", "LS"),
        ("KICK RETURNER", "KR"),
        ("PUNT RETURNER", "PR"),
        ("ATHLETE", "ATH"),
    ]);
    map
});

static YEAR_MAP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let classes: [(&[&str], &'static str, &'static str); 4] = [
        (&["FRESHMAN", "FR", "FR."], "Fr.", "R-Fr."),
        (&["SOPHOMORE", "SO", "SO."], "So.", "R-So."),
        (&["JUNIOR", "JR", "JR."], "Jr.", "R-Jr."),
        (&["SENIOR", "SR", "SR."], "Sr.", "R-Sr."),
    ];
    let redshirt_prefixes = ["REDSHIRT ", "RS ", "RS-", "RS. ", "RS", "R-", "R"];

    let mut map = HashMap::new();
    for (spellings, code, redshirt_code) in classes {
        for spelling in spellings {
            map.insert(spelling.to_string(), code);
            for prefix in redshirt_prefixes {
                map.insert(format!("{prefix}{spelling}"), redshirt_code);
            }
        }
    }

    for graduate in [
        "GRADUATE",
        "GRADUATE STUDENT",
        "GRAD STUDENT",
        "GRAD",
        "GRAD.",
        "GR",
        "GR.",
        "6TH YEAR",
        "6TH-YEAR",
        "SIXTH YEAR",
    ] {
        map.insert(graduate.to_string(), "Gr.");
    }
    for fifth_year in ["5TH YEAR", "5TH-YEAR", "FIFTH YEAR"] {
        map.insert(fifth_year.to_string(), "Sr.");
    }
    map
});

fn normalize_key(raw: &str) -> String {
    clean_text(raw).to_uppercase()
}

fn lookup_position(key: &str) -> Option<&'static str> {
    let key = key.trim().trim_end_matches('.');
    POSITION_MAP.get(key).copied()
}

/// Maps a raw position label to its canonical code.
///
/// Multi-role labels such as `WR/KR` resolve to the first role that maps.
/// Labels that match nothing fall back to their first three letters, kept
/// only when that happens to be a canonical code.
pub fn normalize_position(raw: &str) -> String {
    let key = normalize_key(raw);
    if key.is_empty() {
        return UNKNOWN.to_string();
    }

    if let Some(code) = lookup_position(&key) {
        return code.to_string();
    }

    if let Some(code) = key
        .split(['/', ',', '&'])
        .find_map(lookup_position)
    {
        return code.to_string();
    }

    let letters: String = key
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect();
    if CANONICAL_POSITIONS.contains(&letters.as_str()) {
        return letters;
    }

    UNKNOWN.to_string()
}

/// Maps a raw class-year label to its canonical code, looking for an
/// embedded class token (`"Class: Junior"`) when the label as a whole is
/// not in the table.
pub fn normalize_year(raw: &str) -> String {
    let key = normalize_key(raw);
    if key.is_empty() {
        return UNKNOWN.to_string();
    }

    if let Some(code) = YEAR_MAP.get(&key) {
        return code.to_string();
    }

    find_year_token(&key)
        .and_then(|token| YEAR_MAP.get(&normalize_key(&token)).copied())
        .unwrap_or(UNKNOWN)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_position_key_maps_to_its_code() {
        for (key, code) in POSITION_MAP.iter() {
            assert_eq!(normalize_position(key), *code, "key {key}");
            assert_eq!(normalize_position(&key.to_lowercase()), *code, "key {key}");
        }
    }

    #[test]
    fn position_codes_are_canonical() {
        for code in POSITION_MAP.values() {
            assert!(CANONICAL_POSITIONS.contains(code));
        }
    }

    #[test]
    fn position_edge_cases() {
        assert_eq!(normalize_position(""), UNKNOWN);
        assert_eq!(normalize_position("   "), UNKNOWN);
        assert_eq!(normalize_position(" Quarterback "), "QB");
        assert_eq!(normalize_position("Defensive Back"), "DB");
        assert_eq!(normalize_position("WR/KR"), "WR");
        assert_eq!(normalize_position("Wide Receiver / Kick Returner"), "WR");
        assert_eq!(normalize_position("LB."), "LB");
        assert_eq!(normalize_position("ATHLETIC"), "ATH");
        assert_eq!(normalize_position("Manager"), UNKNOWN);
        assert_eq!(normalize_position("Unknown"), UNKNOWN);
    }

    #[test]
    fn every_year_key_maps_to_its_code() {
        for (key, code) in YEAR_MAP.iter() {
            assert_eq!(normalize_year(key), *code, "key {key}");
            assert_eq!(normalize_year(&key.to_lowercase()), *code, "key {key}");
        }
    }

    #[test]
    fn year_codes_are_canonical() {
        for code in YEAR_MAP.values() {
            assert!(CANONICAL_YEARS.contains(code));
        }
    }

    #[test]
    fn year_edge_cases() {
        assert_eq!(normalize_year(""), UNKNOWN);
        assert_eq!(normalize_year("RS Junior"), "R-Jr.");
        assert_eq!(normalize_year("R-Junior"), "R-Jr.");
        assert_eq!(normalize_year("Redshirt Freshman"), "R-Fr.");
        assert_eq!(normalize_year("r-so."), "R-So.");
        assert_eq!(normalize_year("Graduate Student"), "Gr.");
        assert_eq!(normalize_year("5th Year"), "Sr.");
        assert_eq!(normalize_year("Class: Junior"), "Jr.");
        assert_eq!(normalize_year("Walk-on"), UNKNOWN);
    }
}

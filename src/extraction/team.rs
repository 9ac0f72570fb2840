use super::detectors::clean_text;
use super::dom::{self, selector};
use crate::domain::TeamInfo;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

static SITE_NAME: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:site_name"]"#));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static HEADER_TEXT: Lazy<Selector> =
    Lazy::new(|| selector(".school-name, .site-header__logo-text"));
static HEADER_LOGO: Lazy<Selector> =
    Lazy::new(|| selector(r#".site-header img[alt], header img[alt], [class*="header"] img[alt]"#));
static THEME_COLOR: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="theme-color"]"#));
static STYLE: Lazy<Selector> = Lazy::new(|| selector("style"));

/// `"Football Roster - Ohio State Buckeyes Official Athletics"` style titles.
static ROSTER_FIRST_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Roster|Football).*?\s[-–|]\s*(.+?)(?:\s*(?:Official\s+)?(?:Athletics?(?:\s+Site)?|Website))?$")
        .unwrap()
});

/// `"Ohio State Football Roster"` style titles: drop the trailing words.
static ROSTER_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*(?:\d{4}(?:-\d{2,4})?\s*)?(?:Football\s*)?Roster.*$").unwrap());

static PRIMARY_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--(?:primary-color|school-primary|brand-primary|color-primary)\s*:\s*([^;}!]+)")
        .unwrap()
});
static SECONDARY_VAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"--(?:secondary-color|school-secondary|brand-secondary|color-secondary)\s*:\s*([^;}!]+)",
    )
    .unwrap()
});

const MIN_TEAM_NAME_LEN: usize = 3;

fn usable(name: String) -> Option<String> {
    let name = clean_text(&name);
    (name.chars().count() >= MIN_TEAM_NAME_LEN).then_some(name)
}

fn site_name(document: &Html) -> Option<String> {
    dom::document_first(document, &SITE_NAME)
        .and_then(|meta| dom::attr(meta, "content"))
        .and_then(|content| usable(content.to_string()))
}

pub(crate) fn team_name_from_title(title: &str) -> Option<String> {
    let title = clean_text(title);
    if title.is_empty() {
        return None;
    }

    if let Some(name) = ROSTER_FIRST_TITLE
        .captures(&title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| usable(m.as_str().to_string()))
    {
        return Some(name);
    }

    let stripped = ROSTER_SUFFIX.replace(&title, "");
    let cut = [" - ", " – ", " | "]
        .iter()
        .filter_map(|separator| stripped.find(separator))
        .min()
        .unwrap_or(stripped.len());
    let first_segment = stripped[..cut].trim_end_matches(['-', '–', '|', ' ']);
    usable(first_segment.to_string())
}

fn page_title(document: &Html) -> Option<String> {
    dom::document_first(document, &TITLE)
        .map(dom::text_content)
        .and_then(|title| team_name_from_title(&title))
}

fn header_text(document: &Html) -> Option<String> {
    document
        .select(&HEADER_TEXT)
        .map(dom::text_content)
        .find_map(usable)
}

fn header_logo_alt(document: &Html) -> Option<String> {
    document
        .select(&HEADER_LOGO)
        .filter_map(|img| dom::attr(img, "alt"))
        .find_map(|alt| usable(alt.to_string()))
}

fn css_variable(document: &Html, pattern: &Regex) -> Option<String> {
    document.select(&STYLE).find_map(|style| {
        let css = style.text().collect::<String>();
        pattern
            .captures(&css)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Reads team name and colors from page-level metadata. Every probe is
/// optional; anything not found keeps its default.
pub fn extract_team_info(document: &Html, roster_url: &str, base_url: &str) -> TeamInfo {
    let mut team = TeamInfo::new(roster_url, base_url);

    let probes: [(&str, fn(&Html) -> Option<String>); 4] = [
        ("og:site_name", site_name),
        ("title", page_title),
        ("header text", header_text),
        ("header logo", header_logo_alt),
    ];
    if let Some((probe, name)) = probes
        .iter()
        .find_map(|(probe, read)| read(document).map(|name| (*probe, name)))
    {
        debug!("Team name '{}' read from {}", name, probe);
        team.name = name;
    }

    let theme_color = dom::document_first(document, &THEME_COLOR)
        .and_then(|meta| dom::attr(meta, "content"))
        .map(|color| color.trim().to_string())
        .filter(|color| !color.is_empty());
    if let Some(primary) = theme_color.or_else(|| css_variable(document, &PRIMARY_VAR)) {
        team.primary_color = primary;
    }
    if let Some(secondary) = css_variable(document, &SECONDARY_VAR) {
        team.secondary_color = secondary;
    }

    team
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, DEFAULT_TEAM_NAME};

    fn team(html: &str) -> TeamInfo {
        let document = Html::parse_document(html);
        extract_team_info(&document, "https://gobucks.test/roster", "https://gobucks.test")
    }

    #[test]
    fn site_name_meta_wins() {
        let info = team(
            r##"<html><head><meta property="og:site_name" content="Ohio State Buckeyes">
               <title>Football Roster - Something Else</title>
               <meta name="theme-color" content="#bb0000"></head><body></body></html>"##,
        );
        assert_eq!(info.name, "Ohio State Buckeyes");
        assert_eq!(info.primary_color, "#bb0000");
        assert_eq!(info.secondary_color, DEFAULT_SECONDARY_COLOR);
        assert_eq!(info.roster_url, "https://gobucks.test/roster");
        assert_eq!(info.base_url, "https://gobucks.test");
    }

    #[test]
    fn title_patterns() {
        assert_eq!(
            team_name_from_title("2024 Football Roster - Ohio State Buckeyes Official Athletics"),
            Some("Ohio State Buckeyes".to_string())
        );
        assert_eq!(
            team_name_from_title("Iowa Hawkeyes Football Roster"),
            Some("Iowa Hawkeyes".to_string())
        );
        assert_eq!(
            team_name_from_title("Penn State - Official Site"),
            Some("Penn State".to_string())
        );
        assert_eq!(team_name_from_title("Roster"), None);
    }

    #[test]
    fn falls_back_to_header_logo_and_css_colors() {
        let info = team(
            r#"<html><head><title>Roster</title>
               <style>:root { --primary-color: #041E42; --secondary-color: #C99700; }</style></head>
               <body><header class="site-header"><img src="/logo.png" alt="Notre Dame Fighting Irish"></header></body></html>"#,
        );
        assert_eq!(info.name, "Notre Dame Fighting Irish");
        assert_eq!(info.primary_color, "#041E42");
        assert_eq!(info.secondary_color, "#C99700");
    }

    #[test]
    fn defaults_when_nothing_matches() {
        let info = team("<html><body><p>nothing</p></body></html>");
        assert_eq!(info.name, DEFAULT_TEAM_NAME);
        assert_eq!(info.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(info.secondary_color, DEFAULT_SECONDARY_COLOR);
    }
}

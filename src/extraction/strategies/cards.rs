use super::scan::{fill_from_text, fill_origins, number_in_text};
use super::{skip, Harvest, RosterStrategy};
use crate::domain::RawPlayer;
use crate::error::Result;
use crate::extraction::detectors::{
    clean_text, is_coach_position, is_in_staff_section, is_valid_name,
};
use crate::extraction::dom::{self, selector};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const NAME: &str = "cards";

static CARD: Lazy<Selector> = Lazy::new(|| {
    selector(
        r#".roster-list-item, .s-person-card, .sidearm-roster-player, .roster-player, .player-card, [class*="player-card"], [class*="roster-card"]"#,
    )
});

/// Where a card keeps the player's name, most specific first.
static NAME_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        r#"h3 a[href*="/roster/"]"#,
        r#"h2 a[href*="/roster/"]"#,
        r#"h4 a[href*="/roster/"]"#,
        ".roster-list-item__title a",
        r#".s-person-card__content a[href*="/roster/"]"#,
        r#".s-person-details a[href*="/roster/"]"#,
        r#"[class*="person-name"] a"#,
        r#"[class*="player-name"] a"#,
        r#"a[class*="person-name"]"#,
        r#"a[class*="player-name"]"#,
        r#"a[class*="name"][href*="/roster/"]"#,
        r#"a[href*="/roster/player/"]"#,
        r#"a[href*="/roster/"]"#,
        ".roster-list-item__title",
        r#"[class*="player-name"]"#,
        r#"[class*="person-name"]"#,
        "h3",
        "h2",
        "h4",
    ]
    .into_iter()
    .map(selector)
    .collect()
});

static PROFILE_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="/roster/"]"#));
static ANY_LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

static NUMBER_EL: Lazy<Selector> = Lazy::new(|| {
    selector(r#".roster-list-item__jersey-number, [class*="jersey"], [class*="number"]"#)
});
static POSITION_EL: Lazy<Selector> = Lazy::new(|| {
    selector(r#".s-person-details__position, .s-person-card__position span, [class*="position"]"#)
});
static YEAR_EL: Lazy<Selector> = Lazy::new(|| {
    selector(r#"[class*="class-level"], [class*="academic"], [class*="year"], [class*="class"]"#)
});
static HEIGHT_EL: Lazy<Selector> = Lazy::new(|| selector(r#"[class*="height"]"#));
static WEIGHT_EL: Lazy<Selector> = Lazy::new(|| selector(r#"[class*="weight"]"#));
static HOMETOWN_EL: Lazy<Selector> = Lazy::new(|| selector(r#"[class*="hometown"]"#));
static HIGH_SCHOOL_EL: Lazy<Selector> =
    Lazy::new(|| selector(r#"[class*="highschool"], [class*="high-school"], [class*="high_school"]"#));
static PREVIOUS_SCHOOL_EL: Lazy<Selector> = Lazy::new(|| selector(r#"[class*="previous"]"#));

static STAFF_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/(?:coaches|staff)/").unwrap());

static FIELD_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:position|pos\.?|class|academic year|year|yr\.?|height|ht\.?|weight|wt\.?|hometown|high school|previous school|last school|jersey number|no\.)\s*:?\s*",
    )
    .unwrap()
});

/// Reads player cards and grid tiles.
pub struct CardStrategy;

/// Strict descendants of `card` matching `selector`.
fn within<'a>(card: ElementRef<'a>, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> {
    card.select(selector).filter(move |el| el.id() != card.id())
}

fn field_text(card: ElementRef, selector: &Selector) -> String {
    within(card, selector)
        .map(|el| clean_text(&FIELD_LABEL.replace(&dom::spaced_text(el), "")))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn is_staff_card(card: ElementRef) -> bool {
    is_in_staff_section(card)
        || within(card, &ANY_LINK)
            .filter_map(|link| dom::attr(link, "href"))
            .any(|href| STAFF_HREF.is_match(href))
}

fn card_name(card: ElementRef) -> Option<(String, String)> {
    let from_selectors = NAME_SELECTORS.iter().find_map(|selector| {
        within(card, selector).find_map(|el| {
            let name = dom::text_content(el);
            if !is_valid_name(&name) {
                return None;
            }
            let href = dom::attr(el, "href")
                .or_else(|| within(card, &PROFILE_LINK).find_map(|link| dom::attr(link, "href")))
                .unwrap_or_default();
            Some((name, href.to_string()))
        })
    });

    from_selectors.or_else(|| {
        within(card, &ANY_LINK).find_map(|link| {
            let name = dom::text_content(link);
            let href = dom::attr(link, "href").unwrap_or_default().to_string();
            is_valid_name(&name).then_some((name, href))
        })
    })
}

fn read_card(card: ElementRef, index: usize) -> Result<Option<RawPlayer>> {
    if is_staff_card(card) {
        return Ok(None);
    }

    let (name, href) = card_name(card).ok_or_else(|| skip(NAME, index, "no player name in card"))?;
    let mut player = RawPlayer::new(name).with_href(href);

    player.position = field_text(card, &POSITION_EL);
    if is_coach_position(&player.position) {
        debug!("'{}' is listed as {}, skipping", player.name, player.position);
        return Ok(None);
    }

    player.number = within(card, &NUMBER_EL).find_map(|el| number_in_text(&dom::spaced_text(el)));
    player.year = field_text(card, &YEAR_EL);
    player.height = field_text(card, &HEIGHT_EL);
    player.weight = field_text(card, &WEIGHT_EL);
    player.hometown = field_text(card, &HOMETOWN_EL);
    player.high_school = field_text(card, &HIGH_SCHOOL_EL);
    player.previous_school = field_text(card, &PREVIOUS_SCHOOL_EL);

    fill_from_text(&mut player, &dom::spaced_text(card));
    fill_origins(&mut player, card);
    Ok(Some(player))
}

impl RosterStrategy for CardStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, document: &Html) -> Harvest {
        let cards: Vec<ElementRef> = document
            .select(&CARD)
            .filter(|card| !dom::has_ancestor_matching(*card, &CARD))
            .collect();
        debug!("{} player cards", cards.len());

        let mut harvest = Harvest::default();
        for (index, card) in cards.into_iter().enumerate() {
            harvest.record(read_card(card, index));
        }
        harvest
    }
}

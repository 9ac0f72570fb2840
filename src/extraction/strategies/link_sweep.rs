use super::scan::{fill_from_text, fill_origins};
use super::{Harvest, RosterStrategy};
use crate::domain::RawPlayer;
use crate::extraction::detectors::{is_in_staff_section, is_valid_name};
use crate::extraction::dom::{self, selector};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

const NAME: &str = "link sweep";

static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

static PLAYER_PROFILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/roster/player/|/roster/[^/?#]+/\d+(?:[/?#]|$)|/players?/[^/?#]+").unwrap()
});
static STAFF_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/(?:coaches|staff)/").unwrap());

pub(crate) fn is_player_profile(href: &str) -> bool {
    PLAYER_PROFILE.is_match(href) && !STAFF_PATH.is_match(href)
}

/// Nearest `tr`, `li`, `article` or card-like element around a link.
fn container(link: ElementRef) -> Option<ElementRef> {
    link.ancestors().filter_map(ElementRef::wrap).find(|el| {
        dom::tag_is(*el, "tr")
            || dom::tag_is(*el, "li")
            || dom::tag_is(*el, "article")
            || dom::has_class_containing(*el, "card")
            || dom::has_class_containing(*el, "player")
    })
}

/// Last resort: every link to a player profile page, with whatever the
/// surrounding element says about the player.
pub struct LinkSweepStrategy;

impl RosterStrategy for LinkSweepStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, document: &Html) -> Harvest {
        let mut harvest = Harvest::default();

        for link in document.select(&LINK) {
            let Some(href) = dom::attr(link, "href").filter(|href| is_player_profile(href)) else {
                continue;
            };
            if is_in_staff_section(link) {
                continue;
            }

            // Photo and "Full Bio" links to the same profile carry no name.
            let name = dom::text_content(link);
            if !is_valid_name(&name) {
                continue;
            }

            let mut player = RawPlayer::new(name).with_href(href.trim());
            if let Some(container) = container(link) {
                fill_from_text(&mut player, &dom::spaced_text(container));
                fill_origins(&mut player, container);
            }
            harvest.record(Ok(Some(player)));
        }

        debug!("{} profile links with player names", harvest.players.len());
        harvest
    }
}

use super::scan::RowScanner;
use super::tables::{candidate_tables, header_field, is_profile_href, Cell, MIN_ROW_CELLS};
use super::{skip, Harvest, RosterStrategy};
use crate::domain::RawPlayer;
use crate::error::Result;
use crate::extraction::detectors::{
    find_year_token, is_position_token, is_valid_name, looks_like_hometown, looks_like_school_name,
};
use scraper::Html;
use tracing::debug;

const NAME: &str = "heuristic table";

/// Reads any roster-sized table by classifying each cell on its own.
pub struct HeuristicTableStrategy;

fn is_plain_name(text: &str) -> bool {
    is_valid_name(text)
        && !looks_like_hometown(text)
        && !is_position_token(text)
        && !find_year_token(text).is_some_and(|year| year == text)
        && header_field(text).is_none()
}

/// Name from the first name-shaped link, profile links first, else from
/// the first plain cell that reads as a name.
fn find_name(cells: &[Cell]) -> Option<(usize, String, String)> {
    let links: Vec<(usize, &str, &str)> = cells
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| cell.name_link().map(|(name, href)| (column, name, href)))
        .collect();

    if let Some((column, name, href)) = links
        .iter()
        .find(|(_, _, href)| is_profile_href(href))
        .or_else(|| links.first())
    {
        return Some((*column, name.to_string(), href.to_string()));
    }

    cells
        .iter()
        .enumerate()
        .find(|(_, cell)| is_plain_name(&cell.text))
        .map(|(column, cell)| (column, cell.text.clone(), String::new()))
}

fn read_row(cells: &[Cell], index: usize) -> Result<Option<RawPlayer>> {
    if cells.len() < MIN_ROW_CELLS {
        return Ok(None);
    }
    let Some((name_column, name, href)) = find_name(cells) else {
        return Ok(None);
    };

    let mut scanner = RowScanner::new(cells);
    scanner.consume(name_column);

    let mut player = RawPlayer::new(name).with_href(href);
    player.number = scanner.take_number();
    player.position = scanner.take_position().unwrap_or_default();
    if player.number.is_none() && player.position.is_empty() {
        return Err(skip(
            NAME,
            index,
            format!("'{}' has neither a number nor a position", player.name),
        ));
    }
    player.year = scanner.take_year().unwrap_or_default();
    player.height = scanner.take_height().unwrap_or_default();
    player.weight = scanner.take_weight().unwrap_or_default();

    let text_if = |accept: fn(&str) -> bool| {
        move |cell: &Cell| accept(&cell.text).then(|| cell.text.clone())
    };
    if let Some(hometown) = scanner.take(text_if(looks_like_hometown)) {
        player.hometown = hometown;
    }
    if let Some(school) = scanner.take(text_if(looks_like_school_name)) {
        player.high_school = school;
    }
    if let Some(school) = scanner.take(text_if(looks_like_school_name)) {
        player.previous_school = school;
    }

    let leftovers: Vec<String> = scanner
        .leftovers()
        .map(|(_, cell)| cell.text.clone())
        .collect();
    let mut leftovers = leftovers.into_iter();
    for slot in [
        &mut player.hometown,
        &mut player.high_school,
        &mut player.previous_school,
    ] {
        if slot.is_empty() {
            if let Some(text) = leftovers.next() {
                *slot = text;
            }
        }
    }

    Ok(Some(player))
}

impl RosterStrategy for HeuristicTableStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, document: &Html) -> Harvest {
        let mut harvest = Harvest::default();
        for table in candidate_tables(document) {
            let before = harvest.players.len();
            for (index, row) in table.rows.iter().enumerate() {
                harvest.record(read_row(row, index));
            }
            debug!("Table yielded {} players", harvest.players.len() - before);
        }
        harvest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(number: u32, name: &str, position: &str) -> String {
        format!(
            r#"<tr><td class="roster_jersey">{number}</td><td><img src="/p.jpg"></td>
               <td>{name}</td><td>So.</td><td>{position}</td><td>6-0</td><td>190</td>
               <td>Austin, TX</td><td>Lake Travis HS</td><td>Texas Tech</td></tr>"#
        )
    }

    #[test]
    fn classifies_cells_without_a_header() {
        let body: String = [
            (5, "Jane Doe", "QB"),
            (8, "Ray Park", "WR"),
            (11, "Sam Ortiz", "TE"),
            (23, "Kai Moore", "RB"),
            (54, "Eli Grant", "LB"),
        ]
        .iter()
        .map(|(number, name, position)| row(*number, name, position))
        .collect();
        let document = Html::parse_document(&format!("<table>{body}</table>"));

        let harvest = HeuristicTableStrategy.extract(&document);
        assert_eq!(harvest.players.len(), 5);

        let first = &harvest.players[0];
        assert_eq!(first.name, "Jane Doe");
        assert_eq!(first.number, Some(5));
        assert_eq!(first.position, "QB");
        assert_eq!(first.year, "So.");
        assert_eq!(first.height, "6-0");
        assert_eq!(first.weight, "190 lbs");
        assert_eq!(first.hometown, "Austin, TX");
        assert_eq!(first.high_school, "Lake Travis HS");
        assert_eq!(first.previous_school, "Texas Tech");
        assert_eq!(first.href, "");
    }

    #[test]
    fn prefers_profile_links_and_requires_number_or_position() {
        let names = ["Jane Doe", "Ray Park", "Sam Ortiz", "Kai Moore", "Eli Grant"];
        let mut body: String = names
            .iter()
            .zip(1..)
            .map(|(name, n)| {
                format!(
                    r#"<tr><td><a href="https://x.test/share">Share Page</a></td><td>{n}</td>
                       <td><a href="/sports/football/roster/p{n}/{n}">{name}</a></td>
                       <td>DL</td></tr>"#
                )
            })
            .collect();
        body.push_str("<tr><td>Jo Allen</td><td>Walk-on</td><td>Dallas, TX</td></tr>");
        let document = Html::parse_document(&format!("<table>{body}</table>"));

        let harvest = HeuristicTableStrategy.extract(&document);
        assert_eq!(harvest.players.len(), 5);
        assert_eq!(harvest.skipped, 1);
        assert_eq!(harvest.players[2].name, "Sam Ortiz");
        assert_eq!(harvest.players[2].href, "/sports/football/roster/p3/3");
        assert_eq!(harvest.players[2].number, Some(3));
    }

    #[test]
    fn plain_names_exclude_other_fields() {
        assert!(is_plain_name("Jane Doe"));
        assert!(is_plain_name("Marvin Harrison Jr."));
        assert!(!is_plain_name("Austin, TX"));
        assert!(!is_plain_name("Junior"));
        assert!(!is_plain_name("WR"));
        assert!(!is_plain_name("Name"));
        assert!(!is_plain_name("Hometown"));
    }
}

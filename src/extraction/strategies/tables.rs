//! Table discovery shared by the two table strategies.

use crate::extraction::detectors::{clean_text, is_in_staff_section, is_valid_name};
use crate::extraction::dom::{self, selector};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Tables with fewer body rows are page furniture, not rosters.
pub(crate) const MIN_BODY_ROWS: usize = 5;

/// Rows with fewer cells cannot hold a player.
pub(crate) const MIN_ROW_CELLS: usize = 3;

static TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static ROSTER_TABLE: Lazy<Selector> =
    Lazy::new(|| selector(r#"table[class*="roster"], table.sidearm-table"#));
static ROSTER_SECTION: Lazy<Selector> = Lazy::new(|| {
    selector(r#".roster-players, .s-person-listing, [class*="roster-list"], [data-roster], #roster, .roster"#)
});

static PROFILE_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/(?:roster|players?)/").unwrap());

pub(crate) fn is_profile_href(href: &str) -> bool {
    PROFILE_HREF.is_match(href)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Field {
    Number,
    Name,
    Position,
    Year,
    Height,
    Weight,
    Hometown,
    HighSchool,
    PreviousSchool,
}

impl Field {
    /// Column order assumed when a table has no usable header.
    pub(crate) const POSITIONAL: [Field; 9] = [
        Field::Number,
        Field::Name,
        Field::Position,
        Field::Year,
        Field::Height,
        Field::Weight,
        Field::Hometown,
        Field::HighSchool,
        Field::PreviousSchool,
    ];
}

/// Classifies a header cell's text. Returns the field and whether the
/// column combines hometown and school (`"Hometown / High School"`).
pub(crate) fn header_field(text: &str) -> Option<(Field, bool)> {
    let text = text.trim().trim_end_matches(':').trim().to_lowercase();
    let field = match text.as_str() {
        "#" | "no" | "no." | "num" | "num." | "number" | "jersey" | "jersey #" | "jersey number" => {
            Field::Number
        }
        "name" | "player" | "full name" | "player name" | "athlete" => Field::Name,
        "pos" | "pos." | "position" | "positions" => Field::Position,
        "yr" | "yr." | "year" | "class" | "cl" | "cl." | "academic year" | "elig" | "elig."
        | "eligibility" | "exp" | "exp." | "experience" => Field::Year,
        "ht" | "ht." | "height" => Field::Height,
        "wt" | "wt." | "weight" => Field::Weight,
        "hometown" | "home town" | "hometown, state" => Field::Hometown,
        "high school" | "hs" | "h.s." | "high school/previous school" => Field::HighSchool,
        "previous school" | "prev school" | "prev. school" | "previous" | "last school"
        | "previous college" | "transfer" | "college" => Field::PreviousSchool,
        combined if combined.contains("hometown") => {
            let with_school = combined.contains("school") || combined.contains('/');
            return Some((Field::Hometown, with_school));
        }
        other if other.contains("high school") => Field::HighSchool,
        other if other.contains("previous") || other.contains("last school") => {
            Field::PreviousSchool
        }
        _ => return None,
    };
    Some((field, false))
}

/// One table cell, read once.
#[derive(Debug, Clone, Default)]
pub(crate) struct Cell {
    pub text: String,
    pub links: Vec<(String, String)>,
    pub classes: String,
}

impl Cell {
    fn from_element(element: ElementRef) -> Self {
        Self {
            text: dom::text_content(element),
            links: dom::links(element),
            classes: element
                .value()
                .attr("class")
                .unwrap_or_default()
                .to_ascii_lowercase(),
        }
    }

    /// First link in the cell whose text is a valid player name. Links to
    /// roster or player profiles win over other links.
    pub(crate) fn name_link(&self) -> Option<(&str, &str)> {
        let valid = || {
            self.links
                .iter()
                .filter(|(text, _)| is_valid_name(text))
                .map(|(text, href)| (text.as_str(), href.as_str()))
        };
        valid()
            .find(|(_, href)| is_profile_href(href))
            .or_else(|| valid().next())
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

pub(crate) type Row = Vec<Cell>;

pub(crate) struct RosterTable {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    pub roster_marked: bool,
}

impl RosterTable {
    pub(crate) fn names_player_column(&self) -> bool {
        self.header
            .iter()
            .any(|cell| matches!(header_field(cell), Some((Field::Name, _))))
    }
}

fn row_cells(row: ElementRef) -> Row {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| dom::tag_is(*cell, "td") || dom::tag_is(*cell, "th"))
        .map(Cell::from_element)
        .collect()
}

fn is_header_row(row: ElementRef) -> bool {
    let cells: Vec<_> = row
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| dom::tag_is(*cell, "td") || dom::tag_is(*cell, "th"))
        .collect();
    cells.len() >= 2 && cells.iter().all(|cell| dom::tag_is(*cell, "th"))
}

/// A row of `td` cells that still names at least two columns, as older
/// roster pages lay out their header.
fn names_columns(row: ElementRef) -> bool {
    row_cells(row)
        .iter()
        .filter(|cell| header_field(&cell.text).is_some())
        .count()
        >= 2
}

fn parent_tag_is(row: ElementRef, tag: &str) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| dom::tag_is(parent, tag))
}

fn read_table(table: ElementRef) -> RosterTable {
    // Rows of nested tables belong to those tables.
    let own_rows: Vec<ElementRef> = table
        .select(&ROW)
        .filter(|row| {
            dom::closest(*row, |el| dom::tag_is(el, "table")).map(|el| el.id()) == Some(table.id())
        })
        .collect();

    let header_row = own_rows
        .iter()
        .find(|row| parent_tag_is(**row, "thead"))
        .or_else(|| own_rows.iter().find(|row| is_header_row(**row)))
        .or_else(|| own_rows.first().filter(|row| names_columns(**row)))
        .copied();

    let header = header_row
        .map(|row| {
            row_cells(row)
                .into_iter()
                .map(|cell| clean_text(&cell.text))
                .collect()
        })
        .unwrap_or_default();

    let rows = own_rows
        .iter()
        .filter(|row| Some(row.id()) != header_row.map(|h| h.id()))
        .filter(|row| !parent_tag_is(**row, "thead") && !parent_tag_is(**row, "tfoot"))
        .map(|row| row_cells(*row))
        .collect();

    let roster_marked = ROSTER_TABLE.matches(&table)
        || dom::self_and_ancestors(table).any(|el| ROSTER_SECTION.matches(&el));

    RosterTable {
        header,
        rows,
        roster_marked,
    }
}

/// Tables that could hold a roster, best candidates first: roster-marked
/// tables, then tables with a player column header, then document order.
pub(crate) fn candidate_tables(document: &Html) -> Vec<RosterTable> {
    let mut tables: Vec<RosterTable> = document
        .select(&TABLE)
        .filter(|table| !is_in_staff_section(*table))
        .map(read_table)
        .filter(|table| table.rows.len() >= MIN_BODY_ROWS)
        .collect();

    tables.sort_by_key(|table| (!table.roster_marked, !table.names_player_column()));
    tables
}

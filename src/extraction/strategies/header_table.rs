use super::scan::RowScanner;
use super::tables::{candidate_tables, header_field, Cell, Field, RosterTable, MIN_ROW_CELLS};
use super::{skip, Harvest, RosterStrategy};
use crate::domain::RawPlayer;
use crate::error::Result;
use crate::extraction::detectors::{
    find_weight, find_year_token, is_position_token, is_valid_name, leading_number,
    looks_like_school_name,
};
use crate::extraction::normalize::{normalize_position, UNKNOWN};
use rustc_hash::FxHashMap;
use scraper::Html;
use tracing::debug;

const NAME: &str = "header table";

/// Body rows inspected when validating a column assignment.
const SAMPLE_ROWS: usize = 10;

/// Share of sampled cells a column's detector must accept.
const VALID_RATIO: f64 = 0.5;

/// Reads tables whose header row names the columns.
pub struct HeaderTableStrategy;

#[derive(Debug, Clone, Default, PartialEq)]
struct ColumnMap {
    columns: FxHashMap<Field, usize>,
    /// The hometown column also carries the high school, `"City, ST / School"`.
    combined_hometown: bool,
    positional: bool,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (index, text) in header.iter().enumerate() {
            if let Some((field, combined)) = header_field(text) {
                if map.columns.contains_key(&field) {
                    continue;
                }
                map.columns.insert(field, index);
                if field == Field::Hometown {
                    map.combined_hometown = combined;
                }
            }
        }

        if !map.columns.contains_key(&Field::Name) {
            debug!("No player column in header {:?}, assuming positional layout", header);
            map = ColumnMap::positional(0);
        }
        map
    }

    /// The fixed layout starting at `offset`. Negative offsets drop the
    /// leading fields.
    fn positional(offset: isize) -> Self {
        let columns = Field::POSITIONAL
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                let shifted = index as isize + offset;
                (shifted >= 0).then_some((*field, shifted as usize))
            })
            .collect();
        ColumnMap {
            columns,
            combined_hometown: false,
            positional: true,
        }
    }

    fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    fn cell<'r>(&self, cells: &'r [Cell], field: Field) -> Option<&'r Cell> {
        self.get(field).and_then(|index| cells.get(index))
    }
}

fn ratio<F>(rows: &[&Vec<Cell>], column: usize, accept: F) -> f64
where
    F: Fn(&Cell) -> bool,
{
    if rows.is_empty() {
        return 0.0;
    }
    let hits = rows
        .iter()
        .filter(|row| row.get(column).is_some_and(&accept))
        .count();
    hits as f64 / rows.len() as f64
}

fn is_name_cell(cell: &Cell) -> bool {
    cell.name_link().is_some() || is_valid_name(&cell.text)
}

fn is_position_cell(cell: &Cell) -> bool {
    is_position_token(&cell.text) || normalize_position(&cell.text) != UNKNOWN
}

/// Checks each assigned column against a sample of body rows. Returns
/// `None` when no column holds player names.
fn validate(mut map: ColumnMap, table: &RosterTable) -> Option<ColumnMap> {
    let sample: Vec<&Vec<Cell>> = table
        .rows
        .iter()
        .filter(|row| row.len() >= MIN_ROW_CELLS)
        .take(SAMPLE_ROWS)
        .collect();
    if sample.is_empty() {
        return None;
    }

    let name_ok = map
        .get(Field::Name)
        .is_some_and(|column| ratio(&sample, column, is_name_cell) >= VALID_RATIO);

    if !name_ok {
        let width = sample.iter().map(|row| row.len()).max().unwrap_or(0);
        let (best, best_ratio) = (0..width)
            .map(|column| (column, ratio(&sample, column, |cell| cell.name_link().is_some())))
            .fold((0, 0.0), |best, candidate| if candidate.1 > best.1 { candidate } else { best });

        if best_ratio < VALID_RATIO {
            debug!("No column of table holds player names");
            return None;
        }

        let current = map.get(Field::Name).unwrap_or(0);
        debug!("Player names found in column {} instead of {}", best, current);
        if map.positional {
            map = ColumnMap::positional(best as isize - current as isize);
        } else {
            map.columns.retain(|_, column| *column != best);
            map.columns.insert(Field::Name, best);
        }
    }

    let checks: [(Field, fn(&Cell) -> bool); 3] = [
        (Field::Number, |cell| leading_number(&cell.text).is_some()),
        (Field::Position, is_position_cell),
        (Field::Year, |cell| find_year_token(&cell.text).is_some()),
    ];
    for (field, accept) in checks {
        if let Some(column) = map.get(field) {
            if ratio(&sample, column, accept) < VALID_RATIO {
                debug!("Column {} does not hold {:?}, scanning rows instead", column, field);
                map.columns.remove(&field);
            }
        }
    }

    Some(map)
}

/// A column label such as `Name` or `Player` repeated inside the body is
/// never a player.
fn name_contradicts(text: &str) -> bool {
    is_position_token(text)
        || looks_like_school_name(text)
        || header_field(text).is_some()
        || !is_valid_name(text)
}

fn read_row(map: &ColumnMap, cells: &[Cell], index: usize) -> Result<Option<RawPlayer>> {
    if cells.len() < MIN_ROW_CELLS {
        return Ok(None);
    }

    let mut scanner = RowScanner::new(cells);
    let mapped_name = map.get(Field::Name).and_then(|column| {
        let cell = cells.get(column)?;
        let (name, href) = match cell.name_link() {
            Some((name, href)) => (name.to_string(), href.to_string()),
            None => (
                cell.text.clone(),
                cell.links.first().map(|(_, href)| href.clone()).unwrap_or_default(),
            ),
        };
        (!name_contradicts(&name)).then_some((column, name, href))
    });

    let (name_column, name, href) = match mapped_name {
        Some(found) => found,
        None => cells
            .iter()
            .enumerate()
            .find_map(|(column, cell)| {
                cell.name_link()
                    .map(|(name, href)| (column, name.to_string(), href.to_string()))
            })
            .ok_or_else(|| {
                let text = map
                    .cell(cells, Field::Name)
                    .map(|cell| cell.text.as_str())
                    .unwrap_or_default();
                skip(NAME, index, format!("no player name in row (name cell '{text}')"))
            })?,
    };
    // A name found away from its column leaves that column's cell free to
    // hold whichever field the name displaced.
    let vacated = map.get(Field::Name).filter(|column| *column != name_column);
    for column in map.columns.values() {
        if Some(*column) != vacated {
            scanner.consume(*column);
        }
    }
    scanner.consume(name_column);

    // Columns taken over by the name read as unmapped.
    let mapped = |field: Field| map.get(field).filter(|column| *column != name_column);
    let mapped_text = |field: Field| {
        mapped(field)
            .and_then(|column| cells.get(column))
            .map(|cell| cell.text.clone())
            .unwrap_or_default()
    };

    let mut player = RawPlayer::new(name).with_href(href);
    player.number = match mapped(Field::Number) {
        Some(column) => cells.get(column).and_then(|cell| leading_number(&cell.text)),
        None => scanner.take_number(),
    };
    player.position = match mapped(Field::Position) {
        Some(_) => mapped_text(Field::Position),
        None => scanner.take_position().unwrap_or_default(),
    };
    player.year = match mapped(Field::Year) {
        Some(_) => mapped_text(Field::Year),
        None => scanner.take_year().unwrap_or_default(),
    };
    player.height = mapped_text(Field::Height);
    let weight = mapped_text(Field::Weight);
    player.weight = find_weight(&weight).unwrap_or(weight);
    player.previous_school = mapped_text(Field::PreviousSchool);
    player.high_school = mapped_text(Field::HighSchool);

    let hometown = mapped_text(Field::Hometown);
    match hometown.split_once('/') {
        Some((town, school)) if map.combined_hometown => {
            player.hometown = town.trim().to_string();
            if player.high_school.is_empty() {
                player.high_school = school.trim().to_string();
            }
        }
        _ => player.hometown = hometown,
    }

    Ok(Some(player))
}

fn harvest_table(table: &RosterTable) -> Option<Harvest> {
    let map = validate(ColumnMap::from_header(&table.header), table)?;
    let mut harvest = Harvest::default();
    for (index, row) in table.rows.iter().enumerate() {
        harvest.record(read_row(&map, row, index));
    }
    Some(harvest)
}

impl RosterStrategy for HeaderTableStrategy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn extract(&self, document: &Html) -> Harvest {
        let tables = candidate_tables(document);
        debug!("{} candidate tables", tables.len());

        tables
            .iter()
            .filter_map(harvest_table)
            .find(|harvest| !harvest.is_empty())
            .unwrap_or_default()
    }
}

//! Field scanning over free text and over table cells, used whenever a
//! strategy cannot point at a dedicated element for a field.

use super::tables::Cell;
use crate::domain::RawPlayer;
use crate::extraction::detectors::{
    clean_text, find_height, find_position_token, find_weight, find_year_token, is_position_token,
    looks_like_hometown, looks_like_school_name, parse_jersey_number,
};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static HASH_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)#(\d{1,2})(?:\s|$)").unwrap());
static LABELLED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Jersey\s*(?:Number|No\.?|#)?\s*(\d{1,2})\b").unwrap());
static LONE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)(\d{1,2})(?:\s|$)").unwrap());

/// Jersey number from free text: `#12`, then `Jersey Number 12`, then any
/// standalone one- or two-digit token.
pub(crate) fn number_in_text(text: &str) -> Option<u32> {
    [&*HASH_NUMBER, &*LABELLED_NUMBER, &*LONE_NUMBER]
        .iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Fills every empty scalar field of `player` from `text`. The player's
/// own name is blanked out first so initials like `C.J.` never read as a
/// position.
pub(crate) fn fill_from_text(player: &mut RawPlayer, text: &str) {
    let text = if player.name.is_empty() {
        text.to_string()
    } else {
        text.replace(&player.name, " ")
    };

    if player.number.is_none() {
        player.number = number_in_text(&text);
    }
    if player.position.is_empty() {
        player.position = find_position_token(&text).unwrap_or_default();
    }
    if player.year.is_empty() {
        player.year = find_year_token(&text).unwrap_or_default();
    }
    if player.height.is_empty() {
        player.height = find_height(&text).unwrap_or_default();
    }
    if player.weight.is_empty() {
        player.weight = find_weight(&text).unwrap_or_default();
    }
}

/// Fills hometown and high school from the individual text nodes of
/// `element`, skipping the node that holds the player's name.
pub(crate) fn fill_origins(player: &mut RawPlayer, element: ElementRef) {
    let name = player.name.clone();
    let pieces = element
        .text()
        .map(clean_text)
        .filter(|piece| !piece.is_empty() && *piece != name);

    for piece in pieces {
        if player.hometown.is_empty() && looks_like_hometown(&piece) {
            player.hometown = piece;
        } else if player.high_school.is_empty()
            && looks_like_school_name(&piece)
            && !piece.contains(&name)
        {
            player.high_school = piece;
        }
    }
}

/// Tracks which cells of a row already produced a field.
pub(crate) struct RowScanner<'r> {
    cells: &'r [Cell],
    consumed: Vec<bool>,
}

impl<'r> RowScanner<'r> {
    pub(crate) fn new(cells: &'r [Cell]) -> Self {
        Self {
            cells,
            consumed: vec![false; cells.len()],
        }
    }

    pub(crate) fn consume(&mut self, index: usize) {
        if let Some(slot) = self.consumed.get_mut(index) {
            *slot = true;
        }
    }

    /// First unconsumed cell accepted by `accept`, consumed on success.
    pub(crate) fn take<T, F>(&mut self, accept: F) -> Option<T>
    where
        F: Fn(&Cell) -> Option<T>,
    {
        let (index, value) = self
            .cells
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.consumed[*index])
            .find_map(|(index, cell)| accept(cell).map(|value| (index, value)))?;
        self.consume(index);
        Some(value)
    }

    /// Unconsumed, non-blank cells in column order.
    pub(crate) fn leftovers(&self) -> impl Iterator<Item = (usize, &'r Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(index, cell)| !self.consumed[*index] && !cell.is_blank())
    }

    pub(crate) fn take_number(&mut self) -> Option<u32> {
        let cells = self.cells;
        let by_class = cells.iter().enumerate().find(|(index, cell)| {
            !self.consumed[*index]
                && (cell.classes.contains("number") || cell.classes.contains("jersey"))
        });
        if let Some((index, cell)) = by_class {
            if let Some(number) = parse_jersey_number(&cell.text) {
                self.consume(index);
                return Some(number);
            }
        }
        self.take(|cell| parse_jersey_number(&cell.text))
    }

    pub(crate) fn take_position(&mut self) -> Option<String> {
        self.take(|cell| is_position_token(&cell.text).then(|| cell.text.to_uppercase()))
    }

    pub(crate) fn take_year(&mut self) -> Option<String> {
        self.take(|cell| find_year_token(&cell.text))
    }

    pub(crate) fn take_height(&mut self) -> Option<String> {
        self.take(|cell| find_height(&cell.text))
    }

    pub(crate) fn take_weight(&mut self) -> Option<String> {
        self.take(|cell| find_weight(&cell.text))
    }
}

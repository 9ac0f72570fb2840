//! Football roster extraction from athletics-department web pages.
//!
//! The core lives in [`extraction`]: a cascade of layout strategies turns
//! a parsed page into normalized [`domain::PlayerRecord`]s plus team
//! metadata. [`services`] and [`infrastructure`] wrap it with fetching,
//! batch processing and file output.

pub mod config;
pub mod domain;
pub mod error;
pub mod extraction;
pub mod infrastructure;
pub mod services;
pub mod utils;

pub use error::{Result, RosterError};
pub use extraction::{extract_roster, RosterExtractor};

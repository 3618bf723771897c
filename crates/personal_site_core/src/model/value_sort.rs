//! Value-sort board model.
//!
//! # Responsibility
//! - Define the card/column/board shapes used by the card-sorting exercise.
//! - Own the fixed column set and its rank order.
//! - Expose the embedded seed dataset used to create new boards.
//!
//! # Invariants
//! - A board only ever has the six `ColumnTitle` columns, ranked 0..=5.
//! - Within a board, a card is identified by its `body` text.
//! - Seed data is parsed at most once per process and never mutated.

use crate::model::validation::FieldError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

const INITIAL_BOARD_JSON: &str = include_str!("seed/value_sort_initial.json");

static INITIAL_COLUMNS: OnceCell<Vec<ValueSortColumn>> = OnceCell::new();

/// Fixed priority columns, declared in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnTitle {
    #[serde(rename = "Unsorted")]
    Unsorted,
    #[serde(rename = "Not Important")]
    NotImportant,
    #[serde(rename = "Somewhat Important")]
    SomewhatImportant,
    #[serde(rename = "Important")]
    Important,
    #[serde(rename = "Very Important")]
    VeryImportant,
    #[serde(rename = "Most Important")]
    MostImportant,
}

impl ColumnTitle {
    /// Every column, ordered by rank.
    pub const ALL: [ColumnTitle; 6] = [
        ColumnTitle::Unsorted,
        ColumnTitle::NotImportant,
        ColumnTitle::SomewhatImportant,
        ColumnTitle::Important,
        ColumnTitle::VeryImportant,
        ColumnTitle::MostImportant,
    ];

    /// Persisted/wire form, also stored in `value_sort_cards.column_name`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsorted => "Unsorted",
            Self::NotImportant => "Not Important",
            Self::SomewhatImportant => "Somewhat Important",
            Self::Important => "Important",
            Self::VeryImportant => "Very Important",
            Self::MostImportant => "Most Important",
        }
    }

    /// Exact-match lookup; returns `None` for titles outside the fixed set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|title| title.as_str() == value)
    }

    pub fn rank(self) -> u32 {
        self as u32
    }
}

impl Display for ColumnTitle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueSortCard {
    pub body: String,
    #[serde(default)]
    pub details: String,
}

impl ValueSortCard {
    pub fn new(body: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueSortColumn {
    pub title: ColumnTitle,
    #[serde(default)]
    pub cards: Vec<ValueSortCard>,
    /// Display rank. Informational on writes; the title decides placement.
    #[serde(default)]
    pub order: u32,
}

impl ValueSortColumn {
    /// Empty column carrying the title's fixed rank.
    pub fn empty(title: ColumnTitle) -> Self {
        Self {
            title,
            cards: Vec::new(),
            order: title.rank(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueSortBoard {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ValueSortColumn>,
}

impl ValueSortBoard {
    /// Board exposing all six fixed columns with no cards.
    pub fn with_fixed_columns(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: ColumnTitle::ALL
                .into_iter()
                .map(ValueSortColumn::empty)
                .collect(),
        }
    }

    pub fn column(&self, title: ColumnTitle) -> Option<&ValueSortColumn> {
        self.columns.iter().find(|column| column.title == title)
    }

    pub fn column_mut(&mut self, title: ColumnTitle) -> Option<&mut ValueSortColumn> {
        self.columns.iter_mut().find(|column| column.title == title)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }

    pub fn validate(&self) -> Vec<FieldError> {
        if self.name.is_empty() {
            vec![FieldError::new("name", "missing board name")]
        } else {
            Vec::new()
        }
    }
}

/// Seed columns used when a new board is created.
///
/// Parsed from the embedded JSON on first use; later calls return the cached
/// value. Each column's `order` is normalized to its title rank.
pub fn initial_columns() -> Result<&'static [ValueSortColumn], serde_json::Error> {
    INITIAL_COLUMNS
        .get_or_try_init(|| {
            let mut columns: Vec<ValueSortColumn> = serde_json::from_str(INITIAL_BOARD_JSON)?;
            for column in &mut columns {
                column.order = column.title.rank();
            }
            Ok::<_, serde_json::Error>(columns)
        })
        .map(Vec::as_slice)
}

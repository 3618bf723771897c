//! Value-sort board repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Assemble the nested board shape from flat `value_sort_cards` rows.
//! - Seed new boards from the embedded initial dataset.
//! - Relocate cards between columns with keyed upserts.
//!
//! # Invariants
//! - Assembled boards always carry the six fixed columns in rank order.
//! - Rows whose `column_name` is not a fixed title are skipped on read.
//! - Cards are keyed by `(board_name, card_body)`; nothing here deletes them.
//! - Seeding and upserts run in one transaction per call.

use crate::model::value_sort::{initial_columns, ColumnTitle, ValueSortBoard, ValueSortCard};
use crate::repo::error::{translate_error, RepoError, RepoResult};
use log::{debug, info};
use rusqlite::{params, Connection, TransactionBehavior};

/// Result of assembling a board by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLookup {
    pub board: ValueSortBoard,
    /// `false` when no stored card belongs to the board.
    pub found: bool,
}

/// Repository interface for value-sort boards.
pub trait BoardRepository {
    /// Reads every card of `board_name` and groups it by column.
    fn get(&self, board_name: &str) -> RepoResult<BoardLookup>;
    /// Inserts the seed cards for a new board.
    fn create(&mut self, board_name: &str) -> RepoResult<()>;
    /// Applies `board` as the desired column placement of each listed card.
    fn upsert(&mut self, board: &ValueSortBoard) -> RepoResult<()>;
}

/// SQLite-backed board repository.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn get(&self, board_name: &str) -> RepoResult<BoardLookup> {
        let mut stmt = self.conn.prepare(
            "SELECT board_name, card_body, card_details, column_name
             FROM value_sort_cards
             WHERE board_name = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([board_name])?;

        let mut board = ValueSortBoard::with_fixed_columns(String::new());
        while let Some(row) = rows.next()? {
            let name: String = row.get("board_name")?;
            let column_name: String = row.get("column_name")?;
            let card = ValueSortCard {
                body: row.get("card_body")?,
                details: row.get("card_details")?,
            };
            board.name = name;

            let Some(title) = ColumnTitle::parse(&column_name) else {
                debug!(
                    "event=board_get module=repo status=skip board={board_name} column={column_name}"
                );
                continue;
            };
            if let Some(column) = board.column_mut(title) {
                column.cards.push(card);
            }
        }

        let found = board.card_count() > 0;
        Ok(BoardLookup { board, found })
    }

    fn create(&mut self, board_name: &str) -> RepoResult<()> {
        let seed = initial_columns()
            .map_err(|err| RepoError::InvalidData(format!("value-sort seed data: {err}")))?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut inserted = 0usize;
        for column in seed {
            for card in &column.cards {
                tx.execute(
                    "INSERT INTO value_sort_cards (board_name, card_body, card_details, column_name)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        board_name,
                        card.body.as_str(),
                        card.details.as_str(),
                        column.title.as_str(),
                    ],
                )
                .map_err(translate_error)?;
                inserted += 1;
            }
        }
        tx.commit()?;

        info!("event=board_create module=repo status=ok board={board_name} cards={inserted}");
        Ok(())
    }

    fn upsert(&mut self, board: &ValueSortBoard) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut written = 0usize;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO value_sort_cards (board_name, card_body, card_details, column_name)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (board_name, card_body)
                 DO UPDATE SET column_name = excluded.column_name;",
            )?;
            for column in &board.columns {
                for card in &column.cards {
                    stmt.execute(params![
                        board.name.as_str(),
                        card.body.as_str(),
                        card.details.as_str(),
                        column.title.as_str(),
                    ])
                    .map_err(translate_error)?;
                    written += 1;
                }
            }
        }
        tx.commit()?;

        info!(
            "event=board_upsert module=repo status=ok board={} cards={written}",
            board.name
        );
        Ok(())
    }
}

use personal_site_core::db::open_db_in_memory;
use personal_site_core::{
    BoardRepository, ColumnTitle, RepoError, SqliteBoardRepository, ValueSortBoard, ValueSortCard,
};
use rusqlite::{params, Connection};

const FIXED_TITLES: [&str; 6] = [
    "Unsorted",
    "Not Important",
    "Somewhat Important",
    "Important",
    "Very Important",
    "Most Important",
];

fn insert_card(conn: &Connection, board: &str, body: &str, column: &str) {
    conn.execute(
        "INSERT INTO value_sort_cards (board_name, card_body, card_details, column_name)
         VALUES (?1, ?2, ?3, ?4);",
        params![board, body, format!("{body} details"), column],
    )
    .unwrap();
}

fn card_count(conn: &Connection, board: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM value_sort_cards WHERE board_name = ?1;",
        [board],
        |row| row.get(0),
    )
    .unwrap()
}

fn bodies(board: &ValueSortBoard, title: ColumnTitle) -> Vec<String> {
    board
        .column(title)
        .unwrap()
        .cards
        .iter()
        .map(|card| card.body.clone())
        .collect()
}

fn column_holding(board: &ValueSortBoard, body: &str) -> Option<ColumnTitle> {
    board
        .columns
        .iter()
        .find(|column| column.cards.iter().any(|card| card.body == body))
        .map(|column| column.title)
}

#[test]
fn get_unknown_board_has_six_empty_columns_and_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteBoardRepository::new(&mut conn);

    let lookup = repo.get("nobody").unwrap();
    assert!(!lookup.found);
    assert_eq!(lookup.board.name, "");
    assert_eq!(lookup.board.columns.len(), 6);
    assert!(lookup.board.columns.iter().all(|c| c.cards.is_empty()));
    assert_eq!(lookup.board.card_count(), 0);
}

#[test]
fn seeded_board_exposes_fixed_columns_in_rank_order() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBoardRepository::new(&mut conn);
    repo.create("life").unwrap();

    let lookup = repo.get("life").unwrap();
    assert!(lookup.found);
    assert_eq!(lookup.board.name, "life");

    let titles: Vec<&str> = lookup.board.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, FIXED_TITLES);
    let orders: Vec<u32> = lookup.board.columns.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4, 5]);

    let seed = personal_site_core::model::value_sort::initial_columns().unwrap();
    for seeded in seed {
        let column = lookup.board.column(seeded.title).unwrap();
        assert_eq!(column.cards, seeded.cards, "column {}", seeded.title);
    }
    assert_eq!(bodies(&lookup.board, ColumnTitle::Unsorted), vec!["Family"]);
}

#[test]
fn get_distributes_rows_by_column_and_drops_unknown_titles() {
    let mut conn = open_db_in_memory().unwrap();
    insert_card(&conn, "mixed", "Health", "Important");
    insert_card(&conn, "mixed", "Fame", "Not Important");
    insert_card(&conn, "mixed", "Wealth", "Not Important");
    insert_card(&conn, "mixed", "Ghost", "Retired Column");
    insert_card(&conn, "other", "Family", "Most Important");

    let repo = SqliteBoardRepository::new(&mut conn);
    let lookup = repo.get("mixed").unwrap();

    assert!(lookup.found);
    assert_eq!(lookup.board.card_count(), 3);
    assert_eq!(bodies(&lookup.board, ColumnTitle::Important), vec!["Health"]);
    assert_eq!(
        bodies(&lookup.board, ColumnTitle::NotImportant),
        vec!["Fame", "Wealth"]
    );
    assert!(bodies(&lookup.board, ColumnTitle::MostImportant).is_empty());
    assert_eq!(column_holding(&lookup.board, "Ghost"), None);
    let health = &lookup.board.column(ColumnTitle::Important).unwrap().cards[0];
    assert_eq!(health.details, "Health details");
}

#[test]
fn board_with_only_unknown_columns_is_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    insert_card(&conn, "stale", "Old", "Legacy");

    let repo = SqliteBoardRepository::new(&mut conn);
    let lookup = repo.get("stale").unwrap();
    assert!(!lookup.found);
    assert_eq!(lookup.board.columns.len(), 6);
}

#[test]
fn creating_same_board_twice_conflicts_and_keeps_first_seed() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBoardRepository::new(&mut conn);
    repo.create("life").unwrap();

    let err = repo.create("life").unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
    assert_eq!(
        err.to_string(),
        "Invalid Request Body: Unique constraint violated."
    );
    drop(repo);

    let seeded: usize = personal_site_core::model::value_sort::initial_columns()
        .unwrap()
        .iter()
        .map(|c| c.cards.len())
        .sum();
    assert_eq!(card_count(&conn, "life"), seeded as i64);
}

#[test]
fn create_rolls_back_when_a_later_card_conflicts() {
    let mut conn = open_db_in_memory().unwrap();
    // Occupies the key of the last seeded card only.
    insert_card(&conn, "life", "Growth", "Unsorted");

    let mut repo = SqliteBoardRepository::new(&mut conn);
    assert!(matches!(repo.create("life"), Err(RepoError::Conflict(_))));
    drop(repo);

    assert_eq!(card_count(&conn, "life"), 1);
}

#[test]
fn upsert_moves_card_between_columns() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBoardRepository::new(&mut conn);
    repo.create("life").unwrap();

    let mut board = repo.get("life").unwrap().board;
    let family = board
        .column_mut(ColumnTitle::Unsorted)
        .unwrap()
        .cards
        .remove(0);
    board
        .column_mut(ColumnTitle::MostImportant)
        .unwrap()
        .cards
        .push(family);
    repo.upsert(&board).unwrap();

    let after = repo.get("life").unwrap().board;
    assert_eq!(column_holding(&after, "Family"), Some(ColumnTitle::MostImportant));
    assert!(!bodies(&after, ColumnTitle::Unsorted).contains(&"Family".to_string()));
    assert_eq!(after.card_count(), board.card_count());
}

#[test]
fn upsert_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBoardRepository::new(&mut conn);
    repo.create("life").unwrap();

    let mut desired = ValueSortBoard::with_fixed_columns("life");
    desired
        .column_mut(ColumnTitle::VeryImportant)
        .unwrap()
        .cards
        .push(ValueSortCard::new("Family", "ignored on conflict"));

    repo.upsert(&desired).unwrap();
    let once = repo.get("life").unwrap().board;
    repo.upsert(&desired).unwrap();
    let twice = repo.get("life").unwrap().board;

    assert_eq!(once, twice);
    assert_eq!(column_holding(&twice, "Family"), Some(ColumnTitle::VeryImportant));
    let family = &twice.column(ColumnTitle::VeryImportant).unwrap().cards[0];
    assert_ne!(family.details, "ignored on conflict");
}

#[test]
fn upsert_inserts_cards_that_do_not_exist_yet() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBoardRepository::new(&mut conn);

    let mut board = ValueSortBoard::with_fixed_columns("fresh");
    board
        .column_mut(ColumnTitle::Important)
        .unwrap()
        .cards
        .push(ValueSortCard::new("Curiosity", "Wanting to learn more"));
    repo.upsert(&board).unwrap();

    let lookup = repo.get("fresh").unwrap();
    assert!(lookup.found);
    let curiosity = &lookup.board.column(ColumnTitle::Important).unwrap().cards[0];
    assert_eq!(curiosity.details, "Wanting to learn more");
}

#[test]
fn upsert_never_touches_other_boards() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteBoardRepository::new(&mut conn);
    repo.create("mine").unwrap();
    repo.create("yours").unwrap();

    let mut board = ValueSortBoard::with_fixed_columns("mine");
    board
        .column_mut(ColumnTitle::NotImportant)
        .unwrap()
        .cards
        .push(ValueSortCard::new("Family", ""));
    repo.upsert(&board).unwrap();

    let yours = repo.get("yours").unwrap().board;
    assert_eq!(column_holding(&yours, "Family"), Some(ColumnTitle::Unsorted));
}

#[test]
fn failed_upsert_rolls_back_earlier_writes() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_forbidden BEFORE INSERT ON value_sort_cards
         WHEN NEW.card_body = 'Forbidden'
         BEGIN SELECT RAISE(ABORT, 'forbidden card'); END;",
    )
    .unwrap();

    let mut repo = SqliteBoardRepository::new(&mut conn);
    let mut board = ValueSortBoard::with_fixed_columns("guarded");
    let unsorted = board.column_mut(ColumnTitle::Unsorted).unwrap();
    unsorted.cards.push(ValueSortCard::new("Allowed", ""));
    unsorted.cards.push(ValueSortCard::new("Forbidden", ""));

    let err = repo.upsert(&board).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    drop(repo);

    assert_eq!(card_count(&conn, "guarded"), 0);
}

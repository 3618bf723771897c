//! Operator CLI for the personal site store.
//!
//! # Responsibility
//! - Verify `personal_site_core` wiring against a real database file.
//! - Run read/seed operations through the same handlers a server would use.
//!
//! Usage: `personal_site_cli <ping|articles|article URI|board NAME|seed-board NAME>`

use log::error;
use personal_site_core::db::open_db;
use personal_site_core::handler::{articles, value_sort};
use personal_site_core::{
    init_logging, status, ApiResponse, SiteConfig, SqliteArticleRepository,
    SqliteBoardRepository,
};
use serde_json::json;
use std::process::ExitCode;

const USAGE: &str =
    "usage: personal_site_cli <ping|articles|article URI|board NAME|seed-board NAME>";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(response) => {
            println!("{} {}", response.status, response.body);
            if response.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<ApiResponse, String> {
    let command = args.first().map(String::as_str).ok_or(USAGE)?;
    if command == "ping" {
        return Ok(ApiResponse::text(
            status::OK,
            format!(
                "personal_site_core ping={} version={}",
                personal_site_core::ping(),
                personal_site_core::core_version()
            ),
        ));
    }

    let config = SiteConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }
    let mut conn = open_db(&config.db_path).map_err(|err| {
        error!("event=cli_open module=cli status=error error={err}");
        format!("cannot open `{}`: {err}", config.db_path.display())
    })?;

    let argument = || args.get(1).map(String::as_str).ok_or(USAGE);
    let response = match command {
        "articles" => articles::list_articles(&SqliteArticleRepository::new(&conn)),
        "article" => articles::get_article(&SqliteArticleRepository::new(&conn), argument()?),
        "board" => value_sort::get_board(&SqliteBoardRepository::new(&mut conn), argument()?),
        "seed-board" => {
            let body = json!({ "boardName": argument()? }).to_string();
            value_sort::create_board(&mut SqliteBoardRepository::new(&mut conn), &body)
        }
        _ => return Err(USAGE.to_string()),
    };
    Ok(response)
}

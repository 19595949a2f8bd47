use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::ingest::{count_questions, question_counts_by};

pub fn run(args: StatusArgs) -> Result<()> {
    let db_path = &args.store.db_path;
    info!(db_path = %db_path.display(), "status requested");

    if !db_path.exists() {
        warn!(path = %db_path.display(), "database file missing");
        return Ok(());
    }

    let connection = Connection::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;

    let schema_version = connection
        .query_row(
            "SELECT value FROM metadata WHERE key = 'db_schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .context("failed to read schema version")?
        .unwrap_or_default();
    let total = count_questions(&connection).context("failed to count questions")?;
    info!(
        path = %db_path.display(),
        schema_version = %schema_version,
        questions = total,
        "database status"
    );

    for column in ["subject", "year", "origin"] {
        for (value, count) in question_counts_by(&connection, column)? {
            info!(group = column, value = %value, count, "questions per group");
        }
    }

    let subjects = question_counts_by(&connection, "subject")?
        .into_iter()
        .map(|(subject, _)| subject)
        .collect::<Vec<String>>();
    info!(subjects = %subjects.join(", "), "distinct subjects");

    Ok(())
}

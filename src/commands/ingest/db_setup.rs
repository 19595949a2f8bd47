use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Another record already holds this `source_id`.
    DuplicateSourceId,
}

/// Keyed question store written by both ingestion pipelines.
///
/// Commit and rollback belong to the surrounding transaction, which the
/// command layer opens once per run.
pub trait QuestionStore {
    fn exists(&self, source_id: &str) -> Result<bool>;
    fn insert(&self, question: &NormalizedQuestion) -> Result<InsertOutcome>;
    fn delete_all(&self) -> Result<usize>;
}

impl QuestionStore for Connection {
    fn exists(&self, source_id: &str) -> Result<bool> {
        let found = self
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM questions WHERE source_id = ?1)",
                [source_id],
                |row| row.get::<_, bool>(0),
            )
            .with_context(|| format!("failed to look up source_id {source_id}"))?;
        Ok(found)
    }

    fn insert(&self, question: &NormalizedQuestion) -> Result<InsertOutcome> {
        if !question.is_complete() {
            bail!("refusing to persist incomplete question");
        }

        let mut statement = self.prepare_cached(
            "
            INSERT INTO questions(
              subject, question_text, option_a, option_b, option_c, option_d,
              correct_option, image_path, year, source_id, origin, ingested_at
            )
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ",
        )?;

        let result = statement.execute(params![
            &question.subject,
            &question.question_text,
            &question.option_a,
            &question.option_b,
            &question.option_c,
            &question.option_d,
            question.correct_option.as_str(),
            &question.image_path,
            question.year,
            &question.source_id,
            question.origin(),
            now_utc_string(),
        ]);

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(err) if question.source_id.is_some() && is_unique_violation(&err) => {
                Ok(InsertOutcome::DuplicateSourceId)
            }
            Err(err) => Err(err).context("failed to insert question"),
        }
    }

    fn delete_all(&self) -> Result<usize> {
        let removed = self
            .execute("DELETE FROM questions", [])
            .context("failed to delete questions")?;
        Ok(removed)
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Opens the question database, creating its directory and schema as needed.
pub fn open_store(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let connection = Connection::open(db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;
    Ok(connection)
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

pub(super) fn ensure_schema(connection: &Connection) -> Result<()> {
    connection
        .execute_batch(
            "
            CREATE TABLE IF NOT EXISTS metadata (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS questions (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              subject TEXT NOT NULL,
              question_text TEXT NOT NULL,
              option_a TEXT NOT NULL,
              option_b TEXT NOT NULL,
              option_c TEXT NOT NULL,
              option_d TEXT NOT NULL,
              correct_option TEXT NOT NULL,
              image_path TEXT,
              year INTEGER NOT NULL,
              source_id TEXT UNIQUE,
              origin TEXT NOT NULL,
              ingested_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_questions_subject ON questions(subject);
            CREATE INDEX IF NOT EXISTS idx_questions_year ON questions(year);
            ",
        )
        .context("failed to initialize question schema")?;

    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now_utc_string()],
    )?;

    Ok(())
}

/// Question counts grouped by `column`, largest group first.
pub fn question_counts_by(connection: &Connection, column: &str) -> Result<Vec<(String, i64)>> {
    if !matches!(column, "subject" | "year" | "origin") {
        bail!("unsupported grouping column: {column}");
    }

    let sql = format!(
        "SELECT CAST({column} AS TEXT), COUNT(*) FROM questions
         GROUP BY {column} ORDER BY COUNT(*) DESC, {column}"
    );
    let mut statement = connection
        .prepare(&sql)
        .with_context(|| format!("failed to prepare count by {column}"))?;
    let rows = statement.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut counts = Vec::new();
    for row in rows {
        counts.push(row?);
    }
    Ok(counts)
}

pub fn count_questions(connection: &Connection) -> Result<i64> {
    let count = connection.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
    Ok(count)
}

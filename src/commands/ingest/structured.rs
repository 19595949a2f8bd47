use super::*;

#[derive(Debug, Clone)]
pub struct StructuredConfig {
    pub delimiter: String,
    pub id_close: char,
    pub extension: String,
    pub default_year: i32,
    pub default_subject: String,
}

impl Default for StructuredConfig {
    fn default() -> Self {
        Self {
            delimiter: "[ID:".to_string(),
            id_close: ']',
            extension: "txt".to_string(),
            default_year: 2026,
            default_subject: "General".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub stats: RunStats,
    pub files: Vec<FileStats>,
}

/// Loads every matching text corpus under `source_dir` into `store`.
///
/// One ledger spans the whole run. Malformed and duplicate blocks are
/// counted, never fatal; store errors propagate and the caller rolls back.
pub fn load_directory<S, E>(
    store: &S,
    extractor: &E,
    source_dir: &Path,
    config: &StructuredConfig,
) -> Result<LoadOutcome>
where
    S: QuestionStore + ?Sized,
    E: FieldExtractor + ?Sized,
{
    let mut outcome = LoadOutcome::default();

    let Some(files) = discover_files(source_dir, &config.extension)? else {
        warn!(path = %source_dir.display(), "source directory not found");
        return Ok(outcome);
    };

    let year_pattern = year_pattern()?;
    let mut ledger = DedupLedger::new();
    for path in files {
        let filename = file_name_lossy(&path);
        let year = year_from_filename(&filename, &year_pattern, config.default_year);
        info!(file = %filename, year, "processing text corpus");

        let raw = std::fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let corpus = String::from_utf8_lossy(&raw);

        let mut file_stats = load_corpus(store, extractor, &mut ledger, &corpus, year, config)?;
        file_stats.filename = filename;
        file_stats.sha256 = sha256_file(&path)?;

        info!(
            file = %file_stats.filename,
            added = file_stats.added,
            skipped = file_stats.skipped,
            duplicates = file_stats.duplicates,
            "file processed"
        );
        outcome.stats.absorb(&file_stats);
        outcome.files.push(file_stats);
    }

    info!(
        added = outcome.stats.total_added,
        skipped = outcome.stats.total_skipped,
        duplicates = outcome.stats.total_duplicates,
        identifiers = ledger.len(),
        "text load finished"
    );

    Ok(outcome)
}

/// Runs split, classify, extract and insert over one corpus.
pub(super) fn load_corpus<S, E>(
    store: &S,
    extractor: &E,
    ledger: &mut DedupLedger,
    corpus: &str,
    year: i32,
    config: &StructuredConfig,
) -> Result<FileStats>
where
    S: QuestionStore + ?Sized,
    E: FieldExtractor + ?Sized,
{
    let mut stats = FileStats {
        year,
        ..FileStats::default()
    };

    for block in split_blocks(corpus, &config.delimiter, config.id_close)? {
        let (source_id, body) = match block {
            SplitBlock::Identified { source_id, body } => (source_id, body),
            SplitBlock::Malformed { reason, excerpt } => {
                warn!(reason, excerpt = %excerpt, "skipped malformed block");
                stats.skipped += 1;
                continue;
            }
        };

        let classification = ledger.classify(store, &source_id)?;
        if classification != Classification::New {
            debug!(source_id = %source_id, verdict = classification.as_str(), "skipped duplicate");
            stats.duplicates += 1;
            continue;
        }

        let mut question = match extractor.extract(body, year) {
            Ok(question) => question,
            Err(rejection) => {
                warn!(source_id = %source_id, reason = %rejection.describe(), "skipped invalid block");
                stats.skipped += 1;
                continue;
            }
        };
        question.source_id = Some(source_id);

        match store.insert(&question)? {
            InsertOutcome::Inserted => stats.added += 1,
            InsertOutcome::DuplicateSourceId => {
                debug!(
                    source_id = question.source_id.as_deref().unwrap_or_default(),
                    verdict = Classification::StoredDuplicate.as_str(),
                    "store rejected duplicate"
                );
                stats.duplicates += 1;
            }
        }
    }

    Ok(stats)
}

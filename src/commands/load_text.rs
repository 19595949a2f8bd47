use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::LoadTextArgs;
use crate::commands::ingest::{
    LabeledFieldExtractor, LoadOutcome, QuestionStore, StructuredConfig, load_directory,
    open_store,
};
use crate::model::LoadRunReport;
use crate::util::{now_utc_string, write_json_pretty};

pub fn run(args: LoadTextArgs) -> Result<()> {
    let started_at = now_utc_string();
    let config = StructuredConfig {
        delimiter: args.delimiter.clone(),
        id_close: args.id_close,
        extension: args.extension.clone(),
        default_year: args.default_year,
        default_subject: args.default_subject.clone(),
    };
    let extractor = LabeledFieldExtractor::new(&config.default_subject)?;

    info!(
        source_dir = %args.source_dir.display(),
        db_path = %args.store.db_path.display(),
        reload = args.reload,
        "starting text load"
    );

    let mut connection = open_store(&args.store.db_path)?;
    let tx = connection
        .transaction()
        .context("failed to begin load transaction")?;

    let outcome = match load_within(&tx, &args, &extractor, &config) {
        Ok(outcome) => {
            tx.commit().context("failed to commit loaded questions")?;
            outcome
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(error = %rollback_err, "rollback failed");
            }
            return Err(err).context("text load aborted; no questions were committed");
        }
    };

    let stats = outcome.stats;
    info!(
        added = stats.total_added,
        skipped = stats.total_skipped,
        duplicates = stats.total_duplicates,
        processed = stats.total_processed,
        "text load committed"
    );

    let report = LoadRunReport {
        report_version: 1,
        started_at,
        finished_at: now_utc_string(),
        source_directory: args.source_dir.display().to_string(),
        db_path: args.store.db_path.display().to_string(),
        reloaded: args.reload,
        stats,
        files: outcome.files,
    };

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote load report");
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report.stats).context("failed to serialize stats")?
        );
    }

    Ok(())
}

fn load_within(
    store: &Connection,
    args: &LoadTextArgs,
    extractor: &LabeledFieldExtractor,
    config: &StructuredConfig,
) -> Result<LoadOutcome> {
    if args.reload {
        let removed = store.delete_all()?;
        info!(removed, "cleared existing questions");
    }

    load_directory(store, extractor, &args.source_dir, config)
}

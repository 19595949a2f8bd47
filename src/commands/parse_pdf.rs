use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::ParsePdfArgs;
use crate::commands::ingest::{
    PopplerExtractor, PositionalSubjects, UnstructuredConfig, ingest_documents, open_store,
};
use crate::model::ParseRunReport;
use crate::util::{ensure_directory, now_utc_string, write_json_pretty};

pub fn run(args: ParsePdfArgs) -> Result<()> {
    let started_at = now_utc_string();
    let config = build_config(&args)?;
    let extractor = PopplerExtractor {
        max_pages: args.max_pages_per_doc,
    };

    if let Some(image_dir) = &config.image_dir {
        ensure_directory(image_dir)?;
    }

    info!(
        source = %args.source.display(),
        db_path = %args.store.db_path.display(),
        subjects = %config.subjects.subjects.join("/"),
        "starting document parse"
    );

    let mut connection = open_store(&args.store.db_path)?;
    let tx = connection
        .transaction()
        .context("failed to begin parse transaction")?;

    let outcome = match ingest_documents(&*tx, &extractor, &args.source, &config) {
        Ok(outcome) => {
            tx.commit().context("failed to commit parsed questions")?;
            outcome
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(error = %rollback_err, "rollback failed");
            }
            return Err(err).context("document parse aborted; no questions were committed");
        }
    };

    info!(
        added = outcome.total_added,
        incomplete = outcome.total_incomplete,
        documents = outcome.documents.len(),
        "document parse committed"
    );

    let report = ParseRunReport {
        report_version: 1,
        started_at,
        finished_at: now_utc_string(),
        source: args.source.display().to_string(),
        db_path: args.store.db_path.display().to_string(),
        total_added: outcome.total_added,
        total_incomplete: outcome.total_incomplete,
        documents: outcome.documents,
    };

    if let Some(report_path) = &args.report_path {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote parse report");
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    }

    Ok(())
}

fn build_config(args: &ParsePdfArgs) -> Result<UnstructuredConfig> {
    let mut subjects = PositionalSubjects::default();
    match args.subjects.as_slice() {
        [] => {}
        [first, second, third] => {
            subjects.subjects = [first.clone(), second.clone(), third.clone()];
        }
        other => bail!("expected three --subject values, got {}", other.len()),
    }
    if args.section_size == 0 {
        bail!("--section-size must be greater than zero");
    }
    subjects.section_size = args.section_size;

    Ok(UnstructuredConfig {
        extension: args.extension.clone(),
        default_year: args.default_year,
        subjects,
        image_dir: args.image_dir.clone(),
    })
}

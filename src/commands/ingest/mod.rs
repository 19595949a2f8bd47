//! Question ingestion core shared by the `load-text` and `parse-pdf` commands.
//!
//! Two pipelines feed [`NormalizedQuestion`] records into a [`QuestionStore`]:
//! the delimiter-driven block parser for semi-structured text corpora and the
//! line scanner for unstructured PDF text.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use regex::Regex;
use rusqlite::{Connection, params};
use tracing::{debug, info, warn};

use crate::model::{AnswerKey, DocumentStats, FileStats, NormalizedQuestion, RunStats};
use crate::util::{
    discover_files, ensure_directory, file_name_lossy, now_utc_string, sha256_file,
    year_from_filename, year_pattern,
};

const DB_SCHEMA_VERSION: &str = "0.2.0";

mod block_split;
mod db_setup;
mod document_extract;
mod field_extract;
mod ledger;
mod line_scanner;
mod structured;
mod subject_position;
mod text_clean;
mod unstructured;

pub use db_setup::{InsertOutcome, QuestionStore, count_questions, open_store, question_counts_by};
pub use document_extract::{DocumentExtractor, PopplerExtractor};
pub use field_extract::{BlockRejection, FieldExtractor, LabeledFieldExtractor};
pub use structured::{LoadOutcome, StructuredConfig, load_directory};
pub use subject_position::PositionalSubjects;
pub use unstructured::{UnstructuredConfig, ingest_documents};

use block_split::*;
use db_setup::*;
use field_extract::*;
use ledger::*;
use line_scanner::*;
use text_clean::*;

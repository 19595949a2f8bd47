use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "qbank",
    version,
    about = "Exam question ingestion into a local question bank"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load delimiter-structured text corpora.
    LoadText(LoadTextArgs),
    /// Reconstruct questions from unstructured PDF text.
    ParsePdf(ParsePdfArgs),
    Status(StatusArgs),
    /// Remove every stored question.
    Clear(ClearArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    #[arg(long, default_value = ".cache/qbank/questions.sqlite")]
    pub db_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct LoadTextArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long, default_value = "previousyear")]
    pub source_dir: PathBuf,

    #[arg(long, default_value = "txt")]
    pub extension: String,

    #[arg(long, default_value = "[ID:")]
    pub delimiter: String,

    #[arg(long, default_value_t = ']')]
    pub id_close: char,

    #[arg(long, default_value_t = 2026)]
    pub default_year: i32,

    #[arg(long, default_value = "General")]
    pub default_subject: String,

    /// Delete all stored questions before loading, in the same transaction.
    #[arg(long, default_value_t = false)]
    pub reload: bool,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ParsePdfArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// A single document or a directory of documents.
    #[arg(long, default_value = "previousyear")]
    pub source: PathBuf,

    #[arg(long, default_value = "pdf")]
    pub extension: String,

    #[arg(long, default_value_t = 2026)]
    pub default_year: i32,

    #[arg(long = "subject", num_args = 3, value_names = ["FIRST", "SECOND", "THIRD"])]
    pub subjects: Vec<String>,

    #[arg(long, default_value_t = 50)]
    pub section_size: usize,

    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    #[arg(long, default_value_t = false)]
    pub confirm: bool,
}

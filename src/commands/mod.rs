pub mod clear;
pub mod ingest;
pub mod load_text;
pub mod parse_pdf;
pub mod status;

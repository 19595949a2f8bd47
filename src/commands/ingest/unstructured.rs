use super::*;

#[derive(Debug, Clone)]
pub struct UnstructuredConfig {
    pub extension: String,
    pub default_year: i32,
    pub subjects: PositionalSubjects,
    /// When set, each question carries the first image of its starting page.
    pub image_dir: Option<PathBuf>,
}

impl Default for UnstructuredConfig {
    fn default() -> Self {
        Self {
            extension: "pdf".to_string(),
            default_year: 2026,
            subjects: PositionalSubjects::default(),
            image_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub total_added: usize,
    pub total_incomplete: usize,
    pub documents: Vec<DocumentStats>,
}

/// Parses one document, or every matching document in a directory.
///
/// Documents whose text cannot be extracted are reported and skipped. Store
/// errors propagate.
pub fn ingest_documents<S, X>(
    store: &S,
    extractor: &X,
    source: &Path,
    config: &UnstructuredConfig,
) -> Result<ParseOutcome>
where
    S: QuestionStore + ?Sized,
    X: DocumentExtractor + ?Sized,
{
    let mut outcome = ParseOutcome::default();

    let documents = if source.is_file() {
        vec![source.to_path_buf()]
    } else {
        match discover_files(source, &config.extension)? {
            Some(documents) => documents,
            None => {
                warn!(path = %source.display(), "document source not found");
                return Ok(outcome);
            }
        }
    };

    let patterns = ScanPatterns::new()?;
    let year_pattern = year_pattern()?;
    for path in documents {
        let filename = file_name_lossy(&path);
        let year = year_from_filename(&filename, &year_pattern, config.default_year);
        info!(file = %filename, year, "parsing document");

        let pages = match extractor.pages(&path) {
            Ok(pages) => pages,
            Err(err) => {
                warn!(file = %filename, error = %err, "document text extraction failed");
                continue;
            }
        };

        let mut stats = ingest_pages(store, extractor, &patterns, &path, &pages, year, config)?;
        stats.filename = filename;

        info!(
            file = %stats.filename,
            added = stats.added,
            incomplete = stats.incomplete,
            "document parsed"
        );
        outcome.total_added += stats.added;
        outcome.total_incomplete += stats.incomplete;
        outcome.documents.push(stats);
    }

    Ok(outcome)
}

/// Scans the pages of one document and persists every accepted question.
pub(super) fn ingest_pages<S, X>(
    store: &S,
    extractor: &X,
    patterns: &ScanPatterns,
    path: &Path,
    pages: &[String],
    year: i32,
    config: &UnstructuredConfig,
) -> Result<DocumentStats>
where
    S: QuestionStore + ?Sized,
    X: DocumentExtractor + ?Sized,
{
    let mut stats = DocumentStats {
        year,
        ..DocumentStats::default()
    };
    let mut page_images = PageImages::new(extractor, path, config.image_dir.as_deref());
    let mut scanner = LineScanner::new(patterns);

    for (index, page) in pages.iter().enumerate() {
        scanner.set_page(index + 1);
        for line in page.lines() {
            if let Some(finalized) = scanner.step(line) {
                persist_finalized(store, &mut page_images, finalized, year, config, &mut stats)?;
            }
        }
    }

    if let Some(finalized) = scanner.finish() {
        persist_finalized(store, &mut page_images, finalized, year, config, &mut stats)?;
    }

    Ok(stats)
}

fn persist_finalized<S, X>(
    store: &S,
    page_images: &mut PageImages<'_, X>,
    finalized: Finalized,
    year: i32,
    config: &UnstructuredConfig,
    stats: &mut DocumentStats,
) -> Result<()>
where
    S: QuestionStore + ?Sized,
    X: DocumentExtractor + ?Sized,
{
    let question = match finalized {
        Finalized::Accepted(question) => question,
        Finalized::Incomplete { page, excerpt } => {
            debug!(page, excerpt = %excerpt, "dropped incomplete question");
            stats.incomplete += 1;
            return Ok(());
        }
    };

    let [option_a, option_b, option_c, option_d] = question.options;
    let record = NormalizedQuestion {
        subject: config.subjects.subject_for(question.ordinal).to_string(),
        question_text: question.question_text,
        option_a,
        option_b,
        option_c,
        option_d,
        correct_option: AnswerKey::Unknown,
        year,
        source_id: None,
        image_path: page_images.first_for(question.page),
    };

    if store.insert(&record)? == InsertOutcome::Inserted {
        stats.added += 1;
    }
    Ok(())
}

/// Extracts page images lazily, once per page.
struct PageImages<'a, X: DocumentExtractor + ?Sized> {
    extractor: &'a X,
    path: &'a Path,
    image_dir: Option<&'a Path>,
    cache: HashMap<usize, Option<String>>,
}

impl<'a, X: DocumentExtractor + ?Sized> PageImages<'a, X> {
    fn new(extractor: &'a X, path: &'a Path, image_dir: Option<&'a Path>) -> Self {
        Self {
            extractor,
            path,
            image_dir,
            cache: HashMap::new(),
        }
    }

    fn first_for(&mut self, page: usize) -> Option<String> {
        let image_dir = self.image_dir?;
        if let Some(cached) = self.cache.get(&page) {
            return cached.clone();
        }

        let first = match self.extractor.page_images(self.path, page, image_dir) {
            Ok(images) => images
                .first()
                .map(|image| image.display().to_string()),
            Err(err) => {
                warn!(file = %self.path.display(), page, error = %err, "page image extraction failed");
                None
            }
        };
        self.cache.insert(page, first.clone());
        first
    }
}

use super::*;

/// Page-segmented text and page images of a source document.
pub trait DocumentExtractor {
    /// Text of every page, in document order.
    fn pages(&self, path: &Path) -> Result<Vec<String>>;

    /// Writes the images of 1-based `page` into `dest` and returns their paths.
    fn page_images(&self, path: &Path, page: usize, dest: &Path) -> Result<Vec<PathBuf>>;
}

/// Poppler command-line backend (`pdftotext`, `pdfimages`).
#[derive(Debug, Clone, Default)]
pub struct PopplerExtractor {
    pub max_pages: Option<usize>,
}

impl DocumentExtractor for PopplerExtractor {
    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let mut command = Command::new("pdftotext");
        command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
        if let Some(max_pages) = self.max_pages {
            command.arg("-l").arg(max_pages.to_string());
        }
        command.arg(path).arg("-");

        let output = command
            .output()
            .with_context(|| format!("failed to execute pdftotext for {}", path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pdftotext returned non-zero exit status for {}: {}",
                path.display(),
                stderr.trim()
            );
        }

        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }

    fn page_images(&self, path: &Path, page: usize, dest: &Path) -> Result<Vec<PathBuf>> {
        ensure_directory(dest)?;
        let prefix = image_prefix(path, page);

        let output = Command::new("pdfimages")
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg("-png")
            .arg(path)
            .arg(dest.join(&prefix))
            .output()
            .with_context(|| format!("failed to execute pdfimages for {}", path.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "pdfimages returned non-zero exit status for {} page {}: {}",
                path.display(),
                page,
                stderr.trim()
            );
        }

        let mut images = Vec::new();
        let entries = std::fs::read_dir(dest)
            .with_context(|| format!("failed to read {}", dest.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to read entry in {}", dest.display()))?;
            let name = entry.file_name();
            if name
                .to_str()
                .map(|name| name.starts_with(&format!("{prefix}-")))
                .unwrap_or(false)
            {
                images.push(entry.path());
            }
        }
        images.sort();
        Ok(images)
    }
}

/// Splits `pdftotext` output on form feeds, dropping trailing blank pages.
pub(super) fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

fn image_prefix(path: &Path, page: usize) -> String {
    let stem = path
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("document");
    let safe_stem = stem
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() {
                character
            } else {
                '_'
            }
        })
        .collect::<String>();

    format!("{safe_stem}_p{page}")
}

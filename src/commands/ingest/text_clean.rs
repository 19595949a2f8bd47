/// Glyph placeholders and mojibake left behind by PDF text extraction.
const ARTIFACT_REPLACEMENTS: &[(&str, &str)] = &[
    ("(cid:150)", "-"),
    ("(cid:215)", "x"),
    ("(cid:176)", "°"),
    ("Â°", "°"),
    ("â€™", "'"),
    ("â€œ", "\""),
    ("â€“", "-"),
    ("â€”", "-"),
    ("\u{0000}", ""),
];

/// Repairs known extraction artifacts and collapses every whitespace run,
/// newlines included, to a single space.
pub(super) fn clean_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut repaired = raw.to_string();
    for (artifact, replacement) in ARTIFACT_REPLACEMENTS {
        if repaired.contains(artifact) {
            repaired = repaired.replace(artifact, replacement);
        }
    }

    repaired.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Joins accumulated line fragments and cleans the result.
pub(super) fn clean_fragments(fragments: &[String]) -> String {
    clean_text(&fragments.join(" "))
}

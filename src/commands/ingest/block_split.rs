use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SplitBlock<'a> {
    Identified { source_id: String, body: &'a str },
    Malformed { reason: &'static str, excerpt: String },
}

/// Partitions `corpus` into blocks that each start right after `delimiter`.
///
/// Text before the first delimiter is a preamble and is dropped, as are
/// whitespace-only blocks. The identifier runs from the block start to the
/// first `id_close`; the remainder is the block body.
pub(super) fn split_blocks<'a>(
    corpus: &'a str,
    delimiter: &str,
    id_close: char,
) -> Result<Vec<SplitBlock<'a>>> {
    if delimiter.is_empty() {
        bail!("block delimiter must not be empty");
    }

    let mut blocks = Vec::new();
    for raw_block in corpus.split(delimiter).skip(1) {
        if raw_block.trim().is_empty() {
            continue;
        }

        let Some(close_index) = raw_block.find(id_close) else {
            blocks.push(SplitBlock::Malformed {
                reason: "missing identifier close marker",
                excerpt: excerpt(raw_block),
            });
            continue;
        };

        let source_id = raw_block[..close_index].trim();
        if source_id.is_empty() {
            blocks.push(SplitBlock::Malformed {
                reason: "empty identifier",
                excerpt: excerpt(raw_block),
            });
            continue;
        }

        blocks.push(SplitBlock::Identified {
            source_id: source_id.to_string(),
            body: &raw_block[close_index + id_close.len_utf8()..],
        });
    }

    Ok(blocks)
}

fn excerpt(raw_block: &str) -> String {
    clean_text(raw_block).chars().take(60).collect()
}

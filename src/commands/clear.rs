use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ClearArgs;
use crate::commands::ingest::{QuestionStore, open_store};

pub fn run(args: ClearArgs) -> Result<()> {
    if !args.confirm {
        bail!("refusing to clear questions without --confirm");
    }

    let mut connection = open_store(&args.store.db_path)?;
    let tx = connection
        .transaction()
        .context("failed to begin clear transaction")?;
    let removed = tx.delete_all()?;
    tx.commit().context("failed to commit clear")?;

    info!(removed, db_path = %args.store.db_path.display(), "cleared all questions");
    Ok(())
}

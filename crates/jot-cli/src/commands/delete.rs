use jot_core::NoteStore;

use crate::commands::common::parse_note_id;
use crate::error::CliError;

pub async fn run_delete(id: &str, store: &NoteStore) -> Result<(), CliError> {
    let id = parse_note_id(id)?;

    let removed = store.delete(id).await?;
    if removed == 0 {
        tracing::info!("No note with id {id}");
    }
    println!("{removed}");
    Ok(())
}

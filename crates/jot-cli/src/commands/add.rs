use jot_core::{NewNote, NoteStore};

use crate::commands::common::resolve_note_content;
use crate::error::CliError;

pub async fn run_add(content_parts: &[String], store: &NoteStore) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;

    let note = store.create_note(NewNote::new(content)).await?;
    println!("{}", note.id);
    Ok(())
}

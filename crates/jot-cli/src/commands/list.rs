use chrono::Utc;
use jot_core::NoteStore;

use crate::commands::common::{format_note_lines, note_to_list_item, NoteListItem};
use crate::error::CliError;

pub async fn run_list(as_json: bool, store: &NoteStore) -> Result<(), CliError> {
    let notes = store.list_all().await?;
    let now = Utc::now();

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note, now))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("No notes yet");
    } else {
        for line in format_note_lines(&notes, now) {
            println!("{line}");
        }
    }

    Ok(())
}

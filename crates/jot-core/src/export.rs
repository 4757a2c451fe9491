//! Note export helpers shared by every client.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::format_timestamp;
use crate::Note;

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

/// Serializable note representation, using the stored column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNote {
    pub id: i64,
    pub content: String,
    pub created_time: String,
}

/// Convert a note into an export record
#[must_use]
pub fn note_to_export_item(note: &Note) -> ExportNote {
    ExportNote {
        id: note.id.as_i64(),
        content: note.content.clone(),
        created_time: format_timestamp(&note.created_time),
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(note_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = note_to_export_item(note);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "createdTime: {}", export_note.created_time);
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        output.push_str(&export_note.content);
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

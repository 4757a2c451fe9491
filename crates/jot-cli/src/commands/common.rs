use std::io::{self, IsTerminal, Read};

use chrono::{DateTime, Utc};
use jot_core::{Note, NoteId};
use serde::Serialize;

use crate::error::CliError;

const PREVIEW_CHARS: usize = 48;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub preview: String,
    pub content: String,
    pub created_time: DateTime<Utc>,
    pub relative_time: String,
}

pub fn resolve_note_content(content_parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn parse_note_id(id: &str) -> Result<NoteId, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyNoteId);
    }

    trimmed
        .parse()
        .map_err(|_| CliError::InvalidNoteId(trimmed.to_string()))
}

pub fn format_note_lines(notes: &[Note], now: DateTime<Utc>) -> Vec<String> {
    notes
        .iter()
        .map(|note| {
            let id = note.id.to_string();
            let preview = note_preview(note, PREVIEW_CHARS);
            let relative_time = format_relative_time(note.created_time, now);
            format!("{id:>6}  {preview:<48}  {relative_time}")
        })
        .collect()
}

pub fn note_to_list_item(note: &Note, now: DateTime<Utc>) -> NoteListItem {
    NoteListItem {
        id: note.id.as_i64(),
        preview: note_preview(note, PREVIEW_CHARS),
        content: note.content.clone(),
        created_time: note.created_time,
        relative_time: format_relative_time(note.created_time, now),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let first_line = note.title_preview(usize::MAX);
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - created).num_seconds().max(0);
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

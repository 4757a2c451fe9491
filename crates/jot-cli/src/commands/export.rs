use std::path::Path;

use jot_core::export::render_notes_export;
use jot_core::NoteStore;

use crate::cli::ExportFormat;
use crate::error::CliError;

pub async fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    store: &NoteStore,
) -> Result<(), CliError> {
    let notes = store.list_all().await?;
    let rendered = render_notes_export(&notes, format.into())?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

use pathdiff::diff_paths;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::lister::list_music_files;
use crate::logger::Logger;
use crate::parser::{self, FieldOrder};
use crate::report::{Outcome, RunReport};

#[derive(Debug, Serialize)]
struct ExportRow {
    filename: String,
    album: String,
    artist: String,
    song: String,
}

/// Writes one row per listed file into the manifest, truncating any
/// previous export. Unparseable names still get a row, with the three
/// field columns left empty.
pub fn export_pass(config: &Config, logger: &Logger, root: &Path) -> Result<RunReport> {
    let mut report = RunReport::new("export");
    let mut writer = csv::Writer::from_path(&config.export_file)?;
    for path in list_music_files(root, &config.extensions)? {
        let shown = diff_paths(&path, root).unwrap_or_else(|| path.clone());
        let filename = shown.display().to_string();
        let row = match parser::parse_path(&path, FieldOrder::AlbumArtistSong) {
            Ok(fields) => {
                report.record(&path, Outcome::Exported);
                ExportRow {
                    filename,
                    album: fields.album,
                    artist: fields.artist,
                    song: fields.song,
                }
            }
            Err(err) => {
                logger.log(&err.to_string())?;
                report.record(&path, Outcome::ParseError);
                ExportRow {
                    filename,
                    album: String::new(),
                    artist: String::new(),
                    song: String::new(),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;
    logger.log(&format!(
        "manifest written to {}",
        config.export_file.display()
    ))?;
    Ok(report)
}

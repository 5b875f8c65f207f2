//! Embedded tag access for the two container formats in the library.
//! FLAC keeps flat Vorbis comment fields; MP3 goes through ID3v2.4
//! frames, where the comment additionally carries a language code and a
//! description. Both sit behind the same editor interface.

use id3::{TagLike, Version};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::error::Result;
use crate::lister::list_music_files;
use crate::logger::Logger;
use crate::parser::{self, FieldOrder, TrackFields};
use crate::renamer::rename_logged;
use crate::report::{Outcome, RunReport};

#[derive(Debug, Error)]
pub enum TagError {
    #[error("id3: {0}")]
    Id3(#[from] id3::Error),

    #[error("flac: {0}")]
    Flac(#[from] metaflac::Error),

    #[error("unsupported extension {0:?}")]
    Unsupported(String),

    #[error("missing {field} tag")]
    MissingField { field: &'static str },
}

pub trait TagEditor {
    fn title(&self) -> Option<String>;
    fn album(&self) -> Option<String>;
    fn artist(&self) -> Option<String>;
    fn set_title(&mut self, value: &str);
    fn set_album(&mut self, value: &str);
    fn set_artist(&mut self, value: &str);
    fn clear_comment(&mut self);
    fn save(&mut self) -> std::result::Result<(), TagError>;
}

pub fn open(path: &Path) -> std::result::Result<Box<dyn TagEditor>, TagError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "flac" => Ok(Box::new(FlacEditor {
            tag: metaflac::Tag::read_from_path(path)?,
        })),
        "mp3" => {
            let tag = id3::Tag::read_from_path(path).unwrap_or_else(|_| id3::Tag::new());
            Ok(Box::new(Mp3Editor {
                tag,
                path: path.to_path_buf(),
            }))
        }
        other => Err(TagError::Unsupported(other.to_string())),
    }
}

struct FlacEditor {
    tag: metaflac::Tag,
}

fn first_vorbis(tag: &metaflac::Tag, key: &str) -> Option<String> {
    tag.get_vorbis(key)
        .and_then(|mut values| values.next().map(|v| v.to_string()))
}

impl TagEditor for FlacEditor {
    fn title(&self) -> Option<String> {
        first_vorbis(&self.tag, "TITLE")
    }

    fn album(&self) -> Option<String> {
        first_vorbis(&self.tag, "ALBUM")
    }

    fn artist(&self) -> Option<String> {
        first_vorbis(&self.tag, "ARTIST")
    }

    fn set_title(&mut self, value: &str) {
        self.tag.set_vorbis("TITLE", vec![value.to_string()]);
    }

    fn set_album(&mut self, value: &str) {
        self.tag.set_vorbis("ALBUM", vec![value.to_string()]);
    }

    fn set_artist(&mut self, value: &str) {
        self.tag.set_vorbis("ARTIST", vec![value.to_string()]);
    }

    fn clear_comment(&mut self) {
        self.tag.remove_vorbis("COMMENT");
    }

    fn save(&mut self) -> std::result::Result<(), TagError> {
        self.tag.save()?;
        Ok(())
    }
}

struct Mp3Editor {
    tag: id3::Tag,
    path: PathBuf,
}

impl TagEditor for Mp3Editor {
    fn title(&self) -> Option<String> {
        self.tag.title().map(|v| v.to_string())
    }

    fn album(&self) -> Option<String> {
        self.tag.album().map(|v| v.to_string())
    }

    fn artist(&self) -> Option<String> {
        self.tag.artist().map(|v| v.to_string())
    }

    fn set_title(&mut self, value: &str) {
        self.tag.set_title(value);
    }

    fn set_album(&mut self, value: &str) {
        self.tag.set_album(value);
    }

    fn set_artist(&mut self, value: &str) {
        self.tag.set_artist(value);
    }

    fn clear_comment(&mut self) {
        // COMM frames carry language and description next to the text
        let _ = self.tag.remove("COMM");
    }

    fn save(&mut self) -> std::result::Result<(), TagError> {
        self.tag.write_to_path(&self.path, Version::Id3v24)?;
        Ok(())
    }
}

/// Parses each name as `Song - Album - Artist` and writes the fields
/// into the file's tag block, clearing the comment. Parse and tag
/// failures are logged and skipped; the batch keeps going.
pub fn write_tags_pass(config: &Config, logger: &Logger, root: &Path) -> Result<RunReport> {
    let mut report = RunReport::new("write-tags");
    for path in list_music_files(root, &config.extensions)? {
        let fields = match parser::parse_path(&path, FieldOrder::SongAlbumArtist) {
            Ok(fields) => fields,
            Err(err) => {
                logger.log(&err.to_string())?;
                report.record(&path, Outcome::ParseError);
                continue;
            }
        };
        if config.dry_run {
            logger.log(&format!(
                "would tag {} (title {:?}, album {:?}, artist {:?})",
                path.display(),
                fields.song,
                fields.album,
                fields.artist
            ))?;
            report.record(&path, Outcome::Unchanged);
            continue;
        }
        if let Err(err) = store_fields(&path, &fields) {
            logger.log(&format!("tag error for {}: {}", path.display(), err))?;
            report.record(&path, Outcome::TagError);
            continue;
        }
        logger.log(&format!(
            "tagged {} (title {:?}, album {:?}, artist {:?})",
            path.display(),
            fields.song,
            fields.album,
            fields.artist
        ))?;
        report.record(&path, Outcome::Tagged);
    }
    Ok(report)
}

fn store_fields(path: &Path, fields: &TrackFields) -> std::result::Result<(), TagError> {
    let mut editor = open(path)?;
    editor.set_title(&fields.song);
    editor.set_album(&fields.album);
    editor.set_artist(&fields.artist);
    editor.clear_comment();
    editor.save()
}

/// Rebuilds each filename as `Album - Artist - Song.<ext>` from the
/// embedded tags. The extension comes from the source file unless the
/// config pins one. Missing or empty tag fields are tag errors.
pub fn rename_from_tags_pass(config: &Config, logger: &Logger, root: &Path) -> Result<RunReport> {
    let mut report = RunReport::new("rename-from-tags");
    for path in list_music_files(root, &config.extensions)? {
        let mut fields = match read_fields(&path) {
            Ok(fields) => fields,
            Err(err) => {
                logger.log(&format!("tag error for {}: {}", path.display(), err))?;
                report.record(&path, Outcome::TagError);
                continue;
            }
        };
        fields.remove_null_bytes();
        fields.remove_slashes();
        fields.remove_invalid_symbols();
        let ext = match &config.rename_extension {
            Some(ext) => ext.clone(),
            None => path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string(),
        };
        let new_name = format!(
            "{} - {} - {}.{}",
            fields.album, fields.artist, fields.song, ext
        );
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name == new_name {
            report.record(&path, Outcome::Unchanged);
            continue;
        }
        rename_logged(&path, &new_name, logger, config.dry_run)?;
        report.record(&path, Outcome::Renamed);
    }
    Ok(report)
}

fn read_fields(path: &Path) -> std::result::Result<TrackFields, TagError> {
    let editor = open(path)?;
    Ok(TrackFields {
        album: required(editor.album(), "album")?,
        artist: required(editor.artist(), "artist")?,
        song: required(editor.title(), "title")?,
    })
}

fn required(value: Option<String>, field: &'static str) -> std::result::Result<String, TagError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TagError::MissingField { field }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn quiet() -> Logger {
        Logger::new(Path::new(""))
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let err = open(Path::new("notes.txt")).err().unwrap();
        assert!(matches!(err, TagError::Unsupported(ext) if ext == "txt"));
    }

    #[test]
    fn mp3_fields_round_trip_through_the_editor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        fs::write(&path, b"").unwrap();

        let fields = TrackFields {
            album: "Fearless".to_string(),
            artist: "Taylor Swift".to_string(),
            song: "Fifteen".to_string(),
        };
        store_fields(&path, &fields).unwrap();

        let editor = open(&path).unwrap();
        assert_eq!(editor.title().as_deref(), Some("Fifteen"));
        assert_eq!(editor.album().as_deref(), Some("Fearless"));
        assert_eq!(editor.artist().as_deref(), Some("Taylor Swift"));
    }

    #[test]
    fn write_tags_pass_reads_the_song_album_artist_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fifteen - Fearless - Taylor Swift.mp3");
        fs::write(&path, b"").unwrap();
        let config = Config::default();

        let report = write_tags_pass(&config, &quiet(), dir.path()).unwrap();
        assert_eq!(report.count(Outcome::Tagged), 1);

        let editor = open(&path).unwrap();
        assert_eq!(editor.title().as_deref(), Some("Fifteen"));
        assert_eq!(editor.album().as_deref(), Some("Fearless"));
        assert_eq!(editor.artist().as_deref(), Some("Taylor Swift"));
    }

    #[test]
    fn write_tags_pass_clears_any_existing_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fifteen - Fearless - Taylor Swift.mp3");
        fs::write(&path, b"").unwrap();

        let mut tag = id3::Tag::new();
        tag.add_frame(id3::frame::Comment {
            lang: "eng".to_string(),
            description: "".to_string(),
            text: "ripped by someone".to_string(),
        });
        tag.write_to_path(&path, Version::Id3v24).unwrap();

        let config = Config::default();
        write_tags_pass(&config, &quiet(), dir.path()).unwrap();

        let reread = id3::Tag::read_from_path(&path).unwrap();
        assert_eq!(reread.comments().count(), 0);
    }

    #[test]
    fn tags_written_by_the_writer_rebuild_the_same_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Fifteen - Fearless - Taylor Swift.mp3");
        fs::write(&path, b"").unwrap();
        let config = Config::default();

        write_tags_pass(&config, &quiet(), dir.path()).unwrap();
        let report = rename_from_tags_pass(&config, &quiet(), dir.path()).unwrap();
        assert_eq!(report.count(Outcome::Renamed), 1);
        assert!(dir
            .path()
            .join("Fearless - Taylor Swift - Fifteen.mp3")
            .exists());
    }

    #[test]
    fn rename_extension_can_be_pinned_by_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.mp3");
        fs::write(&path, b"").unwrap();
        store_fields(
            &path,
            &TrackFields {
                album: "A".to_string(),
                artist: "B".to_string(),
                song: "C".to_string(),
            },
        )
        .unwrap();

        let mut config = Config::default();
        config.rename_extension = Some("flac".to_string());
        rename_from_tags_pass(&config, &quiet(), dir.path()).unwrap();
        assert!(dir.path().join("A - B - C.flac").exists());
    }

    #[test]
    fn untagged_files_are_logged_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blank.mp3"), b"").unwrap();
        let config = Config::default();

        let report = rename_from_tags_pass(&config, &quiet(), dir.path()).unwrap();
        assert_eq!(report.count(Outcome::TagError), 1);
        assert!(dir.path().join("blank.mp3").exists());
    }

    #[test]
    fn tag_values_are_scrubbed_before_becoming_a_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.mp3");
        fs::write(&path, b"").unwrap();
        store_fields(
            &path,
            &TrackFields {
                album: "Back in Black".to_string(),
                artist: "AC/DC".to_string(),
                song: "Hells Bells?".to_string(),
            },
        )
        .unwrap();

        let config = Config::default();
        rename_from_tags_pass(&config, &quiet(), dir.path()).unwrap();
        assert!(dir
            .path()
            .join("Back in Black - AC-DC - Hells Bells.mp3")
            .exists());
    }
}

//! Filename conventions: three fields separated by ` - `, with the
//! extension carrying the container format. The exporter reads names as
//! `Album - Artist - Song`, the tag writer as `Song - Album - Artist`.

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub const FIELD_DELIMITER: &str = " - ";

#[derive(Debug, Error)]
#[error("cannot unpack \"{name}\" into ({fields})")]
pub struct ParseError {
    pub name: String,
    pub fields: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFields {
    pub album: String,
    pub artist: String,
    pub song: String,
}

impl TrackFields {
    pub fn remove_slashes(&mut self) {
        self.album = self.album.replace("/", "-");
        self.artist = self.artist.replace("/", "-");
        self.song = self.song.replace("/", "-");
    }

    pub fn remove_null_bytes(&mut self) {
        self.album = self.album.replace("\0", "");
        self.artist = self.artist.replace("\0", "");
        self.song = self.song.replace("\0", "");
    }

    pub fn remove_invalid_symbols(&mut self) {
        let invalid_symbols = HashSet::from(["<", ">", ":", "\"", "/", "\\", "|", "?", "*"]);
        invalid_symbols.iter().for_each(|sym| {
            self.album = self.album.replace(sym, "");
            self.artist = self.artist.replace(sym, "");
            self.song = self.song.replace(sym, "");
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldOrder {
    AlbumArtistSong,
    SongAlbumArtist,
}

impl FieldOrder {
    fn names(self) -> &'static str {
        match self {
            FieldOrder::AlbumArtistSong => "album, artist, song",
            FieldOrder::SongAlbumArtist => "song, album, artist",
        }
    }
}

/// Splits an extension-stripped name into its three fields. Anything
/// other than exactly three segments is a parse failure.
pub fn parse_stem(stem: &str, order: FieldOrder) -> Result<TrackFields, ParseError> {
    let parts: Vec<&str> = stem.split(FIELD_DELIMITER).collect();
    if parts.len() != 3 {
        return Err(ParseError {
            name: stem.to_string(),
            fields: order.names(),
        });
    }
    let fields = match order {
        FieldOrder::AlbumArtistSong => TrackFields {
            album: parts[0].to_string(),
            artist: parts[1].to_string(),
            song: parts[2].to_string(),
        },
        FieldOrder::SongAlbumArtist => TrackFields {
            song: parts[0].to_string(),
            album: parts[1].to_string(),
            artist: parts[2].to_string(),
        },
    };
    Ok(fields)
}

pub fn parse_path(path: &Path, order: FieldOrder) -> Result<TrackFields, ParseError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let stem = path.file_stem().and_then(|s| s.to_str());
    match stem {
        Some(stem) => parse_stem(stem, order).map_err(|_| ParseError {
            name,
            fields: order.names(),
        }),
        None => Err(ParseError {
            name,
            fields: order.names(),
        }),
    }
}

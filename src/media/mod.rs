//! Audio file server
//!
//! Tracks are plain file names resolved against a fixed media root. A name
//! must be exactly one normal path component, and the canonicalized target
//! must still live under the canonicalized root (this also catches symlinks
//! pointing outside it).

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;

/// Supported audio extensions and their media types
const AUDIO_TYPES: [(&str, &str); 8] = [
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("flac", "audio/flac"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("opus", "audio/opus"),
    ("wma", "audio/x-ms-wma"),
];

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum MediaError {
    /// Name is not a single safe path component, or escapes the root
    #[error("invalid track name: {0}")]
    InvalidName(String),

    #[error("track not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An opened track ready to stream
#[derive(Debug)]
pub struct Track {
    pub file: File,
    pub media_type: &'static str,
    pub len: u64,
}

pub struct MediaLibrary {
    root: PathBuf,
}

impl MediaLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `track_name` to a regular file inside the media root.
    pub async fn resolve(&self, track_name: &str) -> Result<PathBuf, MediaError> {
        if !is_plain_file_name(track_name) {
            return Err(MediaError::InvalidName(track_name.to_string()));
        }

        let root = match tokio::fs::canonicalize(&self.root).await {
            Ok(root) => root,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(root = %self.root.display(), "Media root does not exist");
                return Err(MediaError::NotFound(track_name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let path = match tokio::fs::canonicalize(root.join(track_name)).await {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MediaError::NotFound(track_name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        if !path.starts_with(&root) {
            return Err(MediaError::InvalidName(track_name.to_string()));
        }

        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(MediaError::NotFound(track_name.to_string()));
        }
        Ok(path)
    }

    pub async fn open(&self, track_name: &str) -> Result<Track, MediaError> {
        let path = self.resolve(track_name).await?;
        let file = File::open(&path).await?;
        let len = file.metadata().await?.len();
        Ok(Track {
            file,
            media_type: media_type_for(&path),
            len,
        })
    }
}

/// One normal component, no separators, no leading dot.
fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0'])
    {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Media type inferred from the file extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MEDIA_TYPE;
    };
    AUDIO_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, media_type)| *media_type)
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

/// Append `.mp3` when the name carries no extension.
pub fn with_default_extension(track: &str) -> String {
    if Path::new(track).extension().is_some() {
        track.to_string()
    } else {
        format!("{}.mp3", track)
    }
}

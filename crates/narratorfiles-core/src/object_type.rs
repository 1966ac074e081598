//! Object-type classification by file extension.
//!
//! A listing entry is a [`ObjectType::Directory`] when it comes from a common
//! prefix; otherwise its extension decides between [`ObjectType::Audio`] and
//! [`ObjectType::Other`] using a fixed extension-to-MIME table.

use std::fmt;

use serde::Serialize;

/// Audio extensions recognized for inline playback, with their MIME types.
const AUDIO_MIME_TYPES: &[(&str, &str)] = &[
    (".mp3", "audio/mpeg"),
    (".wav", "audio/wav"),
    (".m4a", "audio/mp4"),
    (".flac", "audio/flac"),
    (".ogg", "audio/ogg"),
    (".aac", "audio/aac"),
    (".wma", "audio/x-ms-wma"),
];

/// Kind of a listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A synthetic directory derived from a common key prefix.
    Directory,
    /// An object with a recognized audio extension.
    Audio,
    /// Any other object.
    Other,
}

impl ObjectType {
    /// Lowercase name used in templates and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }

    /// Whether the entry is a directory rather than an object.
    #[must_use]
    pub fn is_directory(self) -> bool {
        self == Self::Directory
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an object by its extension (including the leading dot).
///
/// Never returns [`ObjectType::Directory`]: directories are assigned by the
/// listing engine, not by extension.
///
/// # Examples
///
/// ```
/// use narratorfiles_core::object_type::{ObjectType, classify};
///
/// assert_eq!(classify(".mp3"), ObjectType::Audio);
/// assert_eq!(classify(".pdf"), ObjectType::Other);
/// assert_eq!(classify(""), ObjectType::Other);
/// ```
#[must_use]
pub fn classify(extension: &str) -> ObjectType {
    if audio_mime_type(extension).is_some() {
        ObjectType::Audio
    } else {
        ObjectType::Other
    }
}

/// Look up the audio MIME type for an extension, if it is a recognized one.
#[must_use]
pub fn audio_mime_type(extension: &str) -> Option<&'static str> {
    AUDIO_MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Return the extension of a key: the suffix of its last path segment
/// starting at the final `.`, or `""` when that segment has no dot.
///
/// # Examples
///
/// ```
/// use narratorfiles_core::object_type::extension_of;
///
/// assert_eq!(extension_of("books/chapter.01.mp3"), ".mp3");
/// assert_eq!(extension_of("v1.2/readme"), "");
/// ```
#[must_use]
pub fn extension_of(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    name.rfind('.').map_or("", |pos| &name[pos..])
}

/// Classify an object directly from its key.
#[must_use]
pub fn classify_key(key: &str) -> ObjectType {
    classify(extension_of(key))
}

/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer and the UI layer.

/// Classification of an indexed file, derived from its extension at scan time.
///
/// The kind is stored redundantly alongside the extension so that queries
/// can filter on it without re-deriving anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Still image, previewed as a GPU texture (.png, .jpg)
    Texture,
    /// Audio clip, previewed through a decoder + playback device (.ogg, .mp3, .wav)
    Audio,
}

impl FileKind {
    /// Database representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Texture => "texture",
            FileKind::Audio => "audio",
        }
    }

    /// Parse the database representation back into a kind
    pub fn from_str(s: &str) -> Option<FileKind> {
        match s {
            "texture" => Some(FileKind::Texture),
            "audio" => Some(FileKind::Audio),
            _ => None,
        }
    }

    /// Classify a lowercase extension (with leading dot) into a kind.
    /// Returns None for anything the browser does not index.
    pub fn from_ext(ext: &str) -> Option<FileKind> {
        match ext {
            ".png" | ".jpg" => Some(FileKind::Texture),
            ".ogg" | ".mp3" | ".wav" => Some(FileKind::Audio),
            _ => None,
        }
    }
}

/// Represents a single indexed file in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Unique database ID, assigned on insert
    pub id: i64,
    /// Display name (file stem + extension, e.g. "sword_01.png")
    pub name: String,
    /// Full absolute path; unique across the catalog
    pub path: String,
    /// Lowercase extension including the leading dot (e.g. ".png")
    pub ext: String,
    /// File size in bytes at scan time
    pub size: u64,
    /// Texture or Audio, derived from ext
    pub kind: FileKind,
}

/// A file discovered by the scanner, before it has been inserted
/// into the catalog (no ID yet).
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFile {
    pub name: String,
    pub path: String,
    pub ext: String,
    pub size: u64,
    pub kind: FileKind,
}

/// Match mode for multi-token queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Union: match any of the tokens (OR)
    #[default]
    Any,
    /// Intersect: match all of the tokens (AND)
    All,
}

impl MatchMode {
    pub fn match_all(&self) -> bool {
        matches!(self, MatchMode::All)
    }
}

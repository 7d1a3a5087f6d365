use std::fmt::Display;

/// The two media streams a clip page may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// Return the container extension of the downloaded stream file,
    /// with the leading dot. e.g. ".ext"
    pub fn temp_ext(self) -> &'static str {
        match self {
            MediaKind::Video => ".mp4",
            MediaKind::Audio => ".mp3",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
        }
    }
}

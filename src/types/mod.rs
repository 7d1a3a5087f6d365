mod clip_id;
mod media_kind;
mod metadata;
mod quality;

pub use clip_id::ClipId;
pub use media_kind::MediaKind;
pub use metadata::{ClipMetadata, MediaDescriptor, Rendition};
pub use quality::Quality;

mod command;
mod ffmpeg;
mod http;

pub use ffmpeg::{Ffmpeg, StreamMerger};
pub use http::{ClipSource, HttpClipSource};

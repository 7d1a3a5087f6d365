use tempfile::NamedTempFile;

use crate::{
    result::Result,
    types::{ClipId, MediaKind},
};

/// Create a named temporary file for a downloaded stream.
///
/// The file destructor will be called at the handle drop.
/// **As such, one must not simply get the file path and drop the handle.**
pub fn named_tempfile(kind: MediaKind) -> Result<NamedTempFile> {
    Ok(tempfile::Builder::new()
        .prefix("coubgrab-")
        .suffix(kind.temp_ext())
        .tempfile()?)
}

/// Compose the output file name of a clip.
///
/// Format: `<id> - <slug>.mp4`, or `<id>.mp4` when the title slugged
/// down to nothing.
pub fn output_file_name(id: &ClipId, slug: &str) -> String {
    if slug.is_empty() {
        format!("{id}.mp4")
    } else {
        format!("{id} - {slug}.mp4")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_combines_id_and_slug() {
        let id = ClipId::parse("2ck4sw");
        assert_eq!(output_file_name(&id, "nice-coub"), "2ck4sw - nice-coub.mp4");
    }

    #[test]
    fn empty_slug_falls_back_to_the_id_alone() {
        let id = ClipId::parse("2ck4sw");
        assert_eq!(output_file_name(&id, ""), "2ck4sw.mp4");
    }

    #[test]
    fn tempfile_carries_the_stream_extension() {
        let file = named_tempfile(MediaKind::Audio).unwrap();
        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("coubgrab-"));
        assert!(name.ends_with(".mp3"));
    }
}

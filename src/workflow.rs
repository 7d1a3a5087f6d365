use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    cli::Strategy,
    io::{named_tempfile, output_file_name},
    merger::merge_streams,
    outside::{ClipSource, StreamMerger},
    page,
    result::{Error, Result},
    slug::slugify,
    types::{ClipId, MediaDescriptor, MediaKind},
};

/// Options shared by the single-id and batch entry points
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowOptions {
    /// Cut the merged clip instead of looping the video over the audio
    pub no_loop: bool,
    /// Keep non-ASCII letters in the output file name
    pub allow_unicode: bool,
    /// Keep the temporary stream files of a failed clip for inspection
    pub keep_temp: bool,
    /// How the media files are acquired
    pub strategy: Strategy,
}

/// Per-clip pipeline: fetch, extract, download, merge, clean up.
pub struct Workflow<'a> {
    source: &'a dyn ClipSource,
    merger: &'a dyn StreamMerger,
    options: WorkflowOptions,
}

impl<'a> Workflow<'a> {
    pub fn new(
        source: &'a dyn ClipSource,
        merger: &'a dyn StreamMerger,
        options: WorkflowOptions,
    ) -> Self {
        Self {
            source,
            merger,
            options,
        }
    }

    /// Process one clip to completion and return the rendered file path.
    ///
    /// Only the video stream is required: a payload without an audio
    /// descriptor produces a video-only file. Any failed required step
    /// is returned to the caller; the batch driver decides whether it
    /// aborts the run.
    pub fn process(&self, id: &ClipId, out_dir: Option<&Path>) -> Result<PathBuf> {
        if self.options.strategy == Strategy::Share {
            // The share endpoint serves a pre-looped file, but its URL is
            // not part of the page payload; fail loudly instead of
            // producing nothing
            return Err(Error::Unsupported("The share-link acquisition strategy"));
        }

        let mut temps = Vec::new();
        let res = self.execute(id, out_dir, &mut temps);

        match &res {
            Ok(output) => {
                debug!("Removing temporary stream files");
                drop(temps);
                info!("Done. Clip {id} saved to {}", output.display());
            }
            Err(_) if self.options.keep_temp => {
                for file in temps {
                    match file.keep() {
                        Ok((_, path)) => {
                            warn!("Keeping temporary stream file {}", path.display());
                        }
                        Err(err) => warn!("Could not keep a temporary stream file: {err}"),
                    }
                }
            }
            // Dropping the handles removes the files of the failed clip
            Err(_) => {}
        }

        res
    }

    fn execute(
        &self,
        id: &ClipId,
        out_dir: Option<&Path>,
        temps: &mut Vec<NamedTempFile>,
    ) -> Result<PathBuf> {
        info!("Clip {id}: querying {}", id.view_url());
        let html = self
            .source
            .fetch_page(id)
            .map_err(|err| err.wrap_err_with(|| format!("Could not fetch the page of clip {id}")))?;
        let metadata = page::extract_metadata(&html)?;
        debug!("title = {:?}", metadata.title);

        let video = self.fetch_stream(MediaKind::Video, &metadata.video, temps)?;
        let audio = match &metadata.audio {
            Some(descriptor) => Some(self.fetch_stream(MediaKind::Audio, descriptor, temps)?),
            None => None,
        };
        let announced = metadata.audio.as_ref().and_then(MediaDescriptor::sample_duration);

        let file_name = output_file_name(id, &slugify(&metadata.title, self.options.allow_unicode));
        let output = match out_dir {
            Some(dir) => dir.join(&file_name),
            None => PathBuf::from(&file_name),
        };

        info!("Merging streams into {file_name:?}");
        merge_streams(
            self.merger,
            &video,
            audio.as_deref(),
            announced,
            self.options.no_loop,
            &output,
        )?;

        Ok(output)
    }

    /// Download the best rendition of one media stream to a temporary
    /// file, registering it for cleanup before any byte is fetched.
    fn fetch_stream(
        &self,
        kind: MediaKind,
        descriptor: &MediaDescriptor,
        temps: &mut Vec<NamedTempFile>,
    ) -> Result<PathBuf> {
        let rendition = descriptor.best()?;

        info!("Downloading the {kind} stream");
        let file = named_tempfile(kind)?;
        let path = file.path().to_path_buf();
        temps.push(file);

        self.source.download(&rendition.url, &path)?;
        Ok(path)
    }
}

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use miette::{miette, Context, IntoDiagnostic};
use tracing::debug;

use crate::{
    result::{Error, Result},
    types::ClipId,
};

/// Media streams are written to disk in chunks of this size
const CHUNK_SIZE: usize = 1024 * 1024;

/// Interface for fetching clip pages and raw media bytes
pub trait ClipSource {
    /// Fetch the HTML page describing a clip.
    fn fetch_page(&self, id: &ClipId) -> Result<String>;

    /// Stream a media URL to a local file.
    ///
    /// No retry and no resume: a mid-stream failure propagates to the
    /// caller, which owns the destination file and its cleanup.
    fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// [`ClipSource`] backed by a blocking HTTP agent
pub struct HttpClipSource {
    agent: ureq::Agent,
}

impl HttpClipSource {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    /// GET a URL, turning a non-success status into [`Error::Status`].
    fn get(&self, url: &str) -> Result<ureq::Response> {
        match self.agent.get(url).call() {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(code, _)) => Err(Error::Status {
                url: url.to_owned(),
                code,
            }),
            Err(err) => Err(Error::Miette(miette!("Could not reach {url}: {err}"))),
        }
    }
}

impl ClipSource for HttpClipSource {
    fn fetch_page(&self, id: &ClipId) -> Result<String> {
        let url = id.view_url();
        debug!("GET {url}");

        let response = self.get(&url)?;
        Ok(response
            .into_string()
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not read the page body of {url}"))?)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<()> {
        debug!("GET {url} -> {}", dest.display());

        let response = self.get(url)?;
        let mut reader = response.into_reader();

        let mut file = File::create(dest)
            .into_diagnostic()
            .wrap_err_with(|| format!("Could not open {}", dest.display()))?;

        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let read = reader
                .read(&mut chunk)
                .into_diagnostic()
                .wrap_err_with(|| format!("Stream error while downloading {url}"))?;
            if read == 0 {
                break;
            }
            file.write_all(&chunk[..read])
                .into_diagnostic()
                .wrap_err_with(|| format!("Could not write to {}", dest.display()))?;
        }

        Ok(file.flush().into_diagnostic()?)
    }
}

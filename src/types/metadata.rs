use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    result::{Error, Result},
    types::Quality,
};

/// One concrete encoded file for a given media kind and tier
#[derive(Debug, Clone, Deserialize)]
pub struct Rendition {
    pub url: String,
}

/// Per-tier renditions for one media kind.
///
/// The wire format mixes the tier keys with unrelated fields
/// (`sample_duration` lives inside the audio descriptor), so unknown
/// keys are ignored rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct MediaDescriptor {
    higher: Option<Rendition>,
    high: Option<Rendition>,
    med: Option<Rendition>,
    sample_duration: Option<String>,
}

impl MediaDescriptor {
    /// Return the best available rendition, in fixed preference order.
    ///
    /// A descriptor carrying none of the known tiers fails the clip,
    /// it is never silently skipped.
    pub fn best(&self) -> Result<&Rendition> {
        for quality in Quality::PREFERENCE {
            if let Some(rendition) = self.tier(quality) {
                debug!("Selected the '{quality}' tier");
                return Ok(rendition);
            }
        }
        Err(Error::NoQuality)
    }

    fn tier(&self, quality: Quality) -> Option<&Rendition> {
        match quality {
            Quality::Higher => self.higher.as_ref(),
            Quality::High => self.high.as_ref(),
            Quality::Med => self.med.as_ref(),
        }
    }

    /// Duration in seconds announced by the source metadata, if any.
    ///
    /// The wire format carries it as a string; an unparsable value is
    /// treated as absent so the merge falls back to the probed duration.
    pub fn sample_duration(&self) -> Option<f64> {
        let raw = self.sample_duration.as_deref()?;
        match raw.parse() {
            Ok(secs) => Some(secs),
            Err(_) => {
                warn!("Ignoring unparsable sample_duration {raw:?}");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    title: String,
    file_versions: FileVersions,
}

#[derive(Debug, Deserialize)]
struct FileVersions {
    html5: Html5,
}

#[derive(Debug, Deserialize)]
struct Html5 {
    video: MediaDescriptor,
    audio: Option<MediaDescriptor>,
}

/// The embedded page payload, reduced to what the workflow needs.
///
/// Parsed and validated once per clip: the video descriptor is required,
/// audio is optional as a clip may have no separate audio track.
#[derive(Debug)]
pub struct ClipMetadata {
    pub title: String,
    pub video: MediaDescriptor,
    pub audio: Option<MediaDescriptor>,
}

impl ClipMetadata {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPayload = serde_json::from_str(json)
            .map_err(|err| Error::Payload(format!("malformed or incomplete JSON: {err}")))?;

        let Html5 { video, audio } = raw.file_versions.html5;
        Ok(Self {
            title: raw.title,
            video,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: serde_json::Value) -> MediaDescriptor {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn selection_prefers_higher_over_med() {
        let desc = descriptor(serde_json::json!({
            "med": { "url": "https://host/med.mp4" },
            "higher": { "url": "https://host/higher.mp4" },
        }));
        assert_eq!(desc.best().unwrap().url, "https://host/higher.mp4");
    }

    #[test]
    fn selection_falls_back_to_the_only_tier() {
        let desc = descriptor(serde_json::json!({
            "med": { "url": "https://host/med.mp4" },
        }));
        assert_eq!(desc.best().unwrap().url, "https://host/med.mp4");
    }

    #[test]
    fn no_known_tier_is_an_error() {
        let desc = descriptor(serde_json::json!({}));
        assert!(matches!(desc.best(), Err(Error::NoQuality)));
    }

    #[test]
    fn sample_duration_is_parsed_from_its_string_form() {
        let desc = descriptor(serde_json::json!({
            "high": { "url": "https://host/high.mp3" },
            "sample_duration": "4.52",
        }));
        assert_eq!(desc.sample_duration(), Some(4.52));
    }

    #[test]
    fn unparsable_sample_duration_is_ignored() {
        let desc = descriptor(serde_json::json!({ "sample_duration": "n/a" }));
        assert_eq!(desc.sample_duration(), None);
    }

    #[test]
    fn payload_requires_the_video_descriptor() {
        let json = serde_json::json!({
            "title": "A clip",
            "file_versions": { "html5": {} },
        });
        let res = ClipMetadata::from_json(&json.to_string());
        assert!(matches!(res, Err(Error::Payload(_))));
    }

    #[test]
    fn audio_descriptor_is_optional() {
        let json = serde_json::json!({
            "title": "A clip",
            "file_versions": {
                "html5": { "video": { "med": { "url": "https://host/v.mp4" } } },
            },
        });
        let metadata = ClipMetadata::from_json(&json.to_string()).unwrap();
        assert!(metadata.audio.is_none());
        assert_eq!(metadata.video.best().unwrap().url, "https://host/v.mp4");
    }
}

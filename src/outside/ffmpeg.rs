use std::{ffi::OsStr, fmt::Debug, path::Path, sync::OnceLock};

use miette::{Context, IntoDiagnostic};
use regex::Regex;

use crate::{
    merger::MergePlan,
    result::{bail, Result},
};

use super::command::{assert_success_command, run_command, Capture, FFMPEG, FFPROBE, FFXXX_DEFAULT_ARGS};

pub trait StreamMerger: Debug {
    /// Stream duration of a media file, in seconds.
    fn probe_duration(&self, input: &Path) -> Result<f64>;

    /// Copy a lone video stream into the output container without
    /// re-encoding. Its own duration governs the output length.
    fn remux(&self, video: &Path, output: &Path) -> Result<()>;

    /// Mux the audio stream onto the video according to the plan:
    /// optionally repeat the video, cut the result at the target
    /// duration.
    ///
    /// Without looping, a video shorter than the target simply ends
    /// early and players hold its last frame over the remaining audio.
    fn merge(&self, video: &Path, audio: &Path, plan: &MergePlan, output: &Path) -> Result<()>;
}

/// Interface for the [ffmpeg](https://ffmpeg.org) and ffprobe programs
#[derive(Debug)]
pub struct Ffmpeg;

impl Ffmpeg {
    /// Verify that the `ffmpeg` and `ffprobe` binaries are reachable
    pub fn new() -> Result<Self> {
        assert_success_command(FFMPEG, |cmd| cmd.arg("-version"))?;
        assert_success_command(FFPROBE, |cmd| cmd.arg("-version"))?;

        Ok(Self)
    }
}

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

impl StreamMerger for Ffmpeg {
    fn probe_duration(&self, input: &Path) -> Result<f64> {
        let res = run_command(
            FFPROBE,
            |cmd| {
                cmd.args(FFXXX_DEFAULT_ARGS)
                    .args(["-show_entries", "format=duration"])
                    .arg(input.as_os_str())
            },
            Capture::STDOUT,
        )?;

        if !res.status.success() {
            return bail(format!("{FFPROBE} did run but was not successful"));
        }
        let stdout = String::from_utf8_lossy(&res.stdout);

        let re = DURATION_RE.get_or_init(|| Regex::new(r"duration=([0-9.]+)").unwrap());
        let cap = match re.captures(&stdout) {
            Some(cap) => cap,
            None => return bail("Did not find the duration in the ffprobe output"),
        };

        let duration = cap.get(1).unwrap().as_str();
        Ok(duration
            .parse()
            .into_diagnostic()
            .wrap_err("Could not parse duration")?)
    }

    fn remux(&self, video: &Path, output: &Path) -> Result<()> {
        assert_success_command(FFMPEG, |cmd| {
            cmd.args(FFXXX_DEFAULT_ARGS)
                .arg("-y")
                .args([OsStr::new("-i"), video.as_os_str()])
                .args(["-c", "copy"])
                .arg(output)
        })
    }

    fn merge(&self, video: &Path, audio: &Path, plan: &MergePlan, output: &Path) -> Result<()> {
        let target = plan.target.to_string();

        assert_success_command(FFMPEG, |cmd| {
            let mut cmd = cmd.args(FFXXX_DEFAULT_ARGS).arg("-y");

            if plan.loop_video {
                // Input option: repeat the video stream until cut by -t
                cmd = cmd.args(["-stream_loop", "-1"]);
            }

            cmd.args([OsStr::new("-i"), video.as_os_str()])
                .args([OsStr::new("-i"), audio.as_os_str()])
                .args(["-map", "0:v:0", "-map", "1:a:0"])
                // The video data is copied as-is; the audio track is
                // re-encoded so any mp4 player accepts the result
                .args(["-c:v", "copy", "-c:a", "aac"])
                .args(["-t", &target])
                .arg(output)
        })
    }
}

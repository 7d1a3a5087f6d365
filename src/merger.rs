use std::path::Path;

use tracing::{debug, info};

use crate::{outside::StreamMerger, result::Result};

/// How to reconcile the video and audio durations of one clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePlan {
    /// Cut of the merged clip, in seconds
    pub target: f64,
    /// Repeat the video stream until it covers the target duration
    pub loop_video: bool,
}

/// Decide the merge plan for a clip that has an audio track.
///
/// Precedence, which must hold exactly:
/// 1. a duration announced by the source metadata wins and is trimmed
///    to without looping;
/// 2. otherwise `no_loop` trims to the probed audio duration;
/// 3. otherwise the video loops to cover the audio, then is trimmed
///    to exactly its duration.
pub fn reconcile(announced: Option<f64>, audio_duration: f64, no_loop: bool) -> MergePlan {
    match announced {
        Some(target) => MergePlan {
            target,
            loop_video: false,
        },
        None => MergePlan {
            target: audio_duration,
            loop_video: !no_loop,
        },
    }
}

/// Produce the final clip file from the downloaded streams.
///
/// Without an audio stream the video is kept as-is, its own duration
/// governing the output length.
pub fn merge_streams(
    merger: &dyn StreamMerger,
    video: &Path,
    audio: Option<&Path>,
    announced_duration: Option<f64>,
    no_loop: bool,
    output: &Path,
) -> Result<()> {
    let Some(audio) = audio else {
        debug!("No audio stream, keeping the video as-is");
        return merger.remux(video, output);
    };

    let audio_duration = merger.probe_duration(audio)?;
    let plan = reconcile(announced_duration, audio_duration, no_loop);

    if plan.loop_video {
        info!("Looping... audio duration = {}", plan.target);
    }
    merger.merge(video, audio, &plan, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announced_duration_wins_and_never_loops() {
        let plan = reconcile(Some(5.0), 7.5, false);
        assert_eq!(plan, MergePlan { target: 5.0, loop_video: false });
    }

    #[test]
    fn announced_duration_overrides_the_no_loop_flag() {
        let plan = reconcile(Some(5.0), 7.5, true);
        assert_eq!(plan, MergePlan { target: 5.0, loop_video: false });
    }

    #[test]
    fn no_loop_trims_to_the_audio_duration() {
        // Video shorter than audio: it is cut, not repeated
        let plan = reconcile(None, 5.0, true);
        assert_eq!(plan, MergePlan { target: 5.0, loop_video: false });
    }

    #[test]
    fn default_is_to_loop_the_video_over_the_audio() {
        let plan = reconcile(None, 5.0, false);
        assert_eq!(plan, MergePlan { target: 5.0, loop_video: true });
    }
}

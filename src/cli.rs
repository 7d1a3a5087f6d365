use std::{fmt::Display, path::PathBuf};

use clap::{ArgGroup, Parser, ValueEnum};

/// How the media files of a clip are acquired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Follow the stream URLs of the embedded page payload
    #[default]
    Embedded,
    /// Fetch the pre-looped file behind the page share button (not implemented)
    Share,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Embedded => write!(f, "embedded"),
            Strategy::Share => write!(f, "share"),
        }
    }
}

macro_rules! arg_env {
    ($v:literal) => {
        concat!("COUBGRAB_", $v)
    };
}

/// Archiver tool for short looping web clips.
/// Download, merge, and loop video and audio streams.
#[derive(Parser, Debug)]
#[clap(group(ArgGroup::new("input").required(true)))]
pub struct Args {
    /// The ID or view URL of a single clip to download.
    /// The output file is written to the working directory.
    #[clap(long, group = "input", env = arg_env!("ID"))]
    pub id: Option<String>,

    /// A text file with one clip ID or view URL per line.
    /// Output files are written into a directory named after the file.
    #[clap(long, group = "input", env = arg_env!("FILE"))]
    pub file: Option<PathBuf>,

    /// Do not loop a short video to cover the full audio duration
    #[clap(long, env = arg_env!("NO_LOOP"))]
    pub no_loop: bool,

    /// Keep non-ASCII letters in output file names instead of
    /// transliterating them
    #[clap(long)]
    pub allow_unicode: bool,

    /// Keep the temporary stream files of a failed clip for inspection
    #[clap(long)]
    pub keep_temp: bool,

    /// How to acquire the media files
    #[clap(long, value_enum, default_value_t = Strategy::Embedded)]
    pub strategy: Strategy,

    /// Print debug information, including external command output
    #[clap(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn id_and_file_are_mutually_exclusive() {
        let res = Args::try_parse_from(["coubgrab", "--id", "2ck4sw", "--file", "list.txt"]);
        assert!(res.is_err());
    }

    #[test]
    fn one_input_mode_is_required() {
        let res = Args::try_parse_from(["coubgrab", "--no-loop"]);
        assert!(res.is_err());
    }

    #[test]
    fn flags_apply_to_both_modes() {
        let args = Args::try_parse_from(["coubgrab", "--id", "2ck4sw", "--no-loop"]).unwrap();
        assert!(args.no_loop);
        assert_eq!(args.strategy, Strategy::Embedded);
    }
}

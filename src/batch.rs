use std::{fmt::Display, fs, path::Path};

use miette::{miette, Context, IntoDiagnostic};
use tracing::{error, info};

use crate::{
    result::{Error, Result},
    types::ClipId,
    workflow::Workflow,
};

/// Outcome of a batch run: tally plus the itemized per-clip failures
#[derive(Debug, Default)]
pub struct BatchReport {
    pub success: usize,
    pub failures: Vec<(ClipId, Error)>,
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Successful downloads: {}", self.success)?;
        write!(f, "\nFailed downloads: {}", self.failures.len())?;
        for (id, err) in &self.failures {
            write!(f, "\n  {id}: {err}")?;
        }
        Ok(())
    }
}

/// Process every clip listed in the file, one per line, in file order.
///
/// Output files land in a directory named after the list file's stem,
/// created if missing. A failing clip is recorded and the run moves on
/// to the next line; the batch always completes.
pub fn run(list: &Path, workflow: &Workflow) -> Result<BatchReport> {
    let content = fs::read_to_string(list)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not read the list file {}", list.display()))?;

    let stem = list
        .file_stem()
        .ok_or_else(|| Error::Miette(miette!("List path has no file name")))?;
    let out_dir = Path::new(stem);
    fs::create_dir_all(out_dir)
        .into_diagnostic()
        .wrap_err("Could not create the output directory")?;

    let mut report = BatchReport::default();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let id = ClipId::parse(line);
        info!("Starting {id}");
        match workflow.process(&id, Some(out_dir)) {
            Ok(_) => report.success += 1,
            Err(err) => {
                error!("Clip {id} failed: {err}");
                report.failures.push((id, err));
            }
        }
    }

    Ok(report)
}

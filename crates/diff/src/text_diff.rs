use crate::config::DiffConfig;
use crate::diff_run::{diff_bounded, DiffRun, RunKind};
use crate::encoding::{encode, encode_chars, DecodingTable};
use crate::error::Result;
use crate::refine::{refine_with, RefinedRun};

/// Wrapper running encode, diff and refine in one go
pub struct TextDiff;

impl TextDiff {
    /// Diff two lists of lines with the default configuration
    pub fn lines<S: AsRef<str>>(old_lines: &[S], new_lines: &[S]) -> Result<LineDiff> {
        Self::lines_with_config(old_lines, new_lines, &DiffConfig::default())
    }

    /// Diff two lists of lines
    pub fn lines_with_config<S: AsRef<str>>(
        old_lines: &[S],
        new_lines: &[S],
        config: &DiffConfig,
    ) -> Result<LineDiff> {
        let old_lines: Vec<String> = old_lines.iter().map(|l| l.as_ref().to_owned()).collect();
        let new_lines: Vec<String> = new_lines.iter().map(|l| l.as_ref().to_owned()).collect();

        let encoding = encode(&old_lines, &new_lines)?;
        let runs = diff_bounded(&encoding.old, &encoding.new, config.max_edit_distance)?;

        let runs = if config.refine {
            refine_with(&runs, |symbols| encoding.table.join_lines(symbols), config)?
        } else {
            runs.into_iter().map(RefinedRun::Run).collect()
        };

        log::debug!(
            "line diff: {} -> {} lines, {} entries",
            old_lines.len(),
            new_lines.len(),
            runs.len()
        );

        Ok(LineDiff {
            runs,
            table: encoding.table,
            old_line_count: old_lines.len(),
            new_line_count: new_lines.len(),
        })
    }

    /// Diff two strings character by character, without refinement
    pub fn chars(old_text: &str, new_text: &str) -> Result<Vec<DiffRun>> {
        Self::chars_with_config(old_text, new_text, &DiffConfig::default())
    }

    pub fn chars_with_config(
        old_text: &str,
        new_text: &str,
        config: &DiffConfig,
    ) -> Result<Vec<DiffRun>> {
        diff_bounded(
            &encode_chars(old_text),
            &encode_chars(new_text),
            config.max_edit_distance,
        )
    }
}

/// A refined line diff together with the table needed to decode it
#[derive(Debug, Clone)]
pub struct LineDiff {
    runs: Vec<RefinedRun>,
    table: DecodingTable<String>,

    /// The number of lines in the old text
    pub old_line_count: usize,

    /// The number of lines in the new text
    pub new_line_count: usize,
}

impl LineDiff {
    /// Get the refined runs
    pub fn runs(&self) -> &[RefinedRun] {
        &self.runs
    }

    /// Get the decoding table of the line symbols
    pub fn table(&self) -> &DecodingTable<String> {
        &self.table
    }

    /// Decode the lines of a line-level run
    pub fn lines_of(&self, run: &DiffRun) -> Result<Vec<&str>> {
        Ok(self
            .table
            .decode(&run.symbols)?
            .into_iter()
            .map(String::as_str)
            .collect())
    }

    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        self.runs.iter().any(RefinedRun::has_changes)
    }

    /// Line counters over all runs
    pub fn stats(&self) -> DiffStats {
        DiffStats::from_runs(&self.runs)
    }
}

/// Line counters of a refined diff
///
/// Lines inside a modification count as both deleted and added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub unchanged_lines: usize,
    pub added_lines: usize,
    pub deleted_lines: usize,
    pub modified_runs: usize,
}

impl DiffStats {
    pub fn from_runs(runs: &[RefinedRun]) -> Self {
        let mut stats = Self::default();
        for run in runs {
            match run {
                RefinedRun::Run(run) => match run.kind {
                    RunKind::Equal => stats.unchanged_lines += run.len(),
                    RunKind::Insert => stats.added_lines += run.len(),
                    RunKind::Delete => stats.deleted_lines += run.len(),
                },
                RefinedRun::Modified(modified) => {
                    stats.added_lines += modified.inserted.len();
                    stats.deleted_lines += modified.deleted.len();
                    stats.modified_runs += 1;
                }
            }
        }
        stats
    }
}

#![allow(dead_code)]

use diff_engine::{decode_chars, DiffRun, LineDiff, RefinedRun, RunKind};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sigil(kind: RunKind) -> char {
    match kind {
        RunKind::Equal => '=',
        RunKind::Insert => '+',
        RunKind::Delete => '-',
    }
}

/// Render character runs on one line, e.g. `=[ab] -[c] +[d]`
pub fn render_chars(runs: &[DiffRun]) -> String {
    runs.iter()
        .map(|run| format!("{}[{}]", sigil(run.kind), decode_chars(&run.symbols).unwrap()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a refined line diff on one line; lines are joined with `,`
/// and modifications show their character runs in braces
pub fn render_lines(diff: &LineDiff) -> String {
    diff.runs()
        .iter()
        .map(|entry| match entry {
            RefinedRun::Run(run) => {
                format!("{}[{}]", sigil(run.kind), diff.lines_of(run).unwrap().join(","))
            }
            RefinedRun::Modified(modified) => format!("~{{{}}}", render_chars(&modified.sub_runs)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Old and new lines recovered from a refined diff
pub fn sides(diff: &LineDiff) -> (Vec<String>, Vec<String>) {
    let mut old = Vec::new();
    let mut new = Vec::new();
    for entry in diff.runs() {
        let (deleted, inserted): (Option<&DiffRun>, Option<&DiffRun>) = match entry {
            RefinedRun::Run(run) => match run.kind {
                RunKind::Equal => (Some(run), Some(run)),
                RunKind::Delete => (Some(run), None),
                RunKind::Insert => (None, Some(run)),
            },
            RefinedRun::Modified(modified) => (Some(&modified.deleted), Some(&modified.inserted)),
        };
        if let Some(run) = deleted {
            old.extend(diff.lines_of(run).unwrap().into_iter().map(str::to_owned));
        }
        if let Some(run) = inserted {
            new.extend(diff.lines_of(run).unwrap().into_iter().map(str::to_owned));
        }
    }
    (old, new)
}

/// Textbook O(NM) edit distance with insertions and deletions only
pub fn reference_distance<T: PartialEq>(old: &[T], new: &[T]) -> usize {
    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in 0..old.len() {
        for j in 0..new.len() {
            lcs[i + 1][j + 1] = if old[i] == new[j] {
                lcs[i][j] + 1
            } else {
                lcs[i][j + 1].max(lcs[i + 1][j])
            };
        }
    }
    old.len() + new.len() - 2 * lcs[old.len()][new.len()]
}

/// Number of symbols outside equal runs
pub fn changed_symbols(runs: &[DiffRun]) -> usize {
    runs.iter()
        .filter(|run| run.kind != RunKind::Equal)
        .map(DiffRun::len)
        .sum()
}

use anyhow::{Context, Result};
use diff_engine::{decode_chars, DiffConfig, RefinedRun, RunKind, TextDiff};

fn main() -> Result<()> {
    env_logger::init();

    let old = r#"fn main() {
    println!("Hello, world!");
    let total = 1 + 2;
}
"#;
    let new = r#"fn main() {
    // Add a greeting with name
    let name = "Rust";
    println!("Hello, {}!", name);
    let total = 1 + 3;
}
"#;

    // Splitting into lines is up to the caller
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();

    let config = DiffConfig::default().max_edit_distance(Some(10_000));
    let diff = TextDiff::lines_with_config(&old_lines, &new_lines, &config)
        .context("failed to diff the two versions")?;

    for entry in diff.runs() {
        match entry {
            RefinedRun::Run(run) => {
                let sign = match run.kind {
                    RunKind::Equal => " ",
                    RunKind::Insert => "+",
                    RunKind::Delete => "-",
                };
                for line in diff.lines_of(run)? {
                    println!("{}{}", sign, line);
                }
            }
            RefinedRun::Modified(modified) => {
                let mut rendered = String::new();
                for sub_run in &modified.sub_runs {
                    let text = decode_chars(&sub_run.symbols)?;
                    match sub_run.kind {
                        RunKind::Equal => rendered.push_str(&text),
                        RunKind::Insert => rendered.push_str(&format!("\x1b[32m{}\x1b[0m", text)),
                        RunKind::Delete => rendered.push_str(&format!("\x1b[31m{}\x1b[0m", text)),
                    }
                }
                for line in rendered.lines() {
                    println!("~{}", line);
                }
            }
        }
    }

    let stats = diff.stats();
    println!("\nDiff statistics:");
    println!("  Unchanged lines: {}", stats.unchanged_lines);
    println!("  Added lines: {}", stats.added_lines);
    println!("  Deleted lines: {}", stats.deleted_lines);
    println!("  Modified blocks: {}", stats.modified_runs);

    Ok(())
}

use anyhow::Result;
use diff_engine::{decode_chars, encode_chars, EditGraph, TextDiff};

fn main() -> Result<()> {
    env_logger::init();

    let pairs = [
        ("abcabba", "cbabac"),
        ("testing123", "testing456"),
        ("hello world", "hello wordl"),
    ];

    for (old, new) in pairs {
        let (a, b) = (encode_chars(old), encode_chars(new));
        let graph = EditGraph::solve(&a, &b, None)?;

        println!("{:?} -> {:?}: edit distance {}", old, new, graph.distance());
        let path: Vec<String> = graph
            .path()?
            .iter()
            .map(|v| format!("({},{})", v.x, v.y))
            .collect();
        println!("  path: {}", path.join(" "));

        for run in TextDiff::chars(old, new)? {
            println!("  {:<6} {:?}", run.kind.to_string(), decode_chars(&run.symbols)?);
        }
    }

    Ok(())
}

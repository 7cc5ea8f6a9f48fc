mod common;

use common::{init_logging, render_chars, render_lines};
use diff_engine::{
    diff, diff_bounded, encode, encode_chars, DiffConfig, DiffError, DiffRun, RefinedRun, TextDiff,
};
use pretty_assertions::assert_eq;

#[test]
fn test_both_empty() {
    // Two empty sequences give no runs at all
    assert_eq!(diff(&[], &[]).unwrap(), Vec::<DiffRun>::new());

    let diff = TextDiff::lines::<&str>(&[], &[]).unwrap();
    assert!(diff.runs().is_empty());
    assert!(!diff.has_changes());
}

#[test]
fn test_old_empty() {
    let new = encode_chars("added");
    assert_eq!(diff(&[], &new).unwrap(), vec![DiffRun::insert(new)]);
}

#[test]
fn test_new_empty() {
    let old = encode_chars("removed");
    assert_eq!(diff(&old, &[]).unwrap(), vec![DiffRun::delete(old)]);
}

#[test]
fn test_added_and_deleted_files() {
    let lines = ["Line 1", "Line 2"];

    let added = TextDiff::lines(&[], &lines).unwrap();
    assert_eq!(render_lines(&added), "+[Line 1,Line 2]");
    assert_eq!(added.stats().added_lines, 2);

    let deleted = TextDiff::lines(&lines, &[]).unwrap();
    assert_eq!(render_lines(&deleted), "-[Line 1,Line 2]");
    assert_eq!(deleted.stats().deleted_lines, 2);
}

#[test]
fn test_distance_ceiling() {
    let old = encode_chars("abcdef");
    let new = encode_chars("abXdeY");

    // two substitutions cost four edits
    assert_eq!(
        diff_bounded(&old, &new, Some(3)).unwrap_err(),
        DiffError::ScriptTooLong { limit: 3 }
    );
    assert_eq!(diff_bounded(&old, &new, Some(4)).unwrap(), diff(&old, &new).unwrap());
}

#[test]
fn test_ceiling_applies_to_refinement() {
    // the line diff needs two edits, the character diff of the pair needs 20
    let config = DiffConfig::default().max_edit_distance(Some(10));
    let err = TextDiff::lines_with_config(&["0123456789"], &["abcdefghij"], &config).unwrap_err();

    assert_eq!(err, DiffError::ScriptTooLong { limit: 10 });
}

#[test]
fn test_unicode_text() {
    let old = ["Line 1", "Line 2 🚀", "Line 3 😊"];
    let new = ["Line 1", "Line 2 🚀", "Line 3 🎉"];

    let diff = TextDiff::lines(&old, &new).unwrap();
    assert_eq!(render_lines(&diff), "=[Line 1,Line 2 🚀] ~{=[Line 3 ] -[😊] +[🎉]}");

    let modified = diff.runs()[1].as_modified().unwrap();
    assert_eq!(modified.old_text().unwrap(), "Line 3 😊");
    assert_eq!(modified.new_text().unwrap(), "Line 3 🎉");
}

#[test]
fn test_whitespace_changes_are_detected() {
    let runs = TextDiff::chars("Line 2", "Line  2").unwrap();
    assert_eq!(render_chars(&runs), "=[Line ] +[ ] =[2]");
}

#[test]
fn test_multiline_pair_is_joined_with_newlines() {
    let old = ["keep", "alpha one", "alpha two", "keep too"];
    let new = ["keep", "alpha 1", "alpha 2", "keep too"];

    let diff = TextDiff::lines(&old, &new).unwrap();
    let modified = diff.runs()[1].as_modified().unwrap();

    assert_eq!(modified.deleted.len(), 2);
    assert_eq!(modified.inserted.len(), 2);
    assert_eq!(modified.old_text().unwrap(), "alpha one\nalpha two");
    assert_eq!(modified.new_text().unwrap(), "alpha 1\nalpha 2");
}

#[test]
fn test_very_large_diff() {
    init_logging();
    let mut old = Vec::new();
    let mut new = Vec::new();

    // 1000 lines, every 10th one rewritten
    for i in 0..1000 {
        old.push(format!("Line {} of old text", i));
        if i % 10 == 0 {
            new.push(format!("MODIFIED Line {} of new text", i));
        } else {
            new.push(format!("Line {} of old text", i));
        }
    }

    let diff = TextDiff::lines(&old, &new).unwrap();
    let stats = diff.stats();

    assert_eq!(stats.unchanged_lines, 900);
    assert_eq!(stats.added_lines, 100);
    assert_eq!(stats.deleted_lines, 100);
    assert_eq!(common::sides(&diff), (old, new));
}

#[test]
fn test_recurring_lines() {
    let old = ["}", "}", "fn a() {", "}"];
    let new = ["}", "fn a() {", "}", "}"];

    let encoding = encode(&old, &new).unwrap();
    assert_eq!(encoding.table.len(), 2);

    let diff = TextDiff::lines(&old, &new).unwrap();
    assert_eq!(common::sides(&diff), (
        old.iter().map(|l| l.to_string()).collect(),
        new.iter().map(|l| l.to_string()).collect(),
    ));
    assert!(diff.runs().iter().all(|run| matches!(run, RefinedRun::Run(_))));
}

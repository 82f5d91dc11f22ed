//! End-to-end classification runs.

use classifier_core::{Classifier, RunStatus, StatsMode, TokenKind};

use crate::common::Workspace;

#[test]
fn test_mixed_input_is_split_per_kind() {
    let ws = Workspace::new();
    let input = ws.input(
        "in1.txt",
        "Lorem ipsum dolor sit amet\n45\nSome example\n3.1415\n  \n-0.001\n1234567890123456789\n",
    );

    let report = Classifier::new(ws.config(&[input], None, false, StatsMode::Full))
        .run()
        .unwrap();

    assert_eq!(ws.output("integers.txt").unwrap(), "45\n1234567890123456789\n");
    assert_eq!(ws.output("floats.txt").unwrap(), "3.1415\n-0.001\n");
    assert_eq!(
        ws.output("strings.txt").unwrap(),
        "Lorem ipsum dolor sit amet\nSome example\n"
    );

    assert_eq!(report.stats.count(TokenKind::Integer), 2);
    assert_eq!(report.stats.count(TokenKind::Float), 2);
    assert_eq!(report.stats.count(TokenKind::String), 7);
    assert_eq!(report.stats.strings().min_len(), Some(3));
    assert_eq!(report.stats.strings().max_len(), Some(7));
    assert_eq!(report.status(), RunStatus::Success);
}

#[test]
fn test_prefix_is_applied_to_every_file() {
    let ws = Workspace::new();
    let input = ws.input("in.txt", "1 2.0 three\n");

    Classifier::new(ws.config(&[input], Some("sample-"), false, StatsMode::None))
        .run()
        .unwrap();

    assert_eq!(ws.output("sample-integers.txt").unwrap(), "1\n");
    assert_eq!(ws.output("sample-floats.txt").unwrap(), "2.0\n");
    assert_eq!(ws.output("sample-strings.txt").unwrap(), "three\n");
    assert!(ws.output("integers.txt").is_none());
}

#[test]
fn test_only_needed_files_are_created() {
    let ws = Workspace::new();
    let input = ws.input("words.txt", "alpha beta\ngamma\n");

    let report = Classifier::new(ws.config(&[input], None, false, StatsMode::Simple))
        .run()
        .unwrap();

    assert!(ws.output("integers.txt").is_none());
    assert!(ws.output("floats.txt").is_none());
    assert_eq!(report.created, vec![ws.out_dir().join("strings.txt")]);
    let text = report.to_string();
    assert!(text.contains("    Strings: 3\n"));
    assert!(text.contains("    strings.txt\n"));
}

#[test]
fn test_all_inputs_missing_fails_the_run() {
    let ws = Workspace::new();
    let missing = ws.path().join("nope.txt");

    let report = Classifier::new(ws.config(&[missing], None, false, StatsMode::None))
        .run()
        .unwrap();

    assert_eq!(report.status(), RunStatus::Failed);
    assert!(!report.is_success());
    assert!(report.created.is_empty());
    assert!(report.to_string().contains("nope.txt: file not found"));
}

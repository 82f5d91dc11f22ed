//! Append versus overwrite behaviour across consecutive runs.

use classifier_core::{Classifier, StatsMode};

use crate::common::Workspace;

#[test]
fn test_second_run_overwrites_by_default() {
    let ws = Workspace::new();
    let first = ws.input("first.txt", "1\n");
    let second = ws.input("second.txt", "2\n");

    Classifier::new(ws.config(&[first], None, false, StatsMode::None))
        .run()
        .unwrap();
    Classifier::new(ws.config(&[second], None, false, StatsMode::None))
        .run()
        .unwrap();

    assert_eq!(ws.output("integers.txt").unwrap(), "2\n");
}

#[test]
fn test_second_run_appends_in_append_mode() {
    let ws = Workspace::new();
    let first = ws.input("first.txt", "1 a\n");
    let second = ws.input("second.txt", "2 b\n");

    Classifier::new(ws.config(&[first], None, true, StatsMode::None))
        .run()
        .unwrap();
    Classifier::new(ws.config(&[second], None, true, StatsMode::None))
        .run()
        .unwrap();

    assert_eq!(ws.output("integers.txt").unwrap(), "1\n2\n");
    assert_eq!(ws.output("strings.txt").unwrap(), "a\nb\n");
}

#[test]
fn test_untouched_kind_survives_overwrite_run() {
    let ws = Workspace::new();
    let first = ws.input("first.txt", "1.5\n");
    let second = ws.input("second.txt", "7\n");

    Classifier::new(ws.config(&[first], None, false, StatsMode::None))
        .run()
        .unwrap();
    Classifier::new(ws.config(&[second], None, false, StatsMode::None))
        .run()
        .unwrap();

    assert_eq!(ws.output("floats.txt").unwrap(), "1.5\n");
    assert_eq!(ws.output("integers.txt").unwrap(), "7\n");
}

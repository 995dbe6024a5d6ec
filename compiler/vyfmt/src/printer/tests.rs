#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn streams_are_separate() {
    let printer = Printer::new(Vec::new(), Vec::new());
    printer.out("x = 1\n");
    printer.err("reformatted a.vy");
    printer.err_raw("raw");

    let (out, err) = printer.into_inner();
    assert_eq!(String::from_utf8(out).unwrap(), "x = 1\n");
    assert_eq!(String::from_utf8(err).unwrap(), "reformatted a.vy\nraw");
}

#[test]
fn parallel_messages_stay_whole() {
    let printer = Printer::new(Vec::new(), Vec::new());
    std::thread::scope(|scope| {
        for i in 0..8 {
            let printer = &printer;
            scope.spawn(move || printer.err(&format!("message {i}")));
        }
    });

    let (_, err) = printer.into_inner();
    let err = String::from_utf8(err).unwrap();
    let mut lines: Vec<&str> = err.lines().collect();
    lines.sort_unstable();
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|line| line.starts_with("message ")));
}

use kinsoku::preview::print_preview;
use kinsoku::report::{print_report, report_lines};
use kinsoku::terminal::Terminal;
use kinsoku::{CheckError, LayoutConfig, Manuscript};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_manuscript(temp_dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("manuscript.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn report_lists_first_violation_per_paragraph_in_line_order() {
    let temp_dir = TempDir::new().unwrap();
    let contents = [
        "# 第一章".to_string(),
        "｜桜《さくら》が咲く".to_string(),
        "国".repeat(41),
        String::new(),
        format!("{}、{}", "文".repeat(40), "字".repeat(5)),
        "半角がabcある".to_string(),
    ]
    .join("\n");
    let path = write_manuscript(&temp_dir, &contents);

    let manuscript = Manuscript::load(&path).unwrap();
    let lines = report_lines(&manuscript, &LayoutConfig::default());
    assert_eq!(
        lines,
        vec![
            "L   3: [ShortFinalLine] final wrapped line 2 is only 2 columns wide (needs more than 6)",
            "L   5: [LineStartProhibited] 「、」 starts wrapped line 2",
            "L   6: [OddHalfWidth] wrapped line 1 has 3 half-width characters near: 半角がabcある...",
        ]
    );
}

#[test]
fn print_report_writes_lines_to_the_terminal() {
    let manuscript = Manuscript::from_text("abc\nabcd\n");
    let mut terminal = Terminal::new(Vec::new());
    print_report(&mut terminal, &manuscript, &LayoutConfig::default()).unwrap();
    let output = String::from_utf8(terminal.into_inner()).unwrap();
    assert_eq!(
        output,
        "L   1: [OddHalfWidth] wrapped line 1 has 3 half-width characters near: abc...\n"
    );
}

#[test]
fn overlapping_spans_do_not_stop_later_paragraphs() {
    use kinsoku::annotator::{Annotation, RubySpan};
    use kinsoku::paragraph::Paragraph;

    let annotation = Annotation {
        text: "漢字仮名".chars().collect(),
        spans: vec![
            RubySpan {
                start: 0,
                end: 2,
                ruby_width: 3,
            },
            RubySpan {
                start: 1,
                end: 3,
                ruby_width: 3,
            },
        ],
    };
    let err = Paragraph::new(4, annotation).unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(
        kinsoku::report::format_error(4, &err),
        "L   4: [Error] ruby spans overlap on line 4: [0..=2] (ruby 3) and [1..=3] (ruby 3)"
    );
}

#[test]
fn preview_renders_every_paragraph() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_manuscript(&temp_dir, "一行目\n\n三行目です");
    let manuscript = Manuscript::load(&path).unwrap();
    let config = LayoutConfig {
        max_width: 12,
        ..LayoutConfig::default()
    };

    let mut terminal = Terminal::new(Vec::new());
    print_preview(&mut terminal, &manuscript, &config).unwrap();
    let output = String::from_utf8(terminal.into_inner()).unwrap();
    assert_eq!(
        output,
        [
            "     +------------+",
            "   1 |一行目      |",
            "   2 |            |",
            "   3 |三行目です  |",
            "     +------------+",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn missing_file_is_reported_distinctly() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.txt");
    match Manuscript::load(&missing) {
        Err(CheckError::FileNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

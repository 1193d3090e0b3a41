use pretty_assertions::assert_eq;
use sharc_report::*;

// Helper building a one-file source map
fn sources(text: &str) -> (SourceMap, FileId) {
    let mut map = SourceMap::new();
    let id = map.add("main.shd", text);
    (map, id)
}

// Helper: expected output as lines, with the trailing newline
fn lines(expected: &[&str]) -> String {
    let mut out = expected.join("\n");
    out.push('\n');
    out
}

// ═══════════════════════════════════════════════════════════════════════
// Header and Location
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_render_spanless_report() {
    let report = ReportKind::ArgumentParserError
        .title("'--file' may only be used once")
        .with_note("(Run with --help for usage information)");
    let rendered = Renderer::new().render(&report, &SourceMap::new());
    assert_eq!(
        rendered,
        lines(&[
            "fatal[argument-parser-error]: '--file' may only be used once",
            "  = note: (Run with --help for usage information)",
        ])
    );
}

#[test]
fn test_render_with_span_and_context() {
    let (map, file) = sources("let s = \"abc\nlet t = 1\n");
    let report = ReportKind::UnterminatedStringLiteral
        .title("string literal is missing a closing quote")
        .with_span(Span::new(file, 8, 12))
        .with_label("started here");
    let rendered = Renderer::new().render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[unterminated-string-literal]: string literal is missing a closing quote",
            " --> main.shd:1:9",
            "  |",
            "1 | let s = \"abc",
            "  |         ^^^^ started here",
        ])
    );
}

#[test]
fn test_render_without_context_drops_snippet_only() {
    let (map, file) = sources("let s = \"abc\n");
    let report = ReportKind::UnterminatedStringLiteral
        .title("string literal is missing a closing quote")
        .with_span(Span::new(file, 8, 12))
        .with_help("add a closing `\"`");
    let renderer = Renderer {
        color: false,
        context: false,
    };
    let rendered = renderer.render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[unterminated-string-literal]: string literal is missing a closing quote",
            " --> main.shd:1:9",
            "  = help: add a closing `\"`",
        ])
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Underline Placement
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_underline_on_later_line() {
    let (map, file) = sources("fn main() {\n    ret $ 1;\n}\n");
    // span over the `$`
    let report = ReportKind::UnexpectedCharacter
        .title("unexpected character `$`")
        .with_span(Span::new(file, 20, 21));
    let rendered = Renderer::new().render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[unexpected-character]: unexpected character `$`",
            " --> main.shd:2:9",
            "  |",
            "2 |     ret $ 1;",
            "  |         ^",
        ])
    );
}

#[test]
fn test_multiline_span_clamps_to_first_line() {
    let (map, file) = sources("abc\ndef\n");
    let report = ReportKind::UnterminatedBlockComment
        .title("block comment never closed")
        .with_span(Span::new(file, 1, 7));
    let rendered = Renderer::new().render(&report, &map);
    // underline covers `bc`, nothing spills onto line 2
    assert_eq!(
        rendered,
        lines(&[
            "error[unterminated-block-comment]: block comment never closed",
            " --> main.shd:1:2",
            "  |",
            "1 | abc",
            "  |  ^^",
        ])
    );
}

#[test]
fn test_point_span_gets_one_caret() {
    let (map, file) = sources("abc");
    let report = ReportKind::UnexpectedCharacter
        .title("caret at end")
        .with_span(Span::point(file, 3));
    let rendered = Renderer::new().render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[unexpected-character]: caret at end",
            " --> main.shd:1:4",
            "  |",
            "1 | abc",
            "  |    ^",
        ])
    );
}

#[test]
fn test_mid_char_span_snaps_to_boundary() {
    // byte 1 is inside the two-byte 'é'; rendering must not panic and the
    // caret lands on the character the offset falls within
    let (map, file) = sources("é = 1\n");
    let report = ReportKind::UnexpectedCharacter
        .title("span into a multi-byte character")
        .with_span(Span::new(file, 1, 2));
    let rendered = Renderer::new().render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[unexpected-character]: span into a multi-byte character",
            " --> main.shd:1:1",
            "  |",
            "1 | é = 1",
            "  | ^",
        ])
    );
}

#[test]
fn test_wide_gutter_for_double_digit_lines() {
    let text = "x\n".repeat(11) + "bad line\n";
    let (map, file) = sources(&text);
    let report = ReportKind::UnexpectedCharacter
        .title("something on line 12")
        .with_span(Span::new(file, 22, 25));
    let rendered = Renderer::new().render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[unexpected-character]: something on line 12",
            "  --> main.shd:12:1",
            "   |",
            "12 | bad line",
            "   | ^^^",
        ])
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Notes, Help, and Color
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_notes_and_help_follow_snippet() {
    let (map, file) = sources("''\n");
    let report = ReportKind::EmptyCharLiteral
        .title("empty character literal")
        .with_span(Span::new(file, 0, 2))
        .with_note("a character literal holds exactly one character")
        .with_help("did you mean an empty string `\"\"`?");
    let rendered = Renderer::new().render(&report, &map);
    assert_eq!(
        rendered,
        lines(&[
            "error[empty-char-literal]: empty character literal",
            " --> main.shd:1:1",
            "  |",
            "1 | ''",
            "  | ^^",
            "  = note: a character literal holds exactly one character",
            "  = help: did you mean an empty string `\"\"`?",
        ])
    );
}

#[test]
fn test_color_output_contains_escapes_plain_does_not() {
    let (map, file) = sources("bad\n");
    let report = ReportKind::UnexpectedCharacter
        .title("colorful")
        .with_span(Span::new(file, 0, 3));

    let plain = Renderer::new().render(&report, &map);
    assert!(!plain.contains('\x1b'));

    let colored = Renderer {
        color: true,
        context: true,
    }
    .render(&report, &map);
    assert!(colored.contains("\x1b[31m"));
    assert!(colored.contains("\x1b[1m"));
    assert!(colored.ends_with('\n'));
}

#[test]
fn test_unregistered_file_falls_back_to_header() {
    // a span whose file is not in this map renders like a spanless report
    let (_other_map, file) = sources("abc");
    let report = ReportKind::UnexpectedCharacter
        .title("orphan span")
        .with_span(Span::new(file, 0, 1))
        .with_note("still printed");
    let rendered = Renderer::new().render(&report, &SourceMap::new());
    assert_eq!(
        rendered,
        lines(&[
            "error[unexpected-character]: orphan span",
            "  = note: still printed",
        ])
    );
}

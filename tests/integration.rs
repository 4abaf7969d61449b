//! Integration tests for the layout pipeline.
//!
//! These tests exercise the full path from a node tree to recorded draw
//! commands. They verify:
//! - block spacing (paragraphs, headings, rules) moves the cursor by the
//!   configured margins
//! - inline styles (bold, italic, super/subscript) override and restore
//!   the active style
//! - line wrapping never crosses the surface's right edge
//! - a pass fails loudly on unsupported or malformed nodes

use textflow::font::metrics;
use textflow::{
    layout, layout_json, DrawCommand, LayoutEngine, LayoutError, Node, NodeKind, Options, Point,
    Recorder, Rect, Tag,
};

// ─── Helpers ────────────────────────────────────────────────────

fn p(children: Vec<Node>) -> Node {
    Node::element(Tag::Paragraph, children)
}

fn p_text(content: &str) -> Node {
    p(vec![Node::text(content)])
}

fn doc(children: Vec<Node>) -> Node {
    Node::document(children)
}

fn wide_bounds() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 400.0)
}

fn run_layout(root: &Node) -> (Recorder, Point, Result<(), LayoutError>) {
    let mut rec = Recorder::new(wide_bounds());
    let (at, result) = layout(&mut rec, root);
    (rec, at, result)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ─── Single runs ────────────────────────────────────────────────

#[test]
fn test_single_run_fits_unwrapped() {
    let (rec, end, result) = run_layout(&doc(vec![Node::text("Hello world!")]));
    result.unwrap();

    assert_eq!(rec.texts(), vec!["Hello world!"]);
    let (style, at, _) = rec.text_runs().next().unwrap();
    assert_eq!(at, Point::new(0.0, 400.0));
    assert_eq!(style.font.family, "Helvetica");
    assert_eq!(style.font.size, 12.0);

    assert_eq!(
        end.x,
        metrics::string_width("Helvetica", "Hello world!", 12.0),
        "cursor advances by the measured width"
    );
    assert_eq!(end.y, 400.0, "an unwrapped run moves nothing vertically");
}

#[test]
fn test_paragraph_spacing_below() {
    let (_, end, result) = run_layout(&doc(vec![p_text("Hello world!")]));
    result.unwrap();
    let opts = Options::default();
    // One line of text plus the bottom margin, measured from the top.
    let expected = 400.0 - opts.font_size * (1.0 + opts.p_margin_bottom);
    assert!(approx(end.y, expected));
    assert_eq!(end.x, 0.0, "a paragraph leaves the cursor at the left edge");
}

// ─── Wrapping ───────────────────────────────────────────────────

#[test]
fn test_wide_paragraph_wraps() {
    let bounds = Rect::new(0.0, 0.0, 150.0, 400.0);
    let mut rec = Recorder::new(bounds);
    let (_, result) = layout(
        &mut rec,
        &doc(vec![p_text(
            "a paragraph whose text is considerably wider than the surface it lands on",
        )]),
    );
    result.unwrap();

    let runs: Vec<_> = rec.text_runs().collect();
    assert!(runs.len() >= 2, "must wrap into multiple lines");
    for (style, _, text) in &runs {
        assert!(!text.starts_with(' '), "line '{text}' keeps a leading space");
        assert!(
            metrics::string_width(&style.font.family, text, style.font.size) <= bounds.width(),
            "line '{text}' crosses the right edge"
        );
    }
    // Each wrap steps down one line height.
    for pair in runs.windows(2) {
        assert!(approx(pair[0].1.y - pair[1].1.y, 12.0));
        assert_eq!(pair[1].1.x, 0.0, "wrapped lines start at the left edge");
    }
}

#[test]
fn test_wrap_disabled_ignores_width() {
    let engine = LayoutEngine::new(Options {
        wrap_lines: false,
        ..Options::default()
    });
    let mut rec = Recorder::new(Rect::new(0.0, 0.0, 50.0, 400.0));
    let (_, result) = engine.layout(
        &mut rec,
        &doc(vec![p_text("far wider than fifty points of surface")]),
    );
    result.unwrap();
    assert_eq!(rec.texts(), vec!["far wider than fifty points of surface"]);
}

// ─── Headings ───────────────────────────────────────────────────

#[test]
fn test_heading_scale_bold_and_restore() {
    let (rec, _, result) = run_layout(&doc(vec![
        Node::element(Tag::H1, vec![Node::text("Title")]),
        p_text("Body"),
    ]));
    result.unwrap();

    let runs: Vec<_> = rec.text_runs().collect();
    assert_eq!(runs.len(), 2);

    let (title_style, title_at, title) = runs[0];
    assert_eq!(title, "Title");
    assert_eq!(title_style.font.family, "Helvetica-Bold");
    assert_eq!(title_style.font.size, 24.0, "h1 doubles the base size");

    let (body_style, body_at, _) = runs[1];
    assert_eq!(
        body_style.font.family, "Helvetica",
        "family restored after the heading"
    );
    assert_eq!(body_style.font.size, 12.0, "size restored after the heading");

    // Two-stage heading bottom margin plus the paragraph's top margin.
    let opts = Options::default();
    let h1 = opts.headings[0];
    let gap = opts.font_size * h1.scale * h1.margin_bottom
        + opts.font_size * h1.margin_bottom
        + opts.font_size * opts.p_margin_top;
    assert!(approx(title_at.y - body_at.y, gap));
}

#[test]
fn test_h6_is_not_bold_by_default() {
    let (rec, _, result) = run_layout(&doc(vec![Node::element(
        Tag::H6,
        vec![Node::text("small heading")],
    )]));
    result.unwrap();
    let (style, _, _) = rec.text_runs().next().unwrap();
    assert_eq!(style.font.family, "Helvetica");
    assert_eq!(style.font.size, 12.0);
}

#[test]
fn test_heading_margin_top_moves_cursor() {
    let (rec, _, result) = run_layout(&doc(vec![Node::element(
        Tag::H2,
        vec![Node::text("Section")],
    )]));
    result.unwrap();
    let (_, at, _) = rec.text_runs().next().unwrap();
    let opts = Options::default();
    assert!(approx(
        at.y,
        400.0 - opts.font_size * opts.headings[1].margin_top
    ));
}

// ─── Inline styles ──────────────────────────────────────────────

#[test]
fn test_bold_and_italic_swap_family_inline() {
    let (rec, _, result) = run_layout(&doc(vec![p(vec![
        Node::text("plain "),
        Node::element(Tag::Bold, vec![Node::text("bold")]),
        Node::element(Tag::Italic, vec![Node::text("italic")]),
        Node::text(" plain"),
    ])]));
    result.unwrap();

    let runs: Vec<_> = rec.text_runs().collect();
    let families: Vec<&str> = runs
        .iter()
        .map(|(style, _, _)| style.font.family.as_str())
        .collect();
    assert_eq!(
        families,
        vec![
            "Helvetica",
            "Helvetica-Bold",
            "Helvetica-Oblique",
            "Helvetica"
        ]
    );
    // All on the same line, left to right.
    for pair in runs.windows(2) {
        assert_eq!(pair[0].1.y, pair[1].1.y);
        assert!(pair[0].1.x < pair[1].1.x);
    }
}

#[test]
fn test_superscript_scales_shifts_and_resumes() {
    let (rec, _, result) = run_layout(&doc(vec![p(vec![
        Node::text("H"),
        Node::element(Tag::Superscript, vec![Node::text("2")]),
        Node::text("O"),
    ])]));
    result.unwrap();

    let runs: Vec<_> = rec.text_runs().collect();
    assert_eq!(runs.len(), 3);
    let opts = Options::default();
    let small = opts.font_size * opts.super_sub_scale;

    let (h_style, h_at, _) = runs[0];
    let (two_style, two_at, _) = runs[1];
    let (o_style, o_at, _) = runs[2];

    assert_eq!(h_style.font.size, 12.0);
    assert!(approx(two_style.font.size, small), "superscript is scaled");
    assert!(
        approx(two_at.y, h_at.y + small * opts.superscript_position),
        "superscript baseline is raised by a fraction of the scaled size"
    );
    assert_eq!(o_style.font.size, 12.0, "size resumes after the scope");
    assert!(approx(o_at.y, h_at.y), "baseline resumes after the scope");
    assert!(approx(
        o_at.x,
        two_at.x + metrics::string_width("Helvetica", "2", small)
    ));
}

#[test]
fn test_subscript_drops_below_baseline() {
    let (rec, _, result) = run_layout(&doc(vec![p(vec![
        Node::text("x"),
        Node::element(Tag::Subscript, vec![Node::text("1")]),
    ])]));
    result.unwrap();

    let runs: Vec<_> = rec.text_runs().collect();
    let opts = Options::default();
    let small = opts.font_size * opts.super_sub_scale;
    assert!(
        approx(runs[1].1.y, runs[0].1.y + small * opts.subscript_position),
        "subscript baseline drops below the line"
    );
    assert!(runs[1].1.y < runs[0].1.y);
}

// ─── Rules ──────────────────────────────────────────────────────

#[test]
fn test_rule_spans_surface_with_margins() {
    let (rec, _, result) = run_layout(&doc(vec![
        p_text("above"),
        Node::element(Tag::Rule, vec![]),
        p_text("below"),
    ]));
    result.unwrap();

    let opts = Options::default();
    let rule = rec
        .commands
        .iter()
        .find_map(|cmd| match cmd {
            DrawCommand::Rule { style, from, to } => Some((style, from, to)),
            _ => None,
        })
        .expect("a rule must be stroked");

    let (style, from, to) = rule;
    assert_eq!(from.x, 0.0);
    assert_eq!(to.x, 400.0);
    assert_eq!(from.y, to.y, "a rule is horizontal");
    assert!(approx(style.width, opts.font_size * opts.hr_scale));

    // The rule sits hr_margin_top below the paragraph above it, and the
    // paragraph below starts hr_margin_bottom further down.
    let after_first_p = 400.0 - opts.font_size * (1.0 + opts.p_margin_bottom);
    assert!(approx(from.y, after_first_p - opts.font_size * opts.hr_margin_top));
    let below_at = rec
        .text_runs()
        .find(|(_, _, text)| *text == "below")
        .map(|(_, at, _)| at)
        .expect("paragraph below the rule");
    assert!(approx(
        below_at.y,
        from.y - opts.font_size * opts.hr_margin_bottom
    ));
}

// ─── Containers and passthrough ─────────────────────────────────

#[test]
fn test_container_wrappers_are_transparent() {
    let bare = run_layout(&doc(vec![p_text("content")]));
    let wrapped = run_layout(&doc(vec![Node::element(
        Tag::Container,
        vec![Node::element(Tag::Container, vec![p_text("content")])],
    )]));
    bare.2.unwrap();
    wrapped.2.unwrap();
    assert_eq!(bare.0.commands, wrapped.0.commands);
    assert_eq!(bare.1, wrapped.1);
}

// ─── Failure paths ──────────────────────────────────────────────

#[test]
fn test_unsupported_tag_fails_and_stops() {
    let (rec, at, result) = run_layout(&doc(vec![
        p_text("before"),
        Node::element(Tag::from_name("table"), vec![p_text("inside")]),
        p_text("after"),
    ]));

    assert_eq!(
        result.unwrap_err(),
        LayoutError::UnsupportedElement {
            tag: "table".to_string()
        }
    );
    assert_eq!(
        rec.texts(),
        vec!["before"],
        "nothing after the failure point may be drawn"
    );
    // The cursor is reported where the pass stopped.
    let opts = Options::default();
    assert!(approx(
        at.y,
        400.0 - opts.font_size * (1.0 + opts.p_margin_bottom)
    ));
}

#[test]
fn test_parser_error_marker_fails_pass() {
    let (rec, _, result) = run_layout(&doc(vec![Node {
        kind: NodeKind::Error {
            reason: "unclosed element".to_string(),
        },
        children: vec![],
    }]));
    assert_eq!(
        result.unwrap_err(),
        LayoutError::MalformedInput {
            reason: "unclosed element".to_string()
        }
    );
    assert!(rec.commands.is_empty());
}

#[test]
fn test_unresolvable_bold_face_fails_heading() {
    let engine = LayoutEngine::new(Options {
        bold_font: "NoSuchFace".to_string(),
        ..Options::default()
    });
    let mut rec = Recorder::new(wide_bounds());
    let (_, result) = engine.layout(
        &mut rec,
        &doc(vec![Node::element(Tag::H1, vec![Node::text("Title")])]),
    );
    assert_eq!(
        result.unwrap_err(),
        LayoutError::FontResolution {
            name: "NoSuchFace".to_string()
        }
    );
    assert!(rec.commands.is_empty(), "the heading body must not run");
}

// ─── Whole documents ────────────────────────────────────────────

#[test]
fn test_cursor_y_is_monotonic_over_a_document() {
    let bounds = Rect::new(0.0, 0.0, 180.0, 600.0);
    let mut rec = Recorder::new(bounds);
    let (end, result) = layout(
        &mut rec,
        &doc(vec![
            Node::element(Tag::H1, vec![Node::text("Report")]),
            p_text("a first paragraph long enough to wrap onto several lines of the narrow surface"),
            Node::element(Tag::Rule, vec![]),
            Node::element(Tag::H2, vec![Node::text("Details")]),
            p_text("and a second paragraph that wraps as well, just to be sure"),
        ]),
    );
    result.unwrap();

    let ys: Vec<f64> = rec.text_runs().map(|(_, at, _)| at.y).collect();
    assert!(ys.len() >= 6);
    for pair in ys.windows(2) {
        assert!(pair[0] >= pair[1], "text must flow strictly downward");
    }
    assert!(end.y < ys[ys.len() - 1]);
}

#[test]
fn test_same_engine_reproduces_identical_passes() {
    let engine = LayoutEngine::new(Options::default());
    let tree = doc(vec![
        Node::element(Tag::H3, vec![Node::text("Twice")]),
        p_text("layout is deterministic and pure with respect to its inputs"),
    ]);

    let mut first = Recorder::new(wide_bounds());
    let mut second = Recorder::new(wide_bounds());
    let (end_a, res_a) = engine.layout(&mut first, &tree);
    let (end_b, res_b) = engine.layout(&mut second, &tree);
    res_a.unwrap();
    res_b.unwrap();
    assert_eq!(end_a, end_b);
    assert_eq!(first.commands, second.commands);
}

#[test]
fn test_consumed_height_from_final_cursor() {
    let (_, end, result) = run_layout(&doc(vec![p_text("one line")]));
    result.unwrap();
    let consumed = 400.0 - end.y;
    let opts = Options::default();
    assert!(approx(consumed, opts.font_size * (1.0 + opts.p_margin_bottom)));
}

#[test]
fn test_json_tree_end_to_end() {
    let json = r#"{
        "kind": { "type": "Document" },
        "children": [
            {
                "kind": { "type": "Element", "tag": "h1" },
                "children": [ { "kind": { "type": "Text", "content": "Title" } } ]
            },
            {
                "kind": { "type": "Element", "tag": "p" },
                "children": [
                    { "kind": { "type": "Text", "content": "Water is H" } },
                    {
                        "kind": { "type": "Element", "tag": "sub" },
                        "children": [ { "kind": { "type": "Text", "content": "2" } } ]
                    },
                    { "kind": { "type": "Text", "content": "O." } }
                ]
            }
        ]
    }"#;
    let mut rec = Recorder::new(wide_bounds());
    let end = layout_json(&mut rec, json).unwrap();
    assert_eq!(rec.texts(), vec!["Title", "Water is H", "2", "O."]);
    assert!(end.y < 400.0);
}

#[test]
fn test_json_garbage_is_malformed_input() {
    let mut rec = Recorder::new(wide_bounds());
    let err = layout_json(&mut rec, "][").unwrap_err();
    assert!(matches!(err, LayoutError::MalformedInput { .. }));
    assert!(rec.commands.is_empty());
}

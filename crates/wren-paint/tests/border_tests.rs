//! Integration tests for border, outline and background painting.

use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;
use wren_paint::{
    BorderEdge, BorderPaintOptions, BorderStyle, BoxBorderPainter, BoxDecoration, BoxStrut, Color,
    CornerRadii, DisplayCommand, DisplayList, FillRule, Outline, PathVerb, Painter, RectF,
};

const NO_FAST_PATH: BorderPaintOptions = BorderPaintOptions {
    allow_fast_path: false,
};

/// Helper: the same edge on all four sides.
fn uniform(width: f32, color: Color, style: BorderStyle) -> [BorderEdge; 4] {
    [BorderEdge::new(width, color, style); 4]
}

/// Helper: paint a 100x100 border at the origin into a fresh display list.
fn paint(edges: [BorderEdge; 4], radii: CornerRadii, options: BorderPaintOptions) -> DisplayList {
    let mut list = DisplayList::new();
    BoxBorderPainter::new(RectF::new(0.0, 0.0, 100.0, 100.0), edges, radii)
        .with_options(options)
        .paint(&mut list);
    list
}

/// Helper: colors of every drawing command, in order.
fn drawn_colors(list: &DisplayList) -> Vec<Color> {
    list.commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillRect { color, .. }
            | DisplayCommand::FillRoundedRect { color, .. }
            | DisplayCommand::FillDRRect { color, .. }
            | DisplayCommand::FillPath { color, .. }
            | DisplayCommand::StrokeRect { color, .. }
            | DisplayCommand::StrokePath { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

/// Helper: save/restore and layer pairs nest properly.
fn is_balanced(list: &DisplayList) -> bool {
    let mut stack = Vec::new();
    for command in list.commands() {
        match command {
            DisplayCommand::Save | DisplayCommand::BeginLayer { .. } => stack.push(command),
            DisplayCommand::Restore => {
                if !matches!(stack.pop(), Some(DisplayCommand::Save)) {
                    return false;
                }
            }
            DisplayCommand::EndLayer => {
                if !matches!(stack.pop(), Some(DisplayCommand::BeginLayer { .. })) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

// ---------------------------------------------------------------------------
// Fast path
// ---------------------------------------------------------------------------

#[test]
fn test_uniform_solid_border_is_one_stroke() {
    let list = paint(
        uniform(5.0, Color::BLACK, BorderStyle::Solid),
        CornerRadii::default(),
        BorderPaintOptions::default(),
    );
    assert_eq!(
        list.commands(),
        &[DisplayCommand::StrokeRect {
            rect: RectF::new(2.5, 2.5, 95.0, 95.0),
            thickness: 5.0,
            color: Color::BLACK,
            antialias: true,
        }]
    );
}

#[test]
fn test_uneven_solid_border_is_one_donut() {
    let mut edges = uniform(5.0, Color::BLACK, BorderStyle::Solid);
    edges[0] = BorderEdge::new(10.0, Color::BLACK, BorderStyle::Solid);
    let list = paint(edges, CornerRadii::default(), BorderPaintOptions::default());
    match list.commands() {
        [DisplayCommand::FillDRRect { outer, inner, .. }] => {
            assert_eq!(outer.rect, RectF::new(0.0, 0.0, 100.0, 100.0));
            assert_eq!(inner.rect, RectF::new(5.0, 10.0, 90.0, 85.0));
        }
        other => panic!("expected one donut fill, got {other:?}"),
    }
}

#[test]
fn test_rounded_solid_border_is_one_donut() {
    let list = paint(
        uniform(4.0, Color::BLACK, BorderStyle::Solid),
        CornerRadii::uniform(12.0),
        BorderPaintOptions::default(),
    );
    assert!(matches!(list.commands(), [DisplayCommand::FillDRRect { .. }]));
}

#[test]
fn test_double_border_is_two_donuts() {
    let list = paint(
        uniform(9.0, Color::BLACK, BorderStyle::Double),
        CornerRadii::default(),
        BorderPaintOptions::default(),
    );
    let donuts: Vec<(RectF, RectF)> = list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillDRRect { outer, inner, .. } => Some((outer.rect, inner.rect)),
            _ => None,
        })
        .collect();
    assert_eq!(
        donuts,
        vec![
            (
                RectF::new(0.0, 0.0, 100.0, 100.0),
                RectF::new(3.0, 3.0, 94.0, 94.0)
            ),
            (
                RectF::new(6.0, 6.0, 88.0, 88.0),
                RectF::new(9.0, 9.0, 82.0, 82.0)
            ),
        ]
    );
}

#[test]
fn test_translucent_partial_border_is_one_path() {
    let translucent = Color::rgba(0, 0, 255, 128);
    let mut edges = uniform(4.0, translucent, BorderStyle::Solid);
    edges[1] = BorderEdge::new(0.0, translucent, BorderStyle::None);
    let list = paint(edges, CornerRadii::default(), BorderPaintOptions::default());

    assert_eq!(list.layer_count(), 0);
    match list.commands() {
        [DisplayCommand::FillPath { path, color, .. }] => {
            assert_eq!(*color, translucent);
            assert_eq!(path.fill_rule(), FillRule::NonZero);
            let contours = path
                .verbs()
                .iter()
                .filter(|verb| matches!(verb, PathVerb::MoveTo { .. }))
                .count();
            assert_eq!(contours, 3, "one rectangle per visible side");
        }
        other => panic!("expected one path fill, got {other:?}"),
    }
}

#[test]
fn test_no_visible_edges_paints_nothing() {
    let list = paint(
        uniform(5.0, Color::TRANSPARENT, BorderStyle::Solid),
        CornerRadii::default(),
        BorderPaintOptions::default(),
    );
    assert!(list.is_empty());

    let list = paint(
        uniform(5.0, Color::BLACK, BorderStyle::Hidden),
        CornerRadii::default(),
        NO_FAST_PATH,
    );
    assert!(list.is_empty());
}

// ---------------------------------------------------------------------------
// Per-side painting
// ---------------------------------------------------------------------------

#[test]
fn test_uniform_solid_without_fast_path_uses_no_clips() {
    let list = paint(
        uniform(5.0, Color::BLACK, BorderStyle::Solid),
        CornerRadii::default(),
        NO_FAST_PATH,
    );
    assert_eq!(list.clip_count(), 0, "overdraw handles same-color corners");
    let rects: Vec<RectF> = list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect();
    // Top and bottom first so the sides sharing their corners paint last.
    assert_eq!(
        rects,
        vec![
            RectF::new(0.0, 0.0, 100.0, 5.0),
            RectF::new(0.0, 95.0, 100.0, 5.0),
            RectF::new(95.0, 0.0, 5.0, 100.0),
            RectF::new(0.0, 0.0, 5.0, 100.0),
        ]
    );
}

#[test]
fn test_thin_double_matches_solid() {
    for options in [BorderPaintOptions::default(), NO_FAST_PATH] {
        let double = paint(
            uniform(2.0, Color::BLACK, BorderStyle::Double),
            CornerRadii::default(),
            options,
        );
        let solid = paint(
            uniform(2.0, Color::BLACK, BorderStyle::Solid),
            CornerRadii::default(),
            options,
        );
        assert_eq!(double, solid);
    }
}

#[test]
fn test_translucent_groups_nest_in_layers() {
    let mut edges = [BorderEdge::default(); 4];
    edges[0] = BorderEdge::new(4.0, Color::rgba(0, 0, 0, 255), BorderStyle::Solid);
    edges[1] = BorderEdge::new(4.0, Color::rgba(0, 0, 0, 64), BorderStyle::Solid);
    edges[2] = BorderEdge::new(4.0, Color::rgba(0, 0, 0, 128), BorderStyle::Solid);
    edges[3] = BorderEdge::new(4.0, Color::rgba(0, 0, 0, 64), BorderStyle::Solid);
    let list = paint(edges, CornerRadii::default(), BorderPaintOptions::default());

    assert_eq!(list.layer_count(), 1);
    assert!(is_balanced(&list));

    let commands = list.commands();
    match commands.first() {
        Some(DisplayCommand::BeginLayer { opacity }) => {
            assert!((opacity - 128.0 / 255.0).abs() < 1e-4, "layer opacity {opacity}");
        }
        other => panic!("expected the bottom side's layer first, got {other:?}"),
    }
    // Right and left paint first, inside the layer, at half of its opacity.
    assert!(matches!(commands[1], DisplayCommand::FillRect { rect, .. } if (rect.x - 96.0).abs() < 0.5));
    assert!(matches!(commands[2], DisplayCommand::FillRect { rect, .. } if rect.x.abs() < 0.5));
    let colors = drawn_colors(&list);
    assert!((127..=128).contains(&colors[0].a), "right alpha {}", colors[0].a);
    assert!((127..=128).contains(&colors[1].a), "left alpha {}", colors[1].a);
    // Bottom paints opaque inside its layer, then the layer closes.
    assert!(matches!(commands[3], DisplayCommand::FillPath { .. }));
    assert_eq!(colors[2].a, 255);
    assert_eq!(commands[4], DisplayCommand::EndLayer);
    // Top paints last, outside any layer.
    assert!(matches!(commands[5], DisplayCommand::FillPath { .. }));
    assert_eq!(commands.len(), 6);
}

#[test]
fn test_color_change_at_corner_tapers_later_sides() {
    let mut edges = uniform(6.0, Color::BLACK, BorderStyle::Solid);
    edges[0] = BorderEdge::new(6.0, Color::rgb(255, 0, 0), BorderStyle::Solid);
    let list = paint(edges, CornerRadii::default(), NO_FAST_PATH);

    assert_eq!(list.clip_count(), 0, "soft miters on solid sides need no clip");
    let kinds: Vec<&str> = list
        .commands()
        .iter()
        .map(|command| match command {
            DisplayCommand::FillRect { .. } => "rect",
            DisplayCommand::FillPath { .. } => "path",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["rect", "rect", "path", "path"]);
}

#[test]
fn test_dotted_color_change_clips_the_corner() {
    let mut edges = uniform(4.0, Color::BLACK, BorderStyle::Dotted);
    edges[0] = BorderEdge::new(4.0, Color::rgb(255, 0, 0), BorderStyle::Dotted);
    let list = paint(edges, CornerRadii::default(), BorderPaintOptions::default());
    assert!(is_balanced(&list));

    // The top side paints first, clipped at both corners.
    match &list.commands()[..4] {
        [
            DisplayCommand::Save,
            DisplayCommand::ClipPath { antialias, .. },
            DisplayCommand::StrokePath { color, .. },
            DisplayCommand::Restore,
        ] => {
            assert!(*antialias);
            assert_eq!(*color, Color::rgb(255, 0, 0));
        }
        other => panic!("expected a clipped top side, got {other:?}"),
    }
}

#[test]
fn test_uniform_dashed_sides_stroke_without_clips() {
    let list = paint(
        uniform(3.0, Color::BLACK, BorderStyle::Dashed),
        CornerRadii::default(),
        BorderPaintOptions::default(),
    );
    assert_eq!(list.clip_count(), 0);
    let strokes = list
        .commands()
        .iter()
        .filter(|command| matches!(command, DisplayCommand::StrokePath { .. }))
        .count();
    assert_eq!(strokes, 4);
}

#[test]
fn test_rounded_dashed_strokes_the_centerline() {
    let list = paint(
        uniform(4.0, Color::BLACK, BorderStyle::Dashed),
        CornerRadii::uniform(10.0),
        BorderPaintOptions::default(),
    );
    assert!(is_balanced(&list));
    assert!(matches!(
        &list.commands()[..3],
        [
            DisplayCommand::Save,
            DisplayCommand::ClipRoundedRect { .. },
            DisplayCommand::ClipOutRoundedRect { .. }
        ]
    ));
    let thicknesses: Vec<f32> = list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::StrokePath { stroke, .. } => Some(stroke.thickness),
            _ => None,
        })
        .collect();
    assert_eq!(thicknesses.len(), 4);
    for thickness in thicknesses {
        assert!((thickness - 8.8).abs() < 1e-4, "widened stroke {thickness}");
    }
}

// ---------------------------------------------------------------------------
// Decorations
// ---------------------------------------------------------------------------

#[test]
fn test_decoration_paints_background_border_outline() {
    let decoration = BoxDecoration {
        background_color: Some(Color::WHITE),
        outline: Some(Outline {
            width: 2.0,
            style: BorderStyle::Solid,
            color: Color::rgb(0, 0, 255),
            offset: 1.0,
        }),
        ..BoxDecoration::default()
    }
    .with_uniform_border(Color::BLACK, BorderStyle::Solid);

    let mut list = DisplayList::new();
    Painter::default().paint_box_decoration(
        &mut list,
        RectF::new(10.0, 10.0, 20.0, 20.0),
        BoxStrut::uniform(1.0),
        &decoration,
    );

    assert_eq!(
        drawn_colors(&list),
        vec![Color::WHITE, Color::BLACK, Color::rgb(0, 0, 255)]
    );
    match list.commands().last() {
        Some(DisplayCommand::StrokeRect {
            rect, thickness, ..
        }) => {
            assert_eq!(*rect, RectF::new(8.0, 8.0, 24.0, 24.0));
            assert!((thickness - 2.0).abs() < f32::EPSILON);
        }
        other => panic!("expected the outline stroke last, got {other:?}"),
    }
}

#[test]
fn test_rounded_background_fills_rounded_rect() {
    let decoration = BoxDecoration {
        background_color: Some(Color::rgb(200, 200, 200)),
        border_radius: CornerRadii::uniform(8.0),
        ..BoxDecoration::default()
    };
    let mut list = DisplayList::new();
    Painter::default().paint_box_decoration(
        &mut list,
        RectF::new(0.0, 0.0, 40.0, 40.0),
        BoxStrut::default(),
        &decoration,
    );
    assert!(matches!(
        list.commands(),
        [DisplayCommand::FillRoundedRect { .. }]
    ));
}

#[test]
fn test_display_list_serializes_to_json() {
    let list = paint(
        uniform(5.0, Color::BLACK, BorderStyle::Solid),
        CornerRadii::default(),
        BorderPaintOptions::default(),
    );
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["commands"][0]["op"], "stroke-rect");
    assert_eq!(json["commands"][0]["color"], "#000000");
    let back: DisplayList = serde_json::from_value(json).unwrap();
    assert_eq!(back, list);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Helper: an edge from arbitrary bytes.
fn arbitrary_edge(width: u8, alpha: u8, style: u8) -> BorderEdge {
    let style = BorderStyle::iter()
        .nth(usize::from(style) % 10)
        .unwrap_or_default();
    BorderEdge::new(
        f32::from(width % 13),
        Color::rgba(30, 60, 90, alpha),
        style,
    )
}

#[quickcheck]
fn prop_state_and_layers_stay_balanced(
    top: (u8, u8, u8),
    right: (u8, u8, u8),
    bottom: (u8, u8, u8),
    left: (u8, u8, u8),
    radius: u8,
    fast_path: bool,
) -> bool {
    let edges = [top, right, bottom, left].map(|(width, alpha, style)| arbitrary_edge(width, alpha, style));
    let list = paint(
        edges,
        CornerRadii::uniform(f32::from(radius % 30)),
        BorderPaintOptions {
            allow_fast_path: fast_path,
        },
    );
    // The least opaque group never needs a layer of its own.
    is_balanced(&list) && list.layer_count() <= 3
}

#[quickcheck]
fn prop_fast_path_never_clips_square_borders(width: u8, alpha: u8) -> bool {
    let color = Color::rgba(0, 0, 0, alpha.max(1));
    let list = paint(
        uniform(f32::from(width % 20), color, BorderStyle::Solid),
        CornerRadii::default(),
        BorderPaintOptions::default(),
    );
    list.clip_count() == 0 && list.layer_count() == 0 && list.drawing_count() <= 1
}

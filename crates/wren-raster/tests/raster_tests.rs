//! Integration tests: painters drawing into real pixels.

use wren_paint::{
    BorderEdge, BorderPaintOptions, BorderStyle, BoxBorderPainter, BoxDecoration, BoxStrut, Color,
    CornerRadii, DisplayList, GraphicsContext, Painter, RectF,
};
use wren_raster::Renderer;

/// Helper: rasterize a 100x100 border at the origin.
fn render_border(edges: [BorderEdge; 4], allow_fast_path: bool) -> Renderer {
    render_rounded_border(edges, CornerRadii::default(), allow_fast_path)
}

/// Helper: rasterize a 100x100 border with corner radii.
fn render_rounded_border(edges: [BorderEdge; 4], radii: CornerRadii, allow_fast_path: bool) -> Renderer {
    let mut list = DisplayList::new();
    BoxBorderPainter::new(RectF::new(0.0, 0.0, 100.0, 100.0), edges, radii)
        .with_options(BorderPaintOptions { allow_fast_path })
        .paint(&mut list);
    let mut renderer = Renderer::new(100, 100).unwrap();
    renderer.render(&list);
    renderer
}

/// Helper: channels differ by at most `tolerance`.
fn close(a: Color, b: Color, tolerance: u8) -> bool {
    a.r.abs_diff(b.r) <= tolerance
        && a.g.abs_diff(b.g) <= tolerance
        && a.b.abs_diff(b.b) <= tolerance
        && a.a.abs_diff(b.a) <= tolerance
}

/// Helper: the largest per-channel difference over the whole canvas.
fn max_difference(a: &Renderer, b: &Renderer) -> u8 {
    let mut worst = 0;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (Some(p), Some(q)) = (a.pixel(x, y), b.pixel(x, y)) else {
                return u8::MAX;
            };
            worst = worst
                .max(p.r.abs_diff(q.r))
                .max(p.g.abs_diff(q.g))
                .max(p.b.abs_diff(q.b))
                .max(p.a.abs_diff(q.a));
        }
    }
    worst
}

// ----------------------------------------------------------------------------
// Fast path equivalence
// ----------------------------------------------------------------------------

#[test]
fn test_fast_path_matches_per_side_for_solid_square() {
    let edges = [BorderEdge::new(5.0, Color::BLACK, BorderStyle::Solid); 4];
    let fast = render_border(edges, true);
    let slow = render_border(edges, false);
    assert!(max_difference(&fast, &slow) <= 1);
    assert_eq!(fast.pixel(2, 50), Some(Color::BLACK));
    assert_eq!(fast.pixel(50, 50), Some(Color::WHITE));
}

#[test]
fn test_fast_path_matches_per_side_for_rounded_solid() {
    let edges = [BorderEdge::new(6.0, Color::BLACK, BorderStyle::Solid); 4];
    let radii = CornerRadii::uniform(20.0);
    let fast = render_rounded_border(edges, radii, true);
    let slow = render_rounded_border(edges, radii, false);
    assert!(max_difference(&fast, &slow) <= 2);

    // Straight runs are solid and the corner outside the curve stays clear.
    assert_eq!(slow.pixel(50, 2), Some(Color::BLACK));
    assert_eq!(slow.pixel(1, 1), Some(Color::WHITE));
    assert_eq!(slow.pixel(50, 50), Some(Color::WHITE));
}

#[test]
fn test_fast_path_matches_per_side_for_double_square() {
    let edges = [BorderEdge::new(9.0, Color::BLACK, BorderStyle::Double); 4];
    let fast = render_border(edges, true);
    let slow = render_border(edges, false);
    assert!(max_difference(&fast, &slow) <= 1);
    assert_eq!(slow.pixel(50, 4), Some(Color::WHITE));
    assert_eq!(slow.pixel(50, 7), Some(Color::BLACK));
}

#[test]
fn test_fast_path_matches_per_side_for_rounded_double() {
    let edges = [BorderEdge::new(9.0, Color::BLACK, BorderStyle::Double); 4];
    let radii = CornerRadii::uniform(20.0);
    let fast = render_rounded_border(edges, radii, true);
    let slow = render_rounded_border(edges, radii, false);
    assert!(max_difference(&fast, &slow) <= 2);
    assert_eq!(slow.pixel(50, 4), Some(Color::WHITE));
}

#[test]
fn test_thin_double_renders_like_solid() {
    let double = render_border([BorderEdge::new(2.0, Color::BLACK, BorderStyle::Double); 4], false);
    let solid = render_border([BorderEdge::new(2.0, Color::BLACK, BorderStyle::Solid); 4], false);
    assert_eq!(max_difference(&double, &solid), 0);
}

#[test]
fn test_translucent_sides_blend_once_at_corners() {
    let half = Color::rgba(0, 0, 0, 128);
    let none = BorderEdge::new(0.0, Color::BLACK, BorderStyle::None);
    let side = BorderEdge::new(10.0, half, BorderStyle::Solid);
    let edges = [side, side, side, none];
    let fast = render_border(edges, true);
    let slow = render_border(edges, false);
    assert!(max_difference(&fast, &slow) <= 2);

    // The top right corner is covered by two sides but composited once.
    let corner = slow.pixel(95, 5).unwrap();
    let edge = slow.pixel(50, 5).unwrap();
    assert!(close(corner, edge, 2));
    assert!(close(edge, Color::rgb(127, 127, 127), 2));
}

// ----------------------------------------------------------------------------
// Styles
// ----------------------------------------------------------------------------

#[test]
fn test_double_border_has_gap() {
    let renderer = render_border([BorderEdge::new(9.0, Color::BLACK, BorderStyle::Double); 4], true);
    assert_eq!(renderer.pixel(1, 50), Some(Color::BLACK));
    assert_eq!(renderer.pixel(4, 50), Some(Color::WHITE));
    assert_eq!(renderer.pixel(7, 50), Some(Color::BLACK));
    assert_eq!(renderer.pixel(12, 50), Some(Color::WHITE));
}

#[test]
fn test_dashed_border_alternates() {
    let renderer = render_border([BorderEdge::new(3.0, Color::BLACK, BorderStyle::Dashed); 4], true);
    let row: Vec<Color> = (10..90).filter_map(|x| renderer.pixel(x, 1)).collect();
    assert!(row.iter().any(|&color| color == Color::BLACK));
    assert!(row.iter().any(|&color| color == Color::WHITE));
}

// ----------------------------------------------------------------------------
// Layers, decorations and output
// ----------------------------------------------------------------------------

#[test]
fn test_layer_opacity_applies_on_composite() {
    let mut renderer = Renderer::new(10, 10).unwrap();
    renderer.begin_layer(0.5);
    renderer.fill_rect(RectF::new(0.0, 0.0, 10.0, 10.0), Color::BLACK, false);
    renderer.fill_rect(RectF::new(0.0, 0.0, 5.0, 10.0), Color::BLACK, false);
    renderer.end_layer();
    let left = renderer.pixel(2, 2).unwrap();
    let right = renderer.pixel(7, 2).unwrap();
    assert!(close(left, right, 0));
    assert!(close(left, Color::rgb(127, 127, 127), 2));
}

#[test]
fn test_render_closes_open_layers() {
    let mut list = DisplayList::new();
    list.begin_layer(1.0);
    list.fill_rect(RectF::new(0.0, 0.0, 4.0, 4.0), Color::BLACK, false);
    let mut renderer = Renderer::new(4, 4).unwrap();
    renderer.render(&list);
    assert_eq!(renderer.pixel(1, 1), Some(Color::BLACK));
}

#[test]
fn test_decoration_paints_directly_into_pixels() {
    let decoration = BoxDecoration {
        background_color: Some(Color::rgb(0, 0, 255)),
        ..BoxDecoration::default()
    }
    .with_uniform_border(Color::BLACK, BorderStyle::Solid);
    let mut renderer = Renderer::new(40, 40).unwrap();
    Painter::default().paint_box_decoration(
        &mut renderer,
        RectF::new(10.0, 10.0, 20.0, 20.0),
        BoxStrut::uniform(2.0),
        &decoration,
    );
    assert_eq!(renderer.pixel(5, 5), Some(Color::WHITE));
    assert_eq!(renderer.pixel(10, 20), Some(Color::BLACK));
    assert_eq!(renderer.pixel(20, 20), Some(Color::rgb(0, 0, 255)));
}

#[test]
fn test_save_writes_png() {
    let renderer = render_border([BorderEdge::new(4.0, Color::rgb(255, 0, 0), BorderStyle::Solid); 4], true);
    let path = std::env::temp_dir().join(format!("wren-raster-{}.png", std::process::id()));
    renderer.save_png(&path).unwrap();
    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (100, 100));
    assert_eq!(image.get_pixel(1, 50).0, [255, 0, 0, 255]);
    std::fs::remove_file(&path).unwrap();
}

//! Walk a laid out box tree and paint each box's decoration.
//!
//! [CSS Flexbox § 4.3](https://www.w3.org/TR/css-flexbox-1/#painting)
//!
//! "Flex items paint exactly the same as inline blocks, except that
//! order-modified document order is used in place of raw document order."

use std::collections::HashMap;

use wren_layout::{FlexParticipant, NodeId};
use wren_paint::{BoxDecoration, BoxStrut, DisplayList, GraphicsContext, Painter, PointF, RectF};

/// Paint the whole tree into a new display list.
pub fn paint_tree(
    root: &dyn FlexParticipant,
    decorations: &HashMap<NodeId, BoxDecoration>,
    painter: &Painter,
) -> DisplayList {
    let mut list = DisplayList::new();
    paint_box(root, PointF::default(), decorations, painter, &mut list);
    log::debug!(target: "paint", "painted {} commands", list.len());
    list
}

/// The border box of `node` in canvas coordinates, given its parent's
/// border-box origin.
pub fn border_box(node: &dyn FlexParticipant, parent_origin: PointF) -> RectF {
    let frame = node.frame_rect();
    RectF::new(
        parent_origin.x + frame.offset.left.to_f32_px(),
        parent_origin.y + frame.offset.top.to_f32_px(),
        frame.size.width.to_f32_px(),
        frame.size.height.to_f32_px(),
    )
}

fn paint_box(
    node: &dyn FlexParticipant,
    parent_origin: PointF,
    decorations: &HashMap<NodeId, BoxDecoration>,
    painter: &Painter,
    context: &mut dyn GraphicsContext,
) {
    let rect = border_box(node, parent_origin);
    if let Some(decoration) = decorations.get(&node.id()) {
        let widths = node.style().border_width;
        painter.paint_box_decoration(
            context,
            rect,
            BoxStrut::new(widths.top, widths.right, widths.bottom, widths.left),
            decoration,
        );
    }

    let mut children: Vec<&dyn FlexParticipant> = node.children().iter().map(Box::as_ref).collect();
    children.sort_by_key(|child| child.style().order);
    for child in children {
        paint_box(child, rect.origin(), decorations, painter, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_units::Au;
    use wren_layout::{LayoutContext, PhysicalSize, layout_root};
    use wren_paint::{Color, DisplayCommand};

    use crate::scene::Scene;

    /// Helper: lay out a scene given as JSON in a 200x100 viewport and paint it.
    fn paint_scene(json: &str) -> DisplayList {
        let scene: Scene = serde_json::from_str(json).unwrap();
        let mut tree = scene.into_box_tree();
        layout_root(
            tree.root.as_mut(),
            PhysicalSize::new(Au::from_px(200), Au::from_px(100)),
            &LayoutContext::new(),
        );
        paint_tree(tree.root.as_ref(), &tree.decorations, &Painter::default())
    }

    #[test]
    fn test_children_paint_at_their_layout_position() {
        let list = paint_scene(
            r##"{ "root": { "type": "flex", "children": [
                { "type": "leaf", "decoration": { "background-color": "red" },
                  "content": { "fixed": { "width": 50, "height": 20 } } },
                { "type": "leaf", "decoration": { "background-color": "blue" },
                  "content": { "fixed": { "width": 30, "height": 20 } } }
            ] } }"##,
        );
        assert_eq!(
            list.commands(),
            &[
                DisplayCommand::FillRect {
                    rect: RectF::new(0.0, 0.0, 50.0, 20.0),
                    color: Color::rgb(255, 0, 0),
                    antialias: true,
                },
                DisplayCommand::FillRect {
                    rect: RectF::new(50.0, 0.0, 30.0, 20.0),
                    color: Color::rgb(0, 0, 255),
                    antialias: true,
                },
            ]
        );
    }

    #[test]
    fn test_order_modified_document_order() {
        let list = paint_scene(
            r##"{ "root": { "type": "flex", "children": [
                { "type": "leaf", "decoration": { "background-color": "red" },
                  "content": { "fixed": { "width": 50, "height": 20 } } },
                { "type": "leaf", "style": { "order": -1 }, "decoration": { "background-color": "blue" },
                  "content": { "fixed": { "width": 30, "height": 20 } } }
            ] } }"##,
        );
        let colors: Vec<Color> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::rgb(0, 0, 255), Color::rgb(255, 0, 0)]);
    }
}

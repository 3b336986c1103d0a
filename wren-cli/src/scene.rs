//! Scene files: a box tree with computed styles and decorations.
//!
//! A scene is JSON:
//!
//! ```json
//! {
//!   "viewport": { "width": 400, "height": 300 },
//!   "root": {
//!     "type": "flex",
//!     "style": { "flex_direction": "row", "column_gap": { "fixed": 10 } },
//!     "decoration": { "background-color": "#eeeeee" },
//!     "children": [
//!       { "type": "leaf", "content": { "fixed": { "width": 50, "height": 50 } } }
//!     ]
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use wren_layout::{ComputedStyle, FlexParticipant, FlexibleBox, LeafBox, LeafContent, NodeId};
use wren_paint::BoxDecoration;

/// Failures loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scene '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("viewport must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },

    #[error("node {index}: {reason}")]
    InvalidNode { index: u32, reason: &'static str },
}

/// The initial containing block, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// One box of the scene tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SceneNode {
    /// A `display: flex` container.
    Flex {
        #[serde(default)]
        style: ComputedStyle,
        #[serde(default)]
        decoration: BoxDecoration,
        #[serde(default)]
        children: Vec<SceneNode>,
    },
    /// A box whose content is measured.
    Leaf {
        #[serde(default)]
        style: ComputedStyle,
        #[serde(default)]
        decoration: BoxDecoration,
        content: LeafContent,
    },
}

/// A parsed scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub viewport: Viewport,
    pub root: SceneNode,
}

/// A scene turned into layout boxes.
#[derive(Debug)]
pub struct BoxTree {
    pub root: Box<dyn FlexParticipant>,
    pub decorations: HashMap<NodeId, BoxDecoration>,
    pub node_count: u32,
}

impl Scene {
    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scene: Self = serde_json::from_str(&text).map_err(|source| SceneError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> Result<(), SceneError> {
        let Viewport { width, height } = self.viewport;
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyViewport { width, height });
        }
        let mut index = 0;
        validate_node(&self.root, &mut index)
    }

    /// Build layout boxes, numbering nodes in document order from zero.
    pub fn into_box_tree(self) -> BoxTree {
        let mut decorations = HashMap::new();
        let mut next_id = 0;
        let root = build_node(self.root, &mut next_id, &mut decorations);
        BoxTree {
            root,
            decorations,
            node_count: next_id,
        }
    }
}

/// Border widths of sides whose style draws nothing take no space.
fn zero_invisible_border_widths(style: &mut ComputedStyle, decoration: &BoxDecoration) {
    let widths = &mut style.border_width;
    for (width, side) in [
        (&mut widths.top, decoration.border_top),
        (&mut widths.right, decoration.border_right),
        (&mut widths.bottom, decoration.border_bottom),
        (&mut widths.left, decoration.border_left),
    ] {
        if !side.style.is_visible() {
            *width = 0.0;
        }
    }
}

/// Nodes are numbered in the same document order `build_node` uses.
fn validate_node(node: &SceneNode, index: &mut u32) -> Result<(), SceneError> {
    let invalid = |reason| SceneError::InvalidNode {
        index: *index,
        reason,
    };
    let style = match node {
        SceneNode::Flex { style, .. } => style,
        SceneNode::Leaf { style, content, .. } => {
            let sizes = match *content {
                LeafContent::Fixed { width, height } => [width, height, 0.0],
                LeafContent::Flow {
                    min_width,
                    max_width,
                    line_height,
                } => [min_width, max_width, line_height],
            };
            if sizes.iter().any(|size| !size.is_finite() || *size < 0.0) {
                return Err(invalid("content sizes must be finite and non-negative"));
            }
            style
        }
    };
    let widths = style.border_width;
    if [widths.top, widths.right, widths.bottom, widths.left]
        .iter()
        .any(|width| !width.is_finite() || *width < 0.0)
    {
        return Err(invalid("border widths must be finite and non-negative"));
    }
    if style.flex_grow < 0.0 || style.flex_shrink < 0.0 {
        return Err(invalid("flex factors must be non-negative"));
    }
    *index += 1;
    if let SceneNode::Flex { children, .. } = node {
        for child in children {
            validate_node(child, index)?;
        }
    }
    Ok(())
}

fn build_node(
    node: SceneNode,
    next_id: &mut u32,
    decorations: &mut HashMap<NodeId, BoxDecoration>,
) -> Box<dyn FlexParticipant> {
    let id = NodeId(*next_id);
    *next_id += 1;
    match node {
        SceneNode::Flex {
            mut style,
            decoration,
            children,
        } => {
            zero_invisible_border_widths(&mut style, &decoration);
            let _ = decorations.insert(id, decoration);
            let children = children
                .into_iter()
                .map(|child| build_node(child, next_id, decorations))
                .collect();
            Box::new(FlexibleBox::with_children(id, style, children))
        }
        SceneNode::Leaf {
            mut style,
            decoration,
            content,
        } => {
            zero_invisible_border_widths(&mut style, &decoration);
            let _ = decorations.insert(id, decoration);
            Box::new(LeafBox::new(id, style, content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wren_layout::{FlexDirection, Length};
    use wren_paint::BorderStyle;

    const SCENE: &str = r#"{
        "viewport": { "width": 200, "height": 100 },
        "root": {
            "type": "flex",
            "style": { "flex_direction": "column", "border_width": { "top": 2, "right": 2, "bottom": 2, "left": 2 } },
            "decoration": { "border-top": { "color": "red", "style": "solid" } },
            "children": [
                { "type": "leaf", "style": { "width": { "fixed": 40 } }, "content": { "fixed": { "width": 40, "height": 10 } } },
                { "type": "flex" }
            ]
        }
    }"#;

    #[test]
    fn test_parse_scene() {
        let scene: Scene = serde_json::from_str(SCENE).unwrap();
        assert_eq!(scene.viewport, Viewport { width: 200, height: 100 });
        let SceneNode::Flex { style, decoration, children } = &scene.root else {
            panic!("root should be a flex container");
        };
        assert_eq!(style.flex_direction, FlexDirection::Column);
        assert_eq!(decoration.border_top.style, BorderStyle::Solid);
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[0], SceneNode::Leaf { style, .. } if style.width == Length::Fixed(40.0)));
    }

    #[test]
    fn test_box_tree_numbers_nodes_in_document_order() {
        let scene: Scene = serde_json::from_str(SCENE).unwrap();
        let tree = scene.into_box_tree();
        assert_eq!(tree.node_count, 3);
        assert_eq!(tree.root.id(), NodeId(0));
        let ids: Vec<NodeId> = tree.root.children().iter().map(|child| child.id()).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2)]);
        assert_eq!(tree.decorations.len(), 3);
    }

    #[test]
    fn test_border_width_of_unstyled_sides_is_zeroed() {
        let scene: Scene = serde_json::from_str(SCENE).unwrap();
        let tree = scene.into_box_tree();
        let widths = tree.root.style().border_width;
        assert!((widths.top - 2.0).abs() < f32::EPSILON);
        assert!(widths.right.abs() < f32::EPSILON);
        assert!(widths.left.abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_viewport_is_rejected() {
        let scene: Scene = serde_json::from_str(r#"{ "viewport": { "width": 0, "height": 5 }, "root": { "type": "flex" } }"#).unwrap();
        assert!(matches!(scene.validate(), Err(SceneError::EmptyViewport { width: 0, height: 5 })));
    }

    #[test]
    fn test_negative_content_size_is_rejected() {
        let scene: Scene = serde_json::from_str(
            r#"{ "root": { "type": "flex", "children": [
                { "type": "leaf", "content": { "fixed": { "width": 10, "height": 10 } } },
                { "type": "leaf", "content": { "fixed": { "width": -1, "height": 10 } } }
            ] } }"#,
        )
        .unwrap();
        assert!(matches!(scene.validate(), Err(SceneError::InvalidNode { index: 2, .. })));
    }

    #[test]
    fn test_demo_scenes_parse() {
        for json in [
            include_str!("../../demos/cards.json"),
            include_str!("../../demos/borders.json"),
        ] {
            let scene: Scene = serde_json::from_str(json).unwrap();
            assert!(scene.validate().is_ok());
            assert!(scene.into_box_tree().node_count > 1);
        }
    }
}

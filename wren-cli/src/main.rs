//! Wren CLI
//!
//! Lays out a scene file with the flex layout engine, paints box
//! decorations and optionally rasterizes the result.

mod paint;
mod scene;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use app_units::Au;
use clap::{ArgAction, Parser};
use owo_colors::OwoColorize;
use wren_layout::{FlexParticipant, LayoutContext, PhysicalSize, layout_root};
use wren_paint::{BorderPaintOptions, DisplayList, Painter, PointF};
use wren_raster::Renderer;

use scene::{BoxTree, Scene};

/// Wren: flex layout and border painting for scene files
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the layout tree
    wren demos/cards.json

    # Take a screenshot
    wren -R cards.png demos/cards.json

    # Dump the display list with every border side painted separately
    wren -D list.json --no-fast-path demos/borders.json

    # Lay out in a wider viewport
    wren --width 1024 demos/cards.json
"#)]
struct Cli {
    /// Path to a JSON scene file
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Viewport width (default: the scene's)
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height (default: the scene's)
    #[arg(long)]
    height: Option<u32>,

    /// Print the layout tree even when writing other output
    #[arg(short = 'L', long)]
    print_layout: bool,

    /// Write the display list to the specified file (JSON)
    #[arg(short = 'D', long, value_name = "FILE")]
    display_list: Option<PathBuf>,

    /// Render a screenshot and save to the specified file (PNG format)
    #[arg(short = 'R', long, value_name = "FILE")]
    render: Option<PathBuf>,

    /// Paint every border side separately
    #[arg(long)]
    no_fast_path: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut scene = Scene::load(&cli.scene)?;
    if let Some(width) = cli.width {
        scene.viewport.width = width;
    }
    if let Some(height) = cli.height {
        scene.viewport.height = height;
    }
    let viewport = scene.viewport;
    anyhow::ensure!(
        viewport.width > 0 && viewport.height > 0,
        "viewport must be at least 1x1, got {}x{}",
        viewport.width,
        viewport.height
    );

    // STEP 1: Layout
    let mut tree = scene.into_box_tree();
    let context = LayoutContext::new();
    layout_root(
        tree.root.as_mut(),
        PhysicalSize::new(px(viewport.width), px(viewport.height)),
        &context,
    );
    log::info!(target: "layout", "laid out {} boxes: {:?}", tree.node_count, context.stats());

    // STEP 2: Paint
    let painter = Painter::new(BorderPaintOptions {
        allow_fast_path: !cli.no_fast_path,
    });
    let display_list = paint::paint_tree(tree.root.as_ref(), &tree.decorations, &painter);

    let writes_output = cli.display_list.is_some() || cli.render.is_some();
    if cli.print_layout || !writes_output {
        print_layout(&tree, &context, viewport.width, viewport.height);
    }

    if let Some(ref output_path) = cli.display_list {
        write_display_list(&display_list, output_path)?;
        println!("Display list saved to: {}", output_path.display());
    }

    // STEP 3: Render
    if let Some(ref output_path) = cli.render {
        let mut renderer = Renderer::new(viewport.width, viewport.height)?;
        renderer.render(&display_list);
        renderer.save_png(output_path)?;
        println!("Screenshot saved to: {}", output_path.display());
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn px(value: u32) -> Au {
    Au::from_px(i32::try_from(value).unwrap_or(i32::MAX))
}

fn write_display_list(display_list: &DisplayList, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(display_list)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write display list to '{}'", path.display()))
}

/// Print the layout tree with border boxes in viewport coordinates
fn print_layout(tree: &BoxTree, context: &LayoutContext, width: u32, height: u32) {
    println!(
        "{}",
        format!("=== Layout Tree (viewport: {width}x{height}) ===").bold()
    );
    println!();
    print_layout_box(tree.root.as_ref(), PointF::default(), 0);

    let stats = context.stats();
    println!("{}", "=== Layout Stats ===".bold());
    println!("  box layouts:         {}", stats.box_layouts);
    println!("  scrollbar relayouts: {}", stats.scrollbar_relayouts);
    if stats.intrinsic_size_algorithm_changes > 0 {
        println!(
            "  {} {} container(s) would size differently under flex-fraction intrinsic sizing",
            "note:".yellow(),
            stats.intrinsic_size_algorithm_changes
        );
    }
}

/// Recursively print a box with its dimensions
fn print_layout_box(node: &dyn FlexParticipant, parent_origin: PointF, depth: usize) {
    let indent = "  ".repeat(depth);
    let rect = paint::border_box(node, parent_origin);
    println!("{indent}[{} {}]", node.kind().green(), node.id());
    println!(
        "{indent}  border box: x={:.1} y={:.1} w={:.1} h={:.1}",
        rect.x, rect.y, rect.width, rect.height
    );
    for child in node.children() {
        print_layout_box(child.as_ref(), rect.origin(), depth + 1);
    }
}

// Copyright 2025 the Sylva Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk through a knowledge map: decode, lay out, focus, drag, annotate.
//!
//! The tree is decoded from JSON using the producer's field names, laid out
//! with a pinned introduction row, and then driven through the same pointer
//! events a canvas would send.
//!
//! Run:
//! - `cargo run -p sylva_demos --example knowledge_map`
//! - `RUST_LOG=debug cargo run -p sylva_demos --example knowledge_map` to see engine events.

use kurbo::{Point, Size, Vec2};
use palette::{Srgb, Srgba};
use sylva_annotate::{StrokeStyle, Tool};
use sylva_engine::{Engine, EngineConfig, PointerOutcome, ThemeKind};
use sylva_focus::{Camera, Navigation, Viewport};
use sylva_layout::{DetailMode, NodeId, PinTitle, TreeNode};
use tracing_subscriber::EnvFilter;

const MAP: &str = r#"{
  "titre": "Cell Biology",
  "enfants": [
    { "titre": "Membranes", "contenu": "Lipid bilayers separate the cell from its environment and compartmentalize organelles." },
    { "titre": "Introduction", "contenu": "What cells are, and why they matter.",
      "enfants": [ { "titre": "History" } ] },
    { "titre": "Genetics",
      "enfants": [
        { "titre": "DNA", "contenu": "Double helix carrying hereditary information." },
        { "titre": "RNA" }
      ] },
    { "titre": "Metabolism" }
  ]
}"#;

fn outline<H: sylva_layout::LayoutHooks>(engine: &Engine<H>, camera: &Camera) {
    for node in engine.index().iter() {
        let style = engine.node_style(node.id, camera.zoom());
        let opacity = style.map_or(0.0, |s| s.opacity);
        let fill = engine
            .node_fill(node.id)
            .unwrap_or(Srgb::new(0, 0, 0));
        println!(
            "{:indent$}{:<14} row {} at ({:>7.1}, {:>6.1}) {:>3.0}x{:<3.0} opacity {:.2} fill #{:02x}{:02x}{:02x}{}",
            "",
            node.title,
            node.row,
            node.origin.x,
            node.origin.y,
            node.size.width,
            node.size.height,
            opacity,
            fill.red,
            fill.green,
            fill.blue,
            node.body
                .as_deref()
                .map(|b| format!("  \"{b}\""))
                .unwrap_or_default(),
            indent = node.depth * 2,
        );
    }
}

fn breadcrumb<H: sylva_layout::LayoutHooks>(engine: &Engine<H>) -> String {
    let crumbs: Vec<&str> = engine
        .breadcrumb()
        .iter()
        .map(|n| n.title.as_str())
        .collect();
    if crumbs.is_empty() {
        "(overview)".to_string()
    } else {
        crumbs.join(" > ")
    }
}

fn find<H: sylva_layout::LayoutHooks>(engine: &Engine<H>, title: &str) -> Option<NodeId> {
    engine
        .index()
        .iter()
        .find(|n| n.title == title)
        .map(|n| n.id)
}

fn center<H: sylva_layout::LayoutHooks>(engine: &Engine<H>, id: NodeId) -> Result<Point, String> {
    engine
        .index()
        .get(id)
        .map(|n| n.center())
        .ok_or_else(|| format!("no geometry for {id:?}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tree: TreeNode = serde_json::from_str(MAP)?;
    let mut camera = Camera::new(Size::new(1280.0, 720.0));
    let mut engine =
        Engine::with_hooks(tree, EngineConfig::default(), PinTitle::new("intro"));
    engine.fit_view(&mut camera);

    println!(
        "== overview ({} nodes, {} edges)",
        engine.index().len(),
        engine.layout().edges().len()
    );
    outline(&engine, &camera);

    // Click Genetics the way a canvas would: press and release in place.
    let genetics = find(&engine, "Genetics").ok_or("Genetics missing")?;
    let at = camera.view_transform() * center(&engine, genetics)?;
    engine.pointer_down(at, &camera);
    let outcome = engine.pointer_up(at, &mut camera);
    tracing::info!(?outcome, "clicked Genetics");
    println!("\n== click Genetics: {outcome:?}");
    println!("breadcrumb: {}", breadcrumb(&engine));
    println!("siblings:   {:?}", engine.siblings());
    println!("edges:      {}", engine.visible_edges().count());
    outline(&engine, &camera);

    let step = engine.navigate(Navigation::Next, &mut camera);
    println!("\n== next sibling: {step:?} -> {}", breadcrumb(&engine));
    let step = engine.navigate(Navigation::Next, &mut camera);
    println!("== next again:   {step:?} (no wrap)");

    engine.unfocus(&mut camera);
    engine.set_detail_mode(DetailMode::Full, &mut camera);
    engine.fit_view(&mut camera);

    // Drag Membranes 80 screen pixels to the right.
    let membranes = find(&engine, "Membranes").ok_or("Membranes missing")?;
    let start = camera.view_transform() * center(&engine, membranes)?;
    engine.pointer_down(start, &camera);
    for dx in [10.0, 40.0, 80.0] {
        engine.pointer_move(start + Vec2::new(dx, 0.0), &camera);
    }
    let dropped = engine.pointer_up(start + Vec2::new(80.0, 0.0), &mut camera);
    if !matches!(dropped, PointerOutcome::Dropped(_)) {
        return Err(format!("expected a drop, got {dropped:?}").into());
    }
    let moved_to = engine
        .overrides()
        .get(membranes)
        .ok_or("drag left no override")?;
    tracing::info!(node = %membranes, x = moved_to.x, y = moved_to.y, "node dragged");
    println!("\n== dragged Membranes: override at {moved_to:?}");

    // Ink a quick underline, then erase it.
    engine.set_tool(Tool::Draw);
    engine
        .overlay_mut()
        .set_style(StrokeStyle::highlighter(Srgba::new(250, 204, 21, 255)));
    let pen = Point::new(200.0, 600.0);
    engine.pointer_down(pen, &camera);
    for i in 1..=10 {
        engine.pointer_move(pen + Vec2::new(f64::from(i) * 20.0, 0.0), &camera);
    }
    engine.pointer_up(pen + Vec2::new(200.0, 0.0), &mut camera);
    let stroke = engine.overlay().strokes().first().ok_or("stroke not committed")?;
    println!(
        "\n== stroke {:?}: {} samples, bounds {:?}, flags {:?}",
        stroke.id,
        stroke.points.len(),
        stroke.bounds(),
        engine.overlay().flags(),
    );
    engine.set_tool(Tool::Erase);
    let erased = engine.pointer_down(pen + Vec2::new(100.0, 2.0), &camera);
    engine.pointer_up(pen, &mut camera);
    tracing::info!(?erased, remaining = engine.overlay().strokes().len(), "eraser pass");
    println!("== eraser: {erased:?}");
    engine.set_tool(Tool::Pointer);

    engine.set_theme(ThemeKind::Violet.theme());
    println!("\n== violet theme, full detail");
    outline(&engine, &camera);
    Ok(())
}

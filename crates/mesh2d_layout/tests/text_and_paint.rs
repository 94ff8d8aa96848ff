//! Integration tests for text nodes, rendering and pointer dispatch
//!
//! These tests verify that:
//! - Font size changes keep the visual top of text anchored
//! - Text aligns with a baseline bias
//! - A full frame paints layers, containers and text in order
//! - Pointer events reach only the topmost interactive node

use mesh2d_core::event_types;
use mesh2d_layout::{
    AlignTarget, AlignY, ContainerBuilder, InsertOptions, NodeBuilder, PaintLayer, PointerEvent,
    RectBuilder, Scene, SceneConfig, TextBuilder,
};
use mesh2d_paint::{Color, CornerRadius, FontSpec, PaintCommand, PaintContext};
use std::cell::Cell;
use std::rc::Rc;

/// Every character is exactly half the font size wide
fn half_em(text: &str, font: &FontSpec) -> f32 {
    text.chars().count() as f32 * font.size / 2.0
}

#[test]
fn test_font_growth_shifts_baseline_by_height_delta_plus_pad() {
    let mut scene = Scene::new().with_metrics(half_em);
    let t = scene
        .add_text(TextBuilder::new("single").font_size(16.0))
        .unwrap();
    let before = scene.node(t).unwrap().placement().offset().y;
    let old_lines = scene.text(t).unwrap().line_count(&half_em);

    scene.set_font_size(t, 32.0).unwrap();
    let after = scene.node(t).unwrap().placement().offset().y;
    let new_lines = scene.text(t).unwrap().line_count(&half_em);

    assert_eq!((old_lines, new_lines), (1, 1));
    assert_eq!(
        after - before,
        new_lines as f32 * 32.0 - old_lines as f32 * 16.0 + 2.0
    );
}

#[test]
fn test_wrapped_text_grows_by_extra_lines() {
    let mut scene = Scene::new().with_metrics(half_em);
    // 6 chars: 48px at 16, 96px at 32, wrapped at 50px
    let t = scene
        .add_text(TextBuilder::new("abcdef").font_size(16.0).fixed_width(50.0))
        .unwrap();
    let before = scene.y(t).unwrap();

    scene.set_font_size(t, 32.0).unwrap();
    assert_eq!(scene.y(t).unwrap() - before, 2.0 * 32.0 - 16.0 + 2.0);
    assert_eq!(scene.height(t).unwrap(), 64.0);
    assert_eq!(scene.width(t).unwrap(), 50.0);
}

#[test]
fn test_configured_pad_is_used() {
    let config = SceneConfig::from_toml_str("text_pad = 0.0").unwrap();
    let mut scene = Scene::with_config(config).unwrap().with_metrics(half_em);
    let t = scene
        .add_text(TextBuilder::new("abc").font_size(10.0))
        .unwrap();
    assert_eq!(scene.y(t).unwrap(), 10.0);

    scene.set_font_size(t, 20.0).unwrap();
    assert_eq!(scene.y(t).unwrap(), 20.0);
}

#[test]
fn test_text_aligns_with_font_size_bias() {
    let mut scene = Scene::new().with_metrics(half_em);
    let t = scene
        .add_text(TextBuilder::new("abcd").font_size(20.0))
        .unwrap();

    scene
        .align_y(t, AlignY::Top, AlignTarget::Surface { width: 200.0, height: 100.0 })
        .unwrap();
    // Top of the box on the surface edge, plus one font size for the baseline
    assert_eq!(scene.y(t).unwrap(), 20.0);
}

#[test]
fn test_render_full_frame() {
    let mut scene = Scene::new().with_metrics(half_em);
    let background = scene
        .add_rect(
            RectBuilder::new(800.0, 600.0)
                .background(Color::WHITE)
                .corner_radius(CornerRadius::uniform(4.0)),
        )
        .unwrap();
    let panel = scene
        .add_container(ContainerBuilder::new(100.0, 40.0).fill(true).background(Color::BLACK))
        .unwrap();
    let label = scene
        .add_text(TextBuilder::new("ok").font_size(10.0).color(Color::WHITE))
        .unwrap();
    let hidden = scene
        .add_rect(RectBuilder::new(5.0, 5.0).hidden(true))
        .unwrap();
    scene
        .insert_children(panel, &[label, hidden], InsertOptions::append())
        .unwrap();
    scene.add_to_layer(PaintLayer::Main, panel).unwrap();
    scene.add_to_layer(PaintLayer::Back, background).unwrap();

    let mut ctx = PaintContext::new(800.0, 600.0);
    scene.render(&mut ctx).unwrap();
    let commands = ctx.take_commands();

    assert_eq!(commands.len(), 4);
    assert_eq!(commands[0], PaintCommand::Clear);
    match &commands[1] {
        PaintCommand::FillRect { radius, color, .. } => {
            assert_eq!(radius.to_array(), [4.0; 4]);
            assert_eq!(*color, Color::WHITE);
        }
        other => panic!("expected the back layer first, got {other:?}"),
    }
    assert!(matches!(&commands[2], PaintCommand::FillRect { color, .. } if *color == Color::BLACK));
    match &commands[3] {
        PaintCommand::DrawText { text, font, .. } => {
            assert_eq!(text, "ok");
            assert_eq!(font, "400 10px sans-serif");
        }
        other => panic!("expected text last, got {other:?}"),
    }
}

#[test]
fn test_overlapping_interactive_nodes_dispatch_to_topmost() {
    let mut scene = Scene::new();
    let below = scene
        .add_interactive(ContainerBuilder::new(20.0, 20.0).at_pixels(10.0, 10.0))
        .unwrap();
    let above = scene
        .add_interactive(
            ContainerBuilder::new(20.0, 20.0)
                .at_pixels(15.0, 15.0)
                .z_index(3),
        )
        .unwrap();

    let clicks = Rc::new(Cell::new((0, 0)));
    {
        let clicks = Rc::clone(&clicks);
        scene
            .set_handler(below, event_types::CLICK, move |_| {
                let (b, a) = clicks.get();
                clicks.set((b + 1, a));
            })
            .unwrap();
    }
    {
        let clicks = Rc::clone(&clicks);
        scene
            .set_handler(above, event_types::CLICK, move |_| {
                let (b, a) = clicks.get();
                clicks.set((b, a + 1));
            })
            .unwrap();
    }
    scene.add_to_layer(PaintLayer::Front, below).unwrap();
    scene.add_to_layer(PaintLayer::Back, above).unwrap();

    // Overlap: higher z wins regardless of layer
    assert_eq!(
        scene.dispatch_pointer(PointerEvent::click(20.0, 20.0)).unwrap(),
        Some(above)
    );
    // Only `below` covers this corner
    assert_eq!(
        scene.dispatch_pointer(PointerEvent::click(10.0, 10.0)).unwrap(),
        Some(below)
    );
    // Nothing here
    assert_eq!(
        scene.dispatch_pointer(PointerEvent::click(100.0, 100.0)).unwrap(),
        None
    );
    assert_eq!(clicks.get(), (1, 1));
}

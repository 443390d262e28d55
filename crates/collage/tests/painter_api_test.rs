//! Integration tests for the Painter API.

use std::{cell::Cell, rc::Rc};

use collage::{
    CollageError, Drawable, Input, Painter,
    color::Color,
    config::AppConfig,
    draw::{circle, rect},
    geometry::{Point, Size},
    surface::RecordingSurface,
};

#[test]
fn test_painter_composes_once_per_input_change() {
    let radius = Input::new(4.0);
    let runs = Rc::new(Cell::new(0));

    let content_radius = radius.clone();
    let content_runs = Rc::clone(&runs);
    let mut painter = Painter::builder(Size::new(40.0, 40.0)).build(move |scene, w, h| {
        content_runs.set(content_runs.get() + 1);
        let r = scene.read(&content_radius);
        scene.elements([circle(|c| {
            c.center = Point::new(w / 2.0, h / 2.0);
            c.radius = r;
        })]);
    });

    let mut surface = RecordingSurface::new(Size::new(40.0, 40.0));
    for _ in 0..3 {
        painter.draw(&mut surface, Size::new(40.0, 40.0)).unwrap();
    }
    assert_eq!(runs.get(), 1);
    assert_eq!(painter.root().render_count(), 1);

    radius.set(8.0);
    painter.draw(&mut surface, Size::new(40.0, 40.0)).unwrap();
    assert_eq!(runs.get(), 2);
    assert_eq!(painter.root().render_count(), 2);
}

#[test]
fn test_density_scales_intrinsic_size() {
    let painter = Painter::builder(Size::new(50.0, 20.0))
        .with_density(2.0)
        .build(|_, _, _| {});
    assert_eq!(painter.intrinsic_size(), Size::new(100.0, 40.0));
    assert_eq!(painter.viewport(), Size::new(100.0, 40.0));
}

#[test]
fn test_export_png_and_svg() {
    let dir = tempfile::tempdir().unwrap();
    let mut painter = Painter::builder(Size::new(30.0, 30.0))
        .with_background(Color::rgb(255, 255, 255))
        .build(|scene, w, h| {
            scene.elements([rect(|r| {
                r.size = Size::new(w, h);
                r.fill = Some(Color::rgb(0, 0, 255));
            })]);
        });

    let png = dir.path().join("scene.png");
    let svg = dir.path().join("scene.svg");
    painter.export(&png, Size::new(30.0, 30.0)).unwrap();
    painter.export(&svg, Size::new(30.0, 30.0)).unwrap();

    assert!(std::fs::read(&png).unwrap().starts_with(b"\x89PNG"));
    assert!(std::fs::read_to_string(&svg).unwrap().contains("<svg"));
}

#[test]
fn test_disposed_painter_refuses_to_draw() {
    let mut painter = Painter::builder(Size::new(10.0, 10.0)).build(|_, _, _| {});
    painter.dispose();
    painter.dispose();

    let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
    assert!(matches!(
        painter.draw(&mut surface, Size::new(10.0, 10.0)),
        Err(CollageError::Disposed)
    ));
    assert!(surface.ops().is_empty());
}

#[test]
fn test_from_config_uses_explicit_viewport() {
    let config: AppConfig = toml::from_str(
        "[painter]\nwidth = 200.0\nheight = 100.0\nviewport_width = 100.0\nviewport_height = 50.0",
    )
    .unwrap();
    let painter = Painter::from_config(&config, |_, _, _| {}).unwrap();
    assert_eq!(painter.viewport(), Size::new(100.0, 50.0));
    assert_eq!(painter.intrinsic_size(), Size::new(200.0, 100.0));
}

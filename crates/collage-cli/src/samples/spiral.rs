//! A spiral of dots rotated by the animation clock.
//!
//! The dots never change; only the rotation of the group holding them reads
//! the clock, so each frame recomposes into a single transform update.

use collage::{
    GroupTransform, Input, SceneBuilder,
    color::Color,
    draw::{Primitive, circle},
    geometry::{Point, Size},
};

pub const SIZE: Size = Size::new(360.0, 360.0);

const DOT_COUNT: usize = 240;
const ANGLE_STEP: f64 = 0.25;
const GROWTH: f64 = 2.6;
const DEGREES_PER_FRAME: f64 = 6.0;

/// Returns the rotation in degrees shown at `frame`.
pub fn angle_at(frame: u64) -> f64 {
    (frame as f64 * DEGREES_PER_FRAME) % 360.0
}

fn dots() -> Vec<Primitive> {
    let inner = Color::rgb(70, 130, 180);
    let outer = Color::rgb(255, 215, 0);

    (0..DOT_COUNT)
        .map(|i| {
            let theta = i as f64 * ANGLE_STEP;
            let radius = GROWTH * theta;
            let t = i as f64 / (DOT_COUNT - 1) as f64;
            circle(|c| {
                c.center = Point::new(radius * theta.cos(), radius * theta.sin());
                c.radius = 1.0 + 3.0 * t;
                c.fill = Some(inner.interpolate_lab(outer, t as f32));
            })
            .into()
        })
        .collect()
}

/// Returns the content of the spiral sample, rotated by `angle` degrees.
pub fn scene(angle: Input<f64>) -> impl FnMut(&mut SceneBuilder, f64, f64) + 'static {
    let dots = dots();
    move |scene, width, height| {
        let degrees = scene.read(&angle);
        let transform = GroupTransform::translate(width / 2.0, height / 2.0).with_rotation(degrees);
        scene.key("spiral").group(transform, |scene| {
            scene.elements(dots.iter().cloned());
        });
    }
}

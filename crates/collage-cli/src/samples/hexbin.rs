//! Hexagonal binning of normally distributed points.
//!
//! Points are grouped into a grid of hexagons; each hexagon is filled on a
//! white-to-navy ramp by how many points it holds.

use std::{collections::HashMap, f64::consts::PI};

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use collage::{
    SceneBuilder,
    color::Color,
    draw::{Primitive, StrokeDefinition, path},
    geometry::{Point, Size},
};

pub const SIZE: Size = Size::new(400.0, 400.0);
pub const SEED: u64 = 0x00C0_11A6;

const POINT_COUNT: usize = 2000;
const RADIUS: f64 = 8.0;
const STANDARD_DEVIATION: f64 = 80.0;

/// A hexagon of the grid and the number of points that fell into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub center: Point,
    pub count: usize,
}

/// Samples a normal distribution with the Box-Muller transform.
fn normal(rng: &mut StdRng, mean: f64, deviation: f64) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    mean + deviation * (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Returns `count` points scattered around the center of a `size` square.
pub fn scatter(seed: u64, count: usize, size: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = normal(&mut rng, size / 2.0, STANDARD_DEVIATION);
            let y = normal(&mut rng, size / 2.0, STANDARD_DEVIATION);
            Point::new(x, y)
        })
        .collect()
}

fn is_odd(row: i64) -> bool {
    row.rem_euclid(2) == 1
}

/// Groups points into hexagons of the given radius.
///
/// Points outside `extent` are dropped. Bins are returned in the order
/// their first point was seen.
pub fn bin_points(points: &[Point], radius: f64, extent: Size) -> Vec<Bin> {
    let dx = radius * 2.0 * (PI / 3.0).sin();
    let dy = radius * 1.5;

    let mut bins: Vec<Bin> = Vec::new();
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();

    for point in points {
        if !(0.0..=extent.width).contains(&point.x) || !(0.0..=extent.height).contains(&point.y) {
            continue;
        }

        let py = point.y / dy;
        let mut row = py.round();
        let px = point.x / dx - if is_odd(row as i64) { 0.5 } else { 0.0 };
        let mut col = px.round();
        let py1 = py - row;

        // Near a row boundary, pick the closer of the two candidate centers
        if py1.abs() * 3.0 > 1.0 {
            let px1 = px - col;
            let col2 = col + if px < col { -0.5 } else { 0.5 };
            let row2 = row + if py < row { -1.0 } else { 1.0 };
            let px2 = px - col2;
            let py2 = py - row2;
            if px1 * px1 + py1 * py1 > px2 * px2 + py2 * py2 {
                col = col2 + if is_odd(row as i64) { 0.5 } else { -0.5 };
                row = row2;
            }
        }

        let key = (col as i64, row as i64);
        let slot = *index.entry(key).or_insert_with(|| {
            let offset = if is_odd(row as i64) { 0.5 } else { 0.0 };
            bins.push(Bin {
                center: Point::new((col + offset) * dx, row * dy),
                count: 0,
            });
            bins.len() - 1
        });
        bins[slot].count += 1;
    }
    bins
}

/// Returns the hexagon outline around `center`, pointy side up.
fn hexagon(center: Point, radius: f64) -> Primitive {
    path(|p| {
        for corner in 0..6 {
            let angle = f64::from(corner) * PI / 3.0;
            p.line_to(Point::new(
                center.x + angle.sin() * radius,
                center.y - angle.cos() * radius,
            ));
        }
        p.close();
    })
    .into()
}

fn hexagons(bins: &[Bin]) -> Vec<Primitive> {
    let max = bins.iter().map(|bin| bin.count).max().unwrap_or(1).max(1);
    let low = Color::rgb(255, 255, 255);
    let high = Color::rgb(0x14, 0x1F, 0x79);
    let stroke = StrokeDefinition::solid(Color::rgb(255, 255, 255), 1.0);

    bins.iter()
        .map(|bin| {
            let mut primitive = hexagon(bin.center, RADIUS);
            if let Primitive::Path(hex) = &mut primitive {
                hex.fill = Some(low.interpolate_lab(high, bin.count as f32 / max as f32));
                hex.stroke = Some(stroke.clone());
            }
            primitive
        })
        .collect()
}

/// Returns the content of the hexbin sample for the points drawn from
/// `seed`.
pub fn scene(seed: u64) -> impl FnMut(&mut SceneBuilder, f64, f64) + 'static {
    let points = scatter(seed, POINT_COUNT, SIZE.width);
    let bins = bin_points(&points, RADIUS, SIZE);
    debug!(points = points.len(), bins = bins.len(); "Binned hexbin sample");
    let hexagons = hexagons(&bins);

    move |scene, _, _| {
        scene.elements(hexagons.iter().cloned());
    }
}

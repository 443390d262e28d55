//! A line chart with left and bottom axes.

use collage::{
    GroupTransform, SceneBuilder,
    axis::{AxisConfig, Orient, axis},
    color::Color,
    draw::{Primitive, StrokeDefinition, path},
    geometry::{Point, Size},
    scale::LinearScale,
};

pub const SIZE: Size = Size::new(640.0, 360.0);

const MARGIN_TOP: f64 = 12.0;
const MARGIN_RIGHT: f64 = 32.0;
const MARGIN_BOTTOM: f64 = 20.0;
const MARGIN_LEFT: f64 = 32.0;

const SAMPLES: usize = 101;

fn f(x: f64) -> f64 {
    x.powf(1.6) + x + 1.0
}

/// Returns the sampled curve as `(x, f(x))` pairs over `[0, 100]`.
pub fn series() -> Vec<(f64, f64)> {
    (0..SAMPLES)
        .map(|i| {
            let x = i as f64 * 100.0 / (SAMPLES - 1) as f64;
            (x, f(x))
        })
        .collect()
}

/// Returns the x and y scales for a plot area of `width` by `height`.
pub fn scales(data: &[(f64, f64)], width: f64, height: f64) -> (LinearScale, LinearScale) {
    let max = data.iter().map(|(_, y)| *y).fold(0.0, f64::max);
    let x = LinearScale::new((0.0, 100.0), (0.0, width));
    let y = LinearScale::new((0.0, max), (height, 0.0));
    (x, y)
}

fn plot(data: &[(f64, f64)], x: &LinearScale, y: &LinearScale) -> Primitive {
    path(|p| {
        p.fill = None;
        p.stroke = Some(StrokeDefinition::solid(Color::rgb(70, 130, 180), 1.5));
        for (dx, dy) in data {
            p.line_to(Point::new(x.apply(*dx), y.apply(*dy)));
        }
    })
    .into()
}

/// Returns the content of the chart sample.
///
/// The plot area follows the viewport passed to the content, so a resized
/// painter rescales the curve and both axes.
pub fn scene() -> impl FnMut(&mut SceneBuilder, f64, f64) + 'static {
    let data = series();
    let left_config: AxisConfig<f64> = AxisConfig::default()
        .with_axis_stroke(Some(StrokeDefinition::solid(Color::rgb(169, 169, 169), 1.0)));
    let bottom_config: AxisConfig<f64> = AxisConfig::default()
        .with_axis_stroke(Some(StrokeDefinition::solid(Color::rgb(47, 79, 79), 1.0)));

    move |scene, width, height| {
        let plot_width = (width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0);
        let plot_height = (height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0);
        let (x, y) = scales(&data, plot_width, plot_height);

        scene
            .key("plot")
            .group(GroupTransform::translate(MARGIN_LEFT, MARGIN_TOP), |scene| {
                axis(scene, Orient::Left, &y, &left_config);
                scene.key("line").elements([plot(&data, &x, &y)]);
            });
        scene.key("x-axis").group(
            GroupTransform::translate(MARGIN_LEFT, MARGIN_TOP + plot_height),
            |scene| axis(scene, Orient::Bottom, &x, &bottom_config),
        );
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use collage::{NodeDesc, geometry::PathEl};

    use super::*;

    fn build(width: f64, height: f64) -> Vec<NodeDesc> {
        let mut builder = SceneBuilder::new();
        scene()(&mut builder, width, height);
        builder.build().children().to_vec()
    }

    #[test]
    fn test_series_is_increasing() {
        let data = series();
        assert_eq!(data.len(), SAMPLES);
        assert_approx_eq!(f64, data[0].1, 1.0);
        assert!(data.windows(2).all(|pair| pair[1].1 > pair[0].1));
    }

    #[test]
    fn test_scales_fill_plot_area() {
        let data = series();
        let (x, y) = scales(&data, 576.0, 328.0);
        assert_approx_eq!(f64, x.apply(100.0), 576.0);
        assert_approx_eq!(f64, y.apply(0.0), 328.0);
        assert_approx_eq!(f64, y.apply(f(100.0)), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_plot_starts_bottom_left() {
        let data = series();
        let (x, y) = scales(&data, 576.0, 328.0);
        let Primitive::Path(line) = plot(&data, &x, &y) else {
            panic!("expected a path");
        };
        let Some(PathEl::MoveTo(start)) = line.geometry.elements().first().copied() else {
            panic!("expected the curve to start with a move");
        };
        assert_approx_eq!(f64, start.x, 0.0);
        assert_approx_eq!(f64, start.y, y.apply(1.0));
        assert!(line.fill.is_none());
    }

    #[test]
    fn test_layout_groups() {
        let nodes = build(SIZE.width, SIZE.height);
        assert_eq!(nodes.len(), 2);
        let NodeDesc::Group { transform, .. } = &nodes[1] else {
            panic!("expected the x axis group");
        };
        assert_approx_eq!(f64, transform.translation.x, MARGIN_LEFT);
        assert_approx_eq!(f64, transform.translation.y, SIZE.height - MARGIN_BOTTOM);
    }

    #[test]
    fn test_axis_follows_viewport() {
        let nodes = build(SIZE.width * 2.0, SIZE.height);
        let NodeDesc::Group { children, .. } = &nodes[1] else {
            panic!("expected the x axis group");
        };
        let NodeDesc::Group { transform, .. } = children.last().unwrap() else {
            panic!("expected a tick group");
        };
        assert_approx_eq!(f64, transform.translation.x, 2.0 * SIZE.width - MARGIN_LEFT - MARGIN_RIGHT);
    }
}

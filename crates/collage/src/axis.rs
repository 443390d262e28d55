//! Axis rendering for scales.
//!
//! [`axis`] writes an axis into a [`SceneBuilder`]: one element for the
//! domain line and its outer ticks, then one group per tick, translated to
//! the tick position, holding the tick mark and its label. The axis is drawn
//! at the origin; place it by wrapping the call in a translated group.
//!
//! ```
//! use collage::{GroupTransform, SceneBuilder};
//! use collage::axis::{AxisConfig, Orient, axis};
//! use collage::scale::LinearScale;
//!
//! let scale = LinearScale::new((0.0, 1.0), (0.0, 300.0));
//! let mut scene = SceneBuilder::new();
//! scene.group(GroupTransform::translate(20.0, 280.0), |scene| {
//!     axis(scene, Orient::Bottom, &scale, &AxisConfig::default());
//! });
//! ```

use std::fmt::{self, Display};

use collage_core::{
    color::Color,
    draw::{
        FontDefinition, Primitive, StrokeDefinition, TextHAlign, TextVAlign, line, path, text,
    },
    geometry::Point,
};

use crate::{
    compose::SceneBuilder,
    group::GroupTransform,
    scale::{BandScale, LinearScale},
};

/// Which side of the axis line the ticks and labels go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Top,
    Right,
    Bottom,
    Left,
}

impl Orient {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Returns -1 for sides facing the origin, 1 otherwise.
    fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Right | Self::Bottom => 1.0,
        }
    }

    fn label_h_align(self) -> TextHAlign {
        match self {
            Self::Left => TextHAlign::Right,
            Self::Right => TextHAlign::Left,
            Self::Top | Self::Bottom => TextHAlign::Middle,
        }
    }

    fn label_v_align(self) -> TextVAlign {
        match self {
            Self::Top => TextVAlign::Baseline,
            Self::Bottom => TextVAlign::Hanging,
            Self::Left | Self::Right => TextVAlign::Middle,
        }
    }

    /// Maps an offset along the axis and one across it to a point.
    fn point(self, along: f64, across: f64) -> Point {
        if self.is_horizontal() {
            Point::new(along, across)
        } else {
            Point::new(across, along)
        }
    }
}

/// A scale an axis can be drawn for.
pub trait AxisScale {
    type Domain;

    /// Returns the position of a tick for `value` along the axis.
    fn position(&self, value: &Self::Domain) -> Option<f64>;

    /// Returns the tick values used when none are configured.
    fn default_ticks(&self) -> Vec<Self::Domain>;

    fn range_start(&self) -> f64;

    fn range_end(&self) -> f64;
}

impl AxisScale for LinearScale {
    type Domain = f64;

    fn position(&self, value: &f64) -> Option<f64> {
        Some(self.apply(*value))
    }

    fn default_ticks(&self) -> Vec<f64> {
        self.ticks(10)
    }

    fn range_start(&self) -> f64 {
        LinearScale::range_start(self)
    }

    fn range_end(&self) -> f64 {
        LinearScale::range_end(self)
    }
}

/// Ticks sit at the band center.
impl<D: Clone + PartialEq> AxisScale for BandScale<D> {
    type Domain = D;

    fn position(&self, value: &D) -> Option<f64> {
        let mut offset = (self.bandwidth() - 1.0).max(0.0) / 2.0;
        if self.is_round() {
            offset = offset.round();
        }
        self.apply(value).map(|start| start + offset)
    }

    fn default_ticks(&self) -> Vec<D> {
        self.domain().to_vec()
    }

    fn range_start(&self) -> f64 {
        BandScale::range_start(self)
    }

    fn range_end(&self) -> f64 {
        BandScale::range_end(self)
    }
}

/// Appearance of an axis.
///
/// Setting the axis or tick stroke to `None` omits those lines; setting the
/// font color to `None` omits the labels.
pub struct AxisConfig<D> {
    tick_values: Vec<D>,
    tick_size_inner: f64,
    tick_size_outer: f64,
    tick_padding: f64,
    axis_stroke: Option<StrokeDefinition>,
    tick_stroke: Option<StrokeDefinition>,
    font: FontDefinition,
    font_color: Option<Color>,
    tick_format: Box<dyn Fn(&D) -> String>,
}

impl<D: Display + 'static> Default for AxisConfig<D> {
    fn default() -> Self {
        Self::with_format(|value: &D| value.to_string())
    }
}

impl<D> AxisConfig<D> {
    /// Creates a default configuration that labels ticks with `format`.
    pub fn with_format(format: impl Fn(&D) -> String + 'static) -> Self {
        Self {
            tick_values: Vec::new(),
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            axis_stroke: Some(StrokeDefinition::default()),
            tick_stroke: Some(StrokeDefinition::default()),
            font: FontDefinition::default(),
            font_color: Some(Color::default()),
            tick_format: Box::new(format),
        }
    }

    /// Uses these tick values instead of the scale's defaults.
    pub fn with_tick_values(mut self, values: Vec<D>) -> Self {
        self.tick_values = values;
        self
    }

    /// Sets both the inner and outer tick sizes.
    pub fn with_tick_size(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self.tick_size_outer = size;
        self
    }

    pub fn with_tick_size_inner(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self
    }

    pub fn with_tick_size_outer(mut self, size: f64) -> Self {
        self.tick_size_outer = size;
        self
    }

    pub fn with_tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    pub fn with_axis_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.axis_stroke = stroke;
        self
    }

    pub fn with_tick_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.tick_stroke = stroke;
        self
    }

    pub fn with_font(mut self, font: FontDefinition) -> Self {
        self.font = font;
        self
    }

    pub fn with_font_color(mut self, color: Option<Color>) -> Self {
        self.font_color = color;
        self
    }

    pub fn with_tick_format(mut self, format: impl Fn(&D) -> String + 'static) -> Self {
        self.tick_format = Box::new(format);
        self
    }

    pub fn tick_values(&self) -> &[D] {
        &self.tick_values
    }

    pub fn tick_size_inner(&self) -> f64 {
        self.tick_size_inner
    }

    pub fn tick_size_outer(&self) -> f64 {
        self.tick_size_outer
    }

    pub fn tick_padding(&self) -> f64 {
        self.tick_padding
    }

    /// Formats a tick value as its label.
    pub fn format(&self, value: &D) -> String {
        (self.tick_format)(value)
    }
}

impl<D: fmt::Debug> fmt::Debug for AxisConfig<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisConfig")
            .field("tick_values", &self.tick_values)
            .field("tick_size_inner", &self.tick_size_inner)
            .field("tick_size_outer", &self.tick_size_outer)
            .field("tick_padding", &self.tick_padding)
            .field("axis_stroke", &self.axis_stroke)
            .field("tick_stroke", &self.tick_stroke)
            .field("font", &self.font)
            .field("font_color", &self.font_color)
            .finish_non_exhaustive()
    }
}

/// Writes an axis for `scale` into `scene`.
///
/// Each tick group is keyed by its label, so a recomposed axis reuses the
/// groups of labels it already showed.
pub fn axis<S: AxisScale>(
    scene: &mut SceneBuilder,
    orient: Orient,
    scale: &S,
    config: &AxisConfig<S::Domain>,
) {
    let sign = orient.sign();

    if let Some(stroke) = &config.axis_stroke {
        let start = scale.range_start();
        let end = scale.range_end();
        let outer = config.tick_size_outer * sign;
        let domain_line = path(|p| {
            p.fill = None;
            p.stroke = Some(stroke.clone());
            p.move_to(orient.point(start, outer));
            p.line_to(orient.point(start, 0.0));
            p.line_to(orient.point(end, 0.0));
            p.line_to(orient.point(end, outer));
        });
        scene.key("domain").elements([domain_line]);
    }

    let defaults;
    let values = if config.tick_values.is_empty() {
        defaults = scale.default_ticks();
        &defaults
    } else {
        &config.tick_values
    };

    let spacing = config.tick_size_inner.max(0.0) + config.tick_padding;
    for value in values {
        let Some(position) = scale.position(value) else {
            continue;
        };
        let label = config.format(value);

        let mut primitives: Vec<Primitive> = Vec::with_capacity(2);
        if let Some(stroke) = &config.tick_stroke {
            primitives.push(
                line(|l| {
                    l.end = orient.point(0.0, config.tick_size_inner * sign);
                    l.stroke = Some(stroke.clone());
                })
                .into(),
            );
        }
        if let Some(color) = config.font_color {
            primitives.push(
                text(|t| {
                    t.content = label.clone();
                    t.position = orient.point(0.0, spacing * sign);
                    t.color = color;
                    t.font = config.font.clone();
                    t.h_align = orient.label_h_align();
                    t.v_align = orient.label_v_align();
                })
                .into(),
            );
        }

        let offset = orient.point(position, 0.0);
        scene
            .key(format!("tick:{label}"))
            .group(GroupTransform::translate(offset.x, offset.y), |scene| {
                scene.elements(primitives);
            });
    }
}

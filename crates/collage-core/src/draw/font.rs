//! Font selection and text alignment.

use std::str::FromStr;

/// The font family a text primitive is shaped with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
    /// A concrete family name such as `"DejaVu Sans"`.
    Named(String),
}

impl FontFamily {
    /// Returns the CSS `font-family` value.
    pub fn to_svg_value(&self) -> &str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }

    pub(crate) fn to_cosmic(&self) -> cosmic_text::Family<'_> {
        match self {
            Self::SansSerif => cosmic_text::Family::SansSerif,
            Self::Serif => cosmic_text::Family::Serif,
            Self::Monospace => cosmic_text::Family::Monospace,
            Self::Named(name) => cosmic_text::Family::Name(name),
        }
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("font family must not be empty".to_string()),
            "sans-serif" => Ok(Self::SansSerif),
            "serif" => Ok(Self::Serif),
            "monospace" => Ok(Self::Monospace),
            name => Ok(Self::Named(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }

    pub(crate) fn to_cosmic(self) -> cosmic_text::Weight {
        match self {
            Self::Normal => cosmic_text::Weight::NORMAL,
            Self::Bold => cosmic_text::Weight::BOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontPosture {
    #[default]
    Normal,
    Italic,
}

impl FontPosture {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Italic => "italic",
        }
    }

    pub(crate) fn to_cosmic(self) -> cosmic_text::Style {
        match self {
            Self::Normal => cosmic_text::Style::Normal,
            Self::Italic => cosmic_text::Style::Italic,
        }
    }
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextHAlign {
    /// The run starts at the position.
    #[default]
    Left,
    /// The run is centered on the position.
    Middle,
    /// The run ends at the position.
    Right,
}

impl TextHAlign {
    /// Returns the SVG `text-anchor` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Left => "start",
            Self::Middle => "middle",
            Self::Right => "end",
        }
    }

    /// Returns the horizontal offset of the run origin for a run of `width`.
    pub fn offset(self, width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Middle => -width / 2.0,
            Self::Right => -width,
        }
    }
}

/// Vertical anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextVAlign {
    /// The position lies on the alphabetic baseline.
    #[default]
    Baseline,
    /// The position lies on the top of the em box.
    Hanging,
    /// The position lies halfway between ascent and descent.
    Middle,
}

impl TextVAlign {
    /// Returns the SVG `dominant-baseline` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Baseline => "alphabetic",
            Self::Hanging => "hanging",
            Self::Middle => "central",
        }
    }

    /// Returns the distance from the anchor position down to the baseline
    /// for text of `font_size`.
    ///
    /// Fonts are assumed to ascend 0.8 em above the baseline and descend
    /// 0.2 em below it.
    pub fn baseline_shift(self, font_size: f64) -> f64 {
        match self {
            Self::Baseline => 0.0,
            Self::Hanging => 0.8 * font_size,
            Self::Middle => 0.3 * font_size,
        }
    }
}

/// Font attributes shared by every text primitive.
///
/// # Examples
///
/// ```
/// use collage_core::draw::{FontDefinition, FontFamily, FontWeight};
///
/// let font = FontDefinition::default()
///     .with_family(FontFamily::Monospace)
///     .with_weight(FontWeight::Bold)
///     .with_size(16.0);
/// assert_eq!(font.size(), 16.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontDefinition {
    family: FontFamily,
    size: f64,
    weight: FontWeight,
    posture: FontPosture,
}

impl FontDefinition {
    pub fn new(family: FontFamily, size: f64) -> Self {
        Self {
            family,
            size,
            ..Self::default()
        }
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Returns the font size in scene units.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn posture(&self) -> FontPosture {
        self.posture
    }

    pub fn set_family(&mut self, family: FontFamily) {
        self.family = family;
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    pub fn set_posture(&mut self, posture: FontPosture) {
        self.posture = posture;
    }

    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_posture(mut self, posture: FontPosture) -> Self {
        self.posture = posture;
        self
    }

    pub(crate) fn to_attrs(&self) -> cosmic_text::Attrs<'_> {
        cosmic_text::Attrs::new()
            .family(self.family.to_cosmic())
            .weight(self.weight.to_cosmic())
            .style(self.posture.to_cosmic())
    }
}

impl Default for FontDefinition {
    fn default() -> Self {
        Self {
            family: FontFamily::default(),
            size: 12.0,
            weight: FontWeight::default(),
            posture: FontPosture::default(),
        }
    }
}

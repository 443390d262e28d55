//! Basic shapes and styled text.

use collage::{
    GroupTransform, SceneBuilder,
    color::Color,
    draw::{
        FontDefinition, FontFamily, FontPosture, FontWeight, Primitive, StrokeDefinition,
        TextHAlign, TextVAlign, circle, line, rect, text,
    },
    geometry::{Point, Size},
};

pub const SIZE: Size = Size::new(360.0, 360.0);

const POEM: [&str; 8] = [
    "From childhood’s hour I have not been",
    "As others were—I have not seen",
    "As others saw—I could not bring",
    "My passions from a common spring—",
    "From the same source I have not taken",
    "My sorrow—I could not awaken",
    "My heart to joy at the same tone—",
    "And all I lov’d—I lov’d alone—",
];

const TEXT_SIZE: f64 = 12.0;

fn shapes() -> Vec<Primitive> {
    vec![
        circle(|c| {
            c.radius = 32.0;
            c.fill = Some(Color::rgb(0, 0, 255));
        })
        .into(),
        circle(|c| {
            c.center = Point::new(36.0, 36.0);
            c.radius = 24.0;
            c.fill = Some(Color::rgb(255, 0, 0));
        })
        .into(),
        line(|l| {
            l.start = Point::new(1.0, 1.0);
            l.end = Point::new(70.0, 70.0);
            l.stroke = Some(StrokeDefinition::solid(Color::rgb(0, 255, 255), 12.0));
        })
        .into(),
        rect(|r| {
            r.size = Size::new(200.0, 200.0);
            r.fill = None;
            r.stroke = Some(StrokeDefinition::solid(Color::rgb(70, 130, 180), 8.0));
        })
        .into(),
    ]
}

fn poem() -> Vec<Primitive> {
    let font = FontDefinition::new(FontFamily::Monospace, TEXT_SIZE)
        .with_weight(FontWeight::Bold)
        .with_posture(FontPosture::Italic);

    POEM.iter()
        .enumerate()
        .map(|(index, verse)| {
            text(|t| {
                t.content = (*verse).to_string();
                t.position = Point::new(0.0, TEXT_SIZE + TEXT_SIZE * index as f64);
                t.color = Color::rgb(255, 215, 0);
                t.font = font.clone();
                t.h_align = TextHAlign::Left;
                t.v_align = TextVAlign::Baseline;
            })
            .into()
        })
        .collect()
}

/// Returns the content of the basic sample.
pub fn scene() -> impl FnMut(&mut SceneBuilder, f64, f64) + 'static {
    let shapes = shapes();
    let poem = poem();
    move |scene, _, _| {
        scene.group(GroupTransform::translate(16.0, 16.0), |scene| {
            scene.elements(shapes.iter().cloned());
            scene.group(GroupTransform::translate(64.0, 160.0), |scene| {
                scene.elements(poem.iter().cloned());
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_layout() {
        let mut content = scene();
        let mut builder = SceneBuilder::new();
        content(&mut builder, SIZE.width, SIZE.height);
        let desc = builder.build();

        assert_eq!(desc.children().len(), 1);
        assert_eq!(shapes().len(), 4);
        assert_eq!(poem().len(), POEM.len());
    }
}

//! Integration tests for the retained scene tree.
//!
//! These tests drive the tree through its public operations and check what
//! ends up drawn and how often the root rasterizes.

use std::{cell::Cell, rc::Rc};

use float_cmp::assert_approx_eq;

use collage::{
    Applier, Composer, ElementNode, GroupNode, GroupTransform, NodeKind, NodeUpdate, RootNode,
    SceneApplier, SceneBuilder, SceneNode, TreeOp,
    color::Color,
    draw::{Primitive, circle, rect},
    geometry::{Point, Size},
    surface::{DrawOp, RecordingSurface},
};

fn red_square(side: f64) -> Primitive {
    rect(|r| {
        r.size = Size::new(side, side);
        r.fill = Some(Color::rgb(255, 0, 0));
    })
    .into()
}

fn element(primitives: Vec<Primitive>) -> SceneNode {
    let mut element = ElementNode::new();
    element.set_primitives(primitives);
    element.into()
}

fn counting_listener(root: &mut RootNode) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    root.set_invalidate_listener(Some(Rc::new(move || seen.set(seen.get() + 1))));
    count
}

#[test]
fn test_unchanged_tree_renders_once() {
    let mut root = RootNode::new(Size::new(50.0, 50.0));
    root.root_group_mut().insert_at(0, element(vec![red_square(50.0)]));

    let mut surface = RecordingSurface::new(Size::new(50.0, 50.0));
    for _ in 0..10 {
        root.draw(&mut surface, Size::new(50.0, 50.0)).unwrap();
    }
    assert_eq!(root.render_count(), 1);
}

#[test]
fn test_viewport_scales_to_output() {
    let mut root = RootNode::new(Size::new(100.0, 100.0));
    root.root_group_mut().insert_at(0, element(vec![red_square(100.0)]));

    let image = root.render(Size::new(200.0, 200.0)).unwrap();
    assert_eq!((image.width(), image.height()), (200, 200));
    assert_eq!(image.pixel(150, 150).unwrap().to_rgba8(), [255, 0, 0, 255]);
    assert_approx_eq!(f64, root.root_group().scale().x, 2.0);
}

#[test]
fn test_deep_change_notifies_listener_once() {
    let mut innermost = GroupNode::new();
    innermost.insert_at(0, element(vec![red_square(4.0)]));
    let mut tree = innermost;
    for _ in 0..4 {
        let mut parent = GroupNode::new();
        parent.insert_at(0, tree.into());
        tree = parent;
    }

    let mut root = RootNode::new(Size::new(10.0, 10.0));
    root.root_group_mut().insert_at(0, tree.into());
    root.render(Size::new(10.0, 10.0)).unwrap();
    let count = counting_listener(&mut root);

    let mut applier = SceneApplier::new(root.root_group_mut());
    for _ in 0..5 {
        applier.down(0);
    }
    applier.down(0);
    applier.apply(TreeOp::Update(NodeUpdate::Primitives(vec![red_square(8.0)])));

    assert_eq!(count.get(), 1);
    assert!(root.is_dirty());
    root.render(Size::new(10.0, 10.0)).unwrap();
    assert_eq!(root.render_count(), 2);
}

#[test]
fn test_remove_range_past_end_removes_what_exists() {
    let mut group = GroupNode::new();
    for i in 0..3 {
        group.insert_at(i, element(vec![red_square(1.0)]));
    }
    let removed = group.remove_range(2, 10);
    assert_eq!(removed.len(), 1);
    assert_eq!(group.len(), 2);
}

#[test]
fn test_rotation_about_pivot() {
    let mut group = GroupNode::new();
    group.set_transform(
        GroupTransform::default()
            .with_rotation(90.0)
            .with_pivot(Point::new(10.0, 10.0)),
    );
    group.insert_at(
        0,
        element(vec![
            circle(|c| {
                c.center = Point::new(10.0, 0.0);
                c.radius = 1.0;
            })
            .into(),
        ]),
    );

    let mut surface = RecordingSurface::new(Size::new(20.0, 20.0));
    group.draw(&mut surface);
    let DrawOp::Circle(transform, circle) = &surface.ops()[0] else {
        panic!("expected a circle");
    };
    let center = *transform * circle.center;
    assert_approx_eq!(f64, center.x, 20.0, epsilon = 1e-9);
    assert_approx_eq!(f64, center.y, 10.0, epsilon = 1e-9);
}

#[test]
fn test_composed_tree_matches_scene() {
    let mut builder = SceneBuilder::new();
    builder.key("a").elements([red_square(1.0)]);
    builder.group(GroupTransform::translate(5.0, 5.0), |scene| {
        scene.elements([red_square(2.0)]);
    });
    builder.key("b").elements([red_square(3.0)]);

    let mut composer = Composer::new();
    let mut root = RootNode::new(Size::new(10.0, 10.0));
    SceneApplier::new(root.root_group_mut()).apply_all(composer.compose(builder.build()));

    let kinds: Vec<NodeKind> = root
        .root_group()
        .children()
        .iter()
        .map(SceneNode::kind)
        .collect();
    assert_eq!(kinds, [NodeKind::Element, NodeKind::Group, NodeKind::Element]);

    // Swapping the keyed elements moves the existing nodes
    let mut builder = SceneBuilder::new();
    builder.key("b").elements([red_square(3.0)]);
    builder.group(GroupTransform::translate(5.0, 5.0), |scene| {
        scene.elements([red_square(2.0)]);
    });
    builder.key("a").elements([red_square(1.0)]);
    let ops = composer.compose(builder.build());
    assert!(ops.iter().all(|op| matches!(op, TreeOp::Move(..))));

    SceneApplier::new(root.root_group_mut()).apply_all(ops);
    let first = root.root_group().children()[0].as_element().unwrap();
    assert_eq!(first.primitives(), [red_square(3.0)]);
}

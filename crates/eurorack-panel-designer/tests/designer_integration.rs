//! Integration tests for panel editing, hit testing and hole layout

use eurorack_panel_designer::{
    compute_nearest_element_distances, find_element_at_point, find_elements_in_rect,
    generate_mounting_holes, project_panel_point, screen_point_to_panel, Bounds,
    ElementMountingHoleConfig, HoleShape, MountingHoleConfig, PanelDimensions, PanelElement,
    PanelModel, Point, Viewport,
};

fn ten_hp() -> PanelModel {
    PanelModel::new(PanelDimensions::from_hp(10, 5.08))
}

#[test]
fn test_single_segment_panel_has_four_circle_holes() {
    let model = ten_hp();
    let holes = model.mounting_holes();
    assert_eq!(holes.len(), 4);
    for hole in &holes {
        assert_eq!(hole.diameter_mm, 3.2);
        assert_eq!(hole.shape, HoleShape::Circle);
    }
    // Top then bottom for each X
    assert_eq!(holes[0].center.x, holes[1].center.x);
    assert_eq!(holes[0].center.y, 3.0);
    assert_eq!(holes[1].center.y, 128.5 - 3.0);
}

#[test]
fn test_hole_count_scales_with_segments() {
    let config = MountingHoleConfig::default();
    for k in 1..=8u32 {
        let dims = PanelDimensions::from_hp(k * config.spacing_hp, 5.08);
        let holes = generate_mounting_holes(&dims, &config);
        assert_eq!(holes.len(), 4 * k as usize, "{} segments", k);
    }
}

#[test]
fn test_nearest_distances() {
    let jack_at = |id: &str, x: f64| {
        let mut jack = PanelElement::jack(Point::new(x, 0.0), 3.5);
        jack.id = id.to_string();
        jack
    };
    let elements = vec![jack_at("a", 0.0), jack_at("b", 10.0), jack_at("c", 5.0)];
    let nearest = compute_nearest_element_distances(Point::new(0.0, 0.0), &elements, 2);
    assert_eq!(nearest.len(), 2);
    assert_eq!(nearest[0].id, "a");
    assert!(nearest[0].distance.abs() < 1e-9);
    assert_eq!(nearest[1].id, "c");
    assert!((nearest[1].distance - 5.0).abs() < 1e-9);
}

#[test]
fn test_satellite_hole_radius() {
    let mut model = ten_hp();
    model.element_hole_config = ElementMountingHoleConfig {
        enabled: true,
        count: 3,
        diameter_mm: 2.0,
        offset_mm: 3.0,
        rotation_deg: 15.0,
    };
    let jack = PanelElement::jack(Point::new(25.0, 60.0), 8.0).rotated_to(40.0);
    let model = model.with_element_added(jack);
    let holes = model.element_mounting_holes();
    assert_eq!(holes.len(), 3);
    for hole in holes {
        assert!((hole.center.distance_to(&Point::new(25.0, 60.0)) - 8.0).abs() < 1e-9);
        assert_eq!(hole.diameter_mm, 2.0);
    }
}

#[test]
fn test_hit_test_prefers_topmost() {
    let a = PanelElement::rectangle(Point::new(20.0, 50.0), 20.0, 20.0);
    let b = PanelElement::jack(Point::new(25.0, 50.0), 10.0);
    let model = ten_hp().with_element_added(a.clone()).with_element_added(b.clone());

    let hit = find_element_at_point(Point::new(24.0, 50.0), &model.elements);
    assert_eq!(hit.map(|e| e.id.as_str()), Some(b.id.as_str()));

    let hit = find_element_at_point(Point::new(12.0, 42.0), &model.elements);
    assert_eq!(hit.map(|e| e.id.as_str()), Some(a.id.as_str()));

    assert!(find_element_at_point(Point::new(45.0, 120.0), &model.elements).is_none());
}

#[test]
fn test_marquee_selects_overlapping_elements() {
    let a = PanelElement::jack(Point::new(10.0, 20.0), 6.0);
    let b = PanelElement::slot(Point::new(30.0, 20.0), 10.0, 3.0).rotated_to(90.0);
    let c = PanelElement::label(Point::new(25.0, 100.0), "GATE", 8.0);
    let model = ten_hp()
        .with_element_added(a.clone())
        .with_element_added(b.clone())
        .with_element_added(c);

    let selected = find_elements_in_rect(&Bounds::new(0.0, 10.0, 40.0, 30.0), &model.elements);
    assert_eq!(selected, vec![a.id.as_str(), b.id.as_str()]);
}

#[test]
fn test_edits_do_not_mutate_input() {
    let model = ten_hp();
    let jack = PanelElement::jack(Point::new(10.0, 10.0), 6.0);
    let id = jack.id.clone();
    let with_jack = model.with_element_added(jack);
    let moved = with_jack.with_element_moved(&id, Point::new(20.0, 30.0));
    let rotated = moved.with_element_rotated(&id, -90.0);

    assert!(model.elements.is_empty());
    assert_eq!(with_jack.elements[0].position_mm, Point::new(10.0, 10.0));
    assert_eq!(moved.elements[0].position_mm, Point::new(20.0, 30.0));
    assert_eq!(rotated.elements[0].rotation_deg, 270.0);
    assert!(rotated.with_element_removed(&id).elements.is_empty());
}

#[test]
fn test_viewport_roundtrip_through_screen_space() {
    let mut viewport = Viewport::new();
    let canvas = Point::new(800.0, 600.0);
    let panel = ten_hp().dimensions.size_mm();

    viewport.zoom_at(Point::new(400.0, 300.0), 2.0, canvas, panel);
    viewport.pan_by(15.0, -5.0);
    let transform = viewport.transform(canvas, panel);

    let p = Point::new(12.5, 80.0);
    let screen = project_panel_point(p, &transform);
    let back = screen_point_to_panel(screen, &transform).unwrap();
    assert!(back.distance_to(&p) < 1e-9);
}

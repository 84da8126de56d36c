//! End-to-end export and project file tests

use std::collections::HashMap;
use std::io::Cursor;

use eurorack_panel_core::constants::MIN_CIRCLE_SEGMENTS;
use eurorack_panel_core::{ExportError, SchemaError, SerializationError};
use eurorack_panel_designer::{
    build_kicad_pcb, build_panel_stl, deserialize_panel_model, export_panel,
    parse_serialized_panel, serialize_panel_model, ExportFormat, ExportOptions, HoleShape,
    ElementMountingHoleConfig, MountingHoleConfig, PanelDimensions, PanelElement, PanelModel, Point,
};

fn demo_panel() -> PanelModel {
    PanelModel::new(PanelDimensions::from_width_cm(6.0, None, 5.08))
        .with_element_added(PanelElement::jack(Point::new(10.0, 100.0), 6.0))
        .with_element_added(PanelElement::jack(Point::new(25.0, 100.0), 6.0))
        .with_element_added(PanelElement::potentiometer(Point::new(18.0, 50.0), 9.5))
        .with_element_added(PanelElement::switch(Point::new(18.0, 75.0), 5.0, 10.0))
        .with_element_added(PanelElement::label(Point::new(18.0, 20.0), "VCO", 10.0))
}

#[test]
fn test_kicad_segment_lower_bound() {
    let model = demo_panel();
    let holes = model.mounting_holes();
    let pcb = build_kicad_pcb(&model, &holes);

    let circular = holes.len() + 3;
    let segments = pcb.matches("(gr_line").count();
    assert!(segments >= 4 + 4 + MIN_CIRCLE_SEGMENTS * circular);
    assert!(pcb.starts_with("(kicad_pcb (version 20231126) (generator \"eurorack-panel-designer\")"));
}

/// Every undirected edge of a closed solid borders exactly two facets.
fn assert_closed_solid(stl: &str) {
    let mesh = stl_io::read_stl(&mut Cursor::new(stl.as_bytes())).unwrap();
    let mut edge_use: HashMap<(usize, usize), usize> = HashMap::new();
    for face in &mesh.faces {
        let [a, b, c] = face.vertices;
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edge_use.entry((u.min(v), u.max(v))).or_default() += 1;
        }
    }
    let open = edge_use.values().filter(|&&count| count != 2).count();
    assert_eq!(open, 0, "{} edges are not shared by exactly two facets", open);
}

#[test]
fn test_stl_reads_back() {
    let model = demo_panel();
    let stl = build_panel_stl(&model, &model.mounting_holes(), 2.0).unwrap();
    assert!(stl.starts_with("solid eurorack_panel"));
    assert!(stl.trim_end().ends_with("endsolid eurorack_panel"));

    let mesh = stl_io::read_stl(&mut Cursor::new(stl.as_bytes())).unwrap();
    assert!(!mesh.faces.is_empty());
    for v in &mesh.vertices {
        assert!(v[2] >= 0.0 && v[2] <= 2.0);
        assert!(v[0] >= 0.0 && v[0] as f64 <= model.dimensions.width_mm + 1e-3);
        assert!(v[1] >= 0.0 && v[1] as f64 <= model.dimensions.height_mm + 1e-3);
    }
    assert_closed_solid(&stl);
}

#[test]
fn test_stl_is_closed_for_varied_panels() {
    let plain = PanelModel::new(PanelDimensions::from_hp(12, 5.08));
    let single_jack = PanelModel::new(PanelDimensions::from_hp(4, 5.08))
        .with_element_added(PanelElement::jack(Point::new(10.16, 60.0), 6.0));
    let mut satellites = demo_panel();
    satellites.element_hole_config = ElementMountingHoleConfig {
        enabled: true,
        count: 3,
        ..ElementMountingHoleConfig::default()
    };
    let satellites = satellites
        .with_element_added(PanelElement::potentiometer(Point::new(18.0, 35.0), 7.0).with_mounting_holes(true));
    let mut slots = PanelModel::new(PanelDimensions::from_hp(20, 5.08));
    slots.mounting_hole_config = MountingHoleConfig {
        shape: HoleShape::Slot,
        ..MountingHoleConfig::default()
    };
    let shapes = PanelModel::new(PanelDimensions::from_hp(16, 5.08))
        .with_element_added(PanelElement::oval(Point::new(15.0, 30.0), 8.0, 4.0).rotated_to(33.0))
        .with_element_added(PanelElement::triangle(Point::new(40.0, 30.0), 7.0, 6.0).rotated_to(-12.5))
        .with_element_added(PanelElement::slot(Point::new(25.0, 70.0), 3.0, 14.0).rotated_to(45.0))
        .with_element_added(PanelElement::rectangle(Point::new(50.0, 90.0), 10.0, 5.0).rotated_to(10.0))
        .with_element_added(PanelElement::led(Point::new(61.3, 111.7), 3.0));
    let mut jacks = PanelModel::new(PanelDimensions::from_hp(14, 5.08));
    for row in 0..5 {
        for column in 0..4 {
            let center = Point::new(9.7 + column as f64 * 16.3, 25.1 + row as f64 * 19.9);
            jacks = jacks.with_element_added(PanelElement::jack(center, 6.2));
        }
    }

    for model in [plain, single_jack, satellites, slots, shapes, jacks, demo_panel()] {
        let stl = build_panel_stl(&model, &model.mounting_holes(), 1.6).unwrap();
        assert_closed_solid(&stl);
    }
}

#[test]
fn test_stl_leaves_out_cutouts_on_the_edge() {
    let model = PanelModel::new(PanelDimensions::from_hp(8, 5.08))
        .with_element_added(PanelElement::jack(Point::new(0.0, 60.0), 6.0))
        .with_element_added(PanelElement::jack(Point::new(20.0, 60.0), 6.0));
    let stl = build_panel_stl(&model, &model.mounting_holes(), 2.0).unwrap();

    let mesh = stl_io::read_stl(&mut Cursor::new(stl.as_bytes())).unwrap();
    let min_x = mesh.vertices.iter().map(|v| v[0]).fold(f32::INFINITY, f32::min);
    assert!(min_x >= 0.0, "mesh reaches x = {}", min_x);
    assert_closed_solid(&stl);
}

#[test]
fn test_stl_with_slot_holes() {
    let mut model = demo_panel();
    model.mounting_hole_config = MountingHoleConfig {
        shape: HoleShape::Slot,
        ..MountingHoleConfig::default()
    };
    let model = model.with_element_added(PanelElement::slot(Point::new(18.0, 110.0), 3.0, 12.0));
    let stl = export_panel(&model, ExportFormat::Stl, &ExportOptions { thickness_mm: 3.0 }).unwrap();
    let mesh = stl_io::read_stl(&mut Cursor::new(stl.as_bytes())).unwrap();
    assert!(mesh.faces.len() > 12);
}

#[test]
fn test_export_rejects_bad_thickness() {
    let model = demo_panel();
    let err = export_panel(&model, ExportFormat::Stl, &ExportOptions { thickness_mm: 0.0 })
        .unwrap_err();
    assert!(matches!(err, ExportError::InvalidThickness { .. }));

    // Other formats ignore the thickness
    assert!(export_panel(&model, ExportFormat::Svg, &ExportOptions { thickness_mm: 0.0 }).is_ok());
}

#[test]
fn test_every_format_exports() {
    let model = demo_panel();
    let options = ExportOptions::for_model(&model);
    for format in ExportFormat::ALL {
        let output = export_panel(&model, format, &options).unwrap();
        assert!(!output.is_empty(), "{} export is empty", format);
    }
}

#[test]
fn test_json_export_roundtrip() {
    let model = demo_panel()
        .with_element_added(PanelElement::oval(Point::new(12.0, 30.0), 6.0, 3.0).rotated_to(20.0))
        .with_element_added(PanelElement::triangle(Point::new(24.0, 30.0), 5.0, 5.0));
    let json = export_panel(&model, ExportFormat::Json, &ExportOptions::default()).unwrap();
    assert_eq!(deserialize_panel_model(&json).unwrap(), model);
    assert_eq!(
        deserialize_panel_model(&serialize_panel_model(&model).unwrap()).unwrap(),
        model
    );
}

#[test]
fn test_malformed_imports_are_schema_errors() {
    let err = parse_serialized_panel("{}").unwrap_err();
    assert!(err.is_schema_error());

    let future = r#"{"version": 99, "model": {}}"#;
    let err = parse_serialized_panel(future).unwrap_err();
    assert!(matches!(
        err,
        SerializationError::Schema(SchemaError::UnsupportedVersion { found: 99, .. })
    ));

    let wrong_type = r#"{"version": 2, "model": {"dimensions": 5}}"#;
    assert!(parse_serialized_panel(wrong_type).unwrap_err().is_schema_error());
}

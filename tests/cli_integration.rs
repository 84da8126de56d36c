//! Integration tests for the command-line workflow

use std::path::PathBuf;

use eurorack_panel::cli::{describe_panel, export_project, new_panel};
use eurorack_panel::{load_project, save_project, Config, PanelElement, Point};

fn temp_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.export.output_directory = dir.path().to_path_buf();
    config
}

#[test]
fn test_new_then_export_every_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_config(&dir);
    let project = dir.path().join("vco.json");

    let model = new_panel(&config, Some(5.0), None)
        .with_element_added(PanelElement::jack(Point::new(12.0, 100.0), 6.0));
    save_project(&project, &model).unwrap();

    for (format, expected) in [
        ("svg", "vco.svg"),
        ("kicad-svg", "vco.edge-cuts.svg"),
        ("kicad-pcb", "vco.kicad_pcb"),
        ("stl", "vco.stl"),
    ] {
        let written = export_project(&config, &project, Some(format), None, None)
            .unwrap()
            .unwrap();
        assert_eq!(written, dir.path().join(expected));
        assert!(std::fs::metadata(&written).unwrap().len() > 0);
    }

    let stl = std::fs::read_to_string(dir.path().join("vco.stl")).unwrap();
    assert!(stl.starts_with("solid eurorack_panel"));
}

#[test]
fn test_export_uses_default_format_and_explicit_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_config(&dir);
    let project = dir.path().join("panel.json");
    save_project(&project, &new_panel(&config, None, None)).unwrap();

    let out = dir.path().join("custom.svg");
    let written = export_project(&config, &project, None, Some(out.clone()), None).unwrap();
    assert_eq!(written, Some(out.clone()));
    assert!(std::fs::read_to_string(out).unwrap().starts_with("<svg"));
}

#[test]
fn test_export_errors() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_config(&dir);
    let project = dir.path().join("panel.json");
    save_project(&project, &new_panel(&config, None, None)).unwrap();

    assert!(export_project(&config, &project, Some("dxf"), None, None).is_err());
    assert!(export_project(&config, &project, Some("stl"), None, Some(-1.0)).is_err());
    assert!(!dir.path().join("panel.stl").exists());

    let missing = PathBuf::from(dir.path()).join("missing.json");
    assert!(export_project(&config, &missing, Some("svg"), None, None).is_err());
}

#[test]
fn test_info_summary_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("info.json");
    let model = new_panel(&Config::default(), Some(10.16), None);
    save_project(&project, &model).unwrap();

    let loaded = load_project(&project).unwrap();
    let text = describe_panel(&loaded);
    assert!(text.starts_with("Panel: 20 HP"));
    assert!(text.contains("Mounting holes: 8"));
}

use sector_types::*;

#[test]
fn design_range_is_strictly_ascending() {
    let range = DesignRange::default();
    let designs: Vec<_> = range.designs().collect();

    assert_eq!(designs.len(), 8);
    assert_eq!(designs[0], (1, DesignName::indexed("P", 1)));
    assert_eq!(designs[7].1.as_str(), "P8");
    assert!(designs.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn design_range_contains_only_its_members() {
    let range = DesignRange::default();
    assert!(range.contains(&"P4".parse().unwrap()));
    assert!(!range.contains(&"P0".parse().unwrap()));
    assert!(!range.contains(&"P9".parse().unwrap()));
}

#[test]
fn design_list_is_inclusive() {
    let list = design_list("P", 0, 9);
    assert_eq!(list.len(), 10);
    assert_eq!(list.first().unwrap().as_str(), "P0");
    assert_eq!(list.last().unwrap().as_str(), "P9");
}

#[test]
fn design_name_rejects_empty_and_separators() {
    assert_eq!("  ".parse::<DesignName>(), Err(DesignNameError::Empty));
    assert!(matches!(
        "a/b".parse::<DesignName>(),
        Err(DesignNameError::PathSeparator { .. })
    ));
}

#[test]
fn design_name_ordinal_and_file_name() {
    let name = DesignName::indexed("P", 12);
    assert_eq!(name.ordinal(), Some(12));
    assert_eq!(name.file_name("x_b"), "P12.x_b");
    assert_eq!("Base".parse::<DesignName>().unwrap().ordinal(), None);
}

#[test]
fn design_name_serializes_as_plain_string() {
    let name = DesignName::indexed("P", 3);
    let json = serde_json::to_string(&name).unwrap();
    assert_eq!(json, "\"P3\"");
    let back: DesignName = serde_json::from_str(&json).unwrap();
    assert_eq!(back, name);
    assert!(serde_json::from_str::<DesignName>("\"\"").is_err());
}

#[test]
fn default_import_options_enable_every_format() {
    let options = ImportOptions::default();
    assert!(CadFormat::ALL.iter().all(|f| options.accepts(*f)));
    assert_eq!(options.density, TessellationDensity::Coarse);
    assert_eq!(CadFormat::from_extension("X_B"), Some(CadFormat::Parasolid));
}

#[test]
fn default_export_is_full_fidelity() {
    let options = ExportOptions::default();
    assert!(options.is_full_fidelity());
    assert_eq!(options.precision, "0");
}

#[test]
fn camera_pose_bit_identity() {
    let a = CameraPose::default();
    let mut b = a;
    assert!(a.bit_identical(&b));
    b.magnification = f64::from_bits(a.magnification.to_bits() + 1);
    assert!(!a.bit_identical(&b));
}

#[test]
fn default_image_is_full_hd() {
    let image = ImageRequest::default();
    assert_eq!((image.width, image.height), (1920, 1080));
}

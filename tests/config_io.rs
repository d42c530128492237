use approx::assert_relative_eq;
use fullback::{Curve, Jet, JetConfig, SimError};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn config_round_trips_through_yaml() {
    let mut config = JetConfig::default();
    config.name = "testbed".into();
    config.mass.empty_mass = 21000.0;
    config.geometry.span_efficiency = 0.8;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jet.yaml");
    config.save(&path).unwrap();
    let loaded = JetConfig::load(&path).unwrap();

    assert_eq!(loaded.name, "testbed");
    assert_relative_eq!(loaded.mass.empty_mass, 21000.0);
    assert_relative_eq!(loaded.geometry.span_efficiency, 0.8);
    assert_eq!(
        loaded.geometry.main_wing.sections.len(),
        config.geometry.main_wing.sections.len()
    );
}

#[test]
fn load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jet.yaml");

    let mut config = JetConfig::default();
    config.initial.fuel_fraction = 2.0;
    config.save(&path).unwrap();

    assert!(matches!(
        JetConfig::load(&path),
        Err(SimError::InvalidConfig(_))
    ));
}

#[test]
fn load_rejects_malformed_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mass: [not, a, mapping]").unwrap();

    assert!(matches!(
        JetConfig::load(file.path()),
        Err(SimError::SerializationError(_))
    ));
}

#[test]
fn missing_config_file_is_an_io_error() {
    assert!(matches!(
        JetConfig::load("/nonexistent/jet.yaml"),
        Err(SimError::Io(_))
    ));
}

#[test]
fn shipped_lift_curve_assembles_the_default_jet() {
    // the default config points at the curve file shipped in data/
    let jet = Jet::new(JetConfig::default()).unwrap();
    assert_relative_eq!(jet.fuel_fraction(), 1.0);

    let curve = Curve::from_file("data/su34_lift_aoa.txt").unwrap();
    // normalized samples peak at full scale
    assert_relative_eq!(curve.sample(0.75).unwrap(), 1.0, epsilon = 1e-6);
    assert_relative_eq!(curve.sample(0.5).unwrap(), 0.5, epsilon = 1e-6);
}

#[test]
fn missing_curve_file_fails_assembly() {
    let mut config = JetConfig::default();
    config.lift_curve_path = "/nonexistent/curve.txt".into();

    assert!(matches!(Jet::new(config), Err(SimError::AssetError(_))));
}

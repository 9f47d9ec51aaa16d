use figment::Jail;
use obe_config::ObeConfig;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("OBE_GENERAL__DATASET", "from-env.json");
        jail.set_env("OBE_ATTAINMENT__TARGET_PERCENTAGE", "65");

        let config = ObeConfig::load().expect("config loads");
        assert_eq!(config.general.dataset, "from-env.json");
        assert!((config.attainment.target_percentage - 65.0).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".obe")?;
        jail.create_file(
            ".obe/config.toml",
            r#"
[general]
precision = 1
"#,
        )?;
        jail.set_env("OBE_GENERAL__PRECISION", "4");

        let config = ObeConfig::load().expect("config loads");
        assert_eq!(config.general.precision, 4);
        Ok(())
    });
}

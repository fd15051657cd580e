use figment::Jail;
use pretty_assertions::assert_eq;
use press_config::PressConfig;

#[test]
fn project_toml_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_dir(".press")?;
        jail.create_file(
            ".press/config.toml",
            r#"
[community]
name = "founders"
idea_count = 3

[session]
user_id = "u-123"

[cleaner]
strip_title = false
extra_patterns = ["patterns/custom.toml"]
"#,
        )?;

        let config = PressConfig::load().expect("config loads");
        assert_eq!(config.community.name, "founders");
        assert_eq!(config.community.idea_count, 3);
        assert_eq!(config.session.user_id, "u-123");
        assert_eq!(config.session.app_id, "default-app-id");
        assert!(!config.cleaner.strip_title);
        assert_eq!(config.cleaner.extra_patterns.len(), 1);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".press")?;
        jail.create_file(".press/config.toml", "[community]\nname = \"from-toml\"\n")?;
        jail.set_env("PRESS_COMMUNITY__NAME", "from-env");

        let config = PressConfig::load().expect("config loads");
        assert_eq!(config.community.name, "from-env");
        Ok(())
    });
}

use figment::Jail;
use triage_config::TriageConfig;

#[test]
fn openai_api_key_maps_into_section() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-from-env");

        let config = TriageConfig::load().expect("config loads");
        assert_eq!(config.openai.api_key, "sk-from-env");
        assert!(config.openai.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_plain_key() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-plain");
        jail.set_env("TRIAGE_OPENAI__API_KEY", "sk-prefixed");

        let config = TriageConfig::load().expect("config loads");
        assert_eq!(config.openai.api_key, "sk-prefixed");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".triage")?;
        jail.create_file(
            ".triage/config.toml",
            r#"
[general]
db_path = "from-toml.db"
"#,
        )?;
        jail.set_env("TRIAGE_GENERAL__DB_PATH", "from-env.db");

        let config = TriageConfig::load().expect("config loads");
        assert_eq!(config.general.db_path, "from-env.db");
        Ok(())
    });
}

#[test]
fn missing_key_degrades_to_unconfigured() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "");

        let config = TriageConfig::load().expect("config loads");
        assert!(!config.openai.is_configured());
        Ok(())
    });
}

#[test]
fn numeric_env_values_parse() {
    Jail::expect_with(|jail| {
        jail.set_env("TRIAGE_OPENAI__TIMEOUT_SECS", "2");
        jail.set_env("TRIAGE_OPENAI__MAX_ATTEMPTS", "3");

        let config = TriageConfig::load().expect("config loads");
        assert_eq!(config.openai.timeout_secs, 2);
        assert_eq!(config.openai.max_attempts, 3);
        Ok(())
    });
}

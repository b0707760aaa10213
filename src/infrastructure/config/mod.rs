use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::info;

use crate::domain::config::AppConfig;
use crate::domain::error::Result;

pub const CONFIG_FILE: &str = "nephrolist.toml";
pub const ENV_PREFIX: &str = "NEPHROLIST_";

/// Layered settings: defaults, then `nephrolist.toml`, then `NEPHROLIST_*`
/// environment variables (`__` separates nested keys)
pub struct ConfigService;

impl ConfigService {
    pub fn figment() -> Figment {
        Self::figment_with_file(Path::new(CONFIG_FILE))
    }

    pub fn figment_with_file(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<AppConfig> {
        Self::from_figment(Self::figment())
    }

    pub fn load_from(path: &Path) -> Result<AppConfig> {
        Self::from_figment(Self::figment_with_file(path))
    }

    /// Extract and check settings from any provider stack
    pub fn from_figment(figment: Figment) -> Result<AppConfig> {
        let config: AppConfig = figment.extract()?;
        config.check()?;

        info!(
            max_age = config.validation.max_age,
            delimiter = %config.export.delimiter,
            line_terminator = ?config.export.line_terminator,
            "Loaded configuration"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::LineTerminator;
    use crate::domain::error::AppError;
    use figment::Jail;

    fn with_toml(toml: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(toml))
    }

    #[test]
    fn test_defaults_without_sources() {
        let config =
            ConfigService::from_figment(Figment::from(Serialized::defaults(AppConfig::default())))
                .unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = ConfigService::from_figment(with_toml(
            r#"
            [export]
            delimiter = ";"
            line_terminator = "crlf"
            include_bom = true

            [validation]
            max_age = 120
            "#,
        ))
        .unwrap();

        assert_eq!(config.export.delimiter, ';');
        assert_eq!(config.export.line_terminator, LineTerminator::Crlf);
        assert!(config.export.include_bom);
        assert_eq!(config.validation.max_age, 120);
        assert_eq!(config.validation.peso_warning_kg, 300);
        assert_eq!(config.export.file_name, "dados_extraidos_nephrolist.csv");
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = ConfigService::from_figment(with_toml("[validation]\nmax_age = 0")).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let err =
            ConfigService::from_figment(with_toml("[export]\nline_terminator = \"cr\"")).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("does-not-exist/nephrolist.toml"));
        let config = ConfigService::from_figment(figment).unwrap();
        assert_eq!(config.export.delimiter, ',');
    }

    #[test]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [export]
                delimiter = "|"

                [validation]
                max_age = 110
                "#,
            )?;

            let config = ConfigService::load().map_err(|e| e.to_string())?;
            assert_eq!(config.export.delimiter, '|');
            assert_eq!(config.validation.max_age, 110);
            assert_eq!(config.export.line_terminator, LineTerminator::Lf);
            assert_eq!(config.validation.peso_warning_kg, 300);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [export]
                delimiter = "|"
                include_bom = true

                [validation]
                max_age = 110
                "#,
            )?;
            jail.set_env("NEPHROLIST_EXPORT__DELIMITER", ";");
            jail.set_env("NEPHROLIST_EXPORT__LINE_TERMINATOR", "crlf");
            jail.set_env("NEPHROLIST_VALIDATION__MAX_AGE", 120);

            let config = ConfigService::load().map_err(|e| e.to_string())?;
            assert_eq!(config.export.delimiter, ';');
            assert_eq!(config.export.line_terminator, LineTerminator::Crlf);
            assert_eq!(config.validation.max_age, 120);
            assert!(config.export.include_bom);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_custom_path() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[export]\nfile_name = \"alta.csv\"")?;

            let config =
                ConfigService::load_from(Path::new("custom.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.export.file_name, "alta.csv");
            assert_eq!(config.export.delimiter, ',');
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("NEPHROLIST_VALIDATION__MAX_AGE", 0);

            let err = ConfigService::load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));
            Ok(())
        });
    }
}

use std::path::Path;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use inkpost_composer::{ComposerConfig, DEFAULT_AUTHOR};
use inkpost_core::{
    CatalogError, EmojiCatalog, LineBreakStyle, Options, EMOJI_ALT, WECHAT_EMOJI_BASE_URL,
    WECHAT_EMOJI_COUNT,
};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub dialect: DialectSettings,
    pub composer: ComposerSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CatalogSettings {
    pub base_url: String,
    pub count: usize,
    pub extension: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DialectSettings {
    pub emoji_alt: String,
    pub emoji_class: String,
    pub line_break_style: BreakStyle,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BreakStyle {
    Hard,
    Soft,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ComposerSettings {
    pub default_author: String,
}

impl Settings {
    /// Defaults, then `path` (or `./inkpost.toml` when present), then
    /// `INKPOST__SECTION__KEY` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("inkpost").required(false),
        };

        defaults()?
            .add_source(file)
            .add_source(
                Environment::with_prefix("INKPOST")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn options(&self) -> Result<Options, CatalogError> {
        let catalog = EmojiCatalog::new(
            &self.catalog.base_url,
            self.catalog.count,
            &self.catalog.extension,
        )?;

        Ok(Options {
            emoji_alt: self.dialect.emoji_alt.clone(),
            emoji_class: self.dialect.emoji_class.clone(),
            catalog,
            line_break_style: match self.dialect.line_break_style {
                BreakStyle::Hard => LineBreakStyle::Hard,
                BreakStyle::Soft => LineBreakStyle::Soft,
            },
        })
    }

    pub fn composer_config(&self) -> ComposerConfig {
        ComposerConfig {
            default_author: self.composer.default_author.clone(),
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Options::default();

    config::Config::builder()
        .set_default("catalog.base_url", WECHAT_EMOJI_BASE_URL)?
        .set_default("catalog.count", WECHAT_EMOJI_COUNT as u64)?
        .set_default("catalog.extension", "gif")?
        .set_default("dialect.emoji_alt", EMOJI_ALT)?
        .set_default("dialect.emoji_class", defaults.emoji_class)?
        .set_default("dialect.line_break_style", "hard")?
        .set_default("composer.default_author", DEFAULT_AUTHOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_match_dialect() {
        let settings = from_toml("");
        let options = settings.options().unwrap();

        assert_eq!(options.emoji_alt, EMOJI_ALT);
        assert_eq!(options.catalog.len(), WECHAT_EMOJI_COUNT);
        assert_eq!(options.line_break_style, LineBreakStyle::Hard);
        assert_eq!(settings.composer_config(), ComposerConfig::default());
    }

    #[test]
    fn test_file_overrides() {
        let settings = from_toml(
            r#"
            [catalog]
            base_url = "https://cdn.example.com/emoji/"
            count = 10
            extension = "png"

            [dialect]
            line_break_style = "soft"

            [composer]
            default_author = "Guest"
            "#,
        );
        let options = settings.options().unwrap();

        assert_eq!(options.catalog.url(9).as_deref(), Some("https://cdn.example.com/emoji/9.png"));
        assert_eq!(options.catalog.url(10), None);
        assert_eq!(options.line_break_style, LineBreakStyle::Soft);
        assert_eq!(settings.composer.default_author, "Guest");
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let settings = from_toml(
            r#"
            [catalog]
            base_url = "http://insecure.example.com/"
            "#,
        );
        assert!(settings.options().is_err());
    }
}

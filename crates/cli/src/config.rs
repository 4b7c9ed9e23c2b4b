use anyhow::Context;
use toolbelt_core::date::pattern::{DatePattern, Zone};
use toolbelt_core::date::DATE_TIME_PATTERN;

/// CLI configuration loaded from environment variables.
///
/// Defaults suit interactive use; a `.env` file in the working directory is
/// honoured through `dotenvy`.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Zone used when rendering dates (default: `local`).
    pub zone: Zone,
    /// Default pattern for `date unix` and `date format` (default:
    /// `yyyy-MM-dd HH:mm:ss`).
    pub date_format: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            zone: Zone::Local,
            date_format: DATE_TIME_PATTERN.to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default               |
    /// |------------------------|-----------------------|
    /// | `TOOLBELT_TIMEZONE`    | `local`               |
    /// | `TOOLBELT_DATE_FORMAT` | `yyyy-MM-dd HH:mm:ss` |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let zone = match lookup("TOOLBELT_TIMEZONE") {
            Some(raw) => raw
                .parse()
                .context("TOOLBELT_TIMEZONE must be 'local' or 'utc'")?,
            None => defaults.zone,
        };

        let date_format = lookup("TOOLBELT_DATE_FORMAT").unwrap_or(defaults.date_format);
        DatePattern::parse(&date_format)
            .context("TOOLBELT_DATE_FORMAT must be a valid date pattern")?;

        Ok(Self { zone, date_format })
    }
}

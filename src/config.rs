use crate::marking::{parse_ymd, MarkedDates, Marking, MarkingKeyError};
use crate::options::CalendarOptions;
use crate::period::{weekday_from_index, PeriodKind};
use crate::sync::AutoSelect;
use crate::theme::{CalendarTheme, ThemeConfig};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use time::Date;

/// Everything a configuration file can set
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub options: CalendarOptions,
    pub marked: MarkedDates,
    pub theme: CalendarTheme,
    /// Whether the file set `page_count` rather than leaving it to the view
    explicit_page_count: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Config::from_toml_str(&src)
    }

    pub fn from_toml_str(src: &str) -> Result<Config, ConfigError> {
        toml::from_str::<ConfigFile>(src)?.into_config()
    }

    /// Switches the view, keeping an explicitly configured `page_count`
    pub fn with_view(mut self, kind: PeriodKind) -> Config {
        self.options.kind = kind;
        if !self.explicit_page_count {
            self.options.page_count = kind.default_page_count();
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    view: PeriodKind,
    page_count: Option<usize>,
    min_date: Option<String>,
    max_date: Option<String>,
    /// 0 = Sunday
    first_day: Option<u8>,
    auto_select: AutoSelect,
    render_budget: Option<usize>,
    width: Option<u16>,
    debounce_ms: Option<u64>,
    day_names: Option<[String; 7]>,
    theme: ThemeConfig,
    marked_dates: BTreeMap<String, Marking>,
}

impl ConfigFile {
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut options = CalendarOptions::new(self.view).auto_select(self.auto_select);
        if let Some(n) = self.page_count {
            options.page_count = n;
        }
        options.min_date = parse_field("min_date", self.min_date.as_deref())?;
        options.max_date = parse_field("max_date", self.max_date.as_deref())?;
        if let (Some(min), Some(max)) = (options.min_date, options.max_date) {
            if min > max {
                return Err(ConfigError::Bounds { min, max });
            }
        }
        if let Some(n) = self.first_day {
            options.first_day = weekday_from_index(n).ok_or(ConfigError::FirstDay(n))?;
        }
        if let Some(budget) = self.render_budget {
            options.render_budget = budget;
        }
        options.width = self.width;
        if let Some(ms) = self.debounce_ms {
            options.debounce = Duration::from_millis(ms);
        }
        options.day_names = self.day_names;
        let marked = MarkedDates::from_strings(self.marked_dates).map_err(|source| {
            ConfigError::InvalidDate {
                field: "marked_dates",
                source,
            }
        })?;
        Ok(Config {
            options,
            marked,
            theme: self.theme.apply(CalendarTheme::DEFAULT),
            explicit_page_count: self.page_count.is_some(),
        })
    }
}

fn parse_field(field: &'static str, value: Option<&str>) -> Result<Option<Date>, ConfigError> {
    value
        .map(parse_ymd)
        .transpose()
        .map_err(|source| ConfigError::InvalidDate { field, source })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}")]
    InvalidDate {
        field: &'static str,
        source: MarkingKeyError,
    },
    #[error("first_day must be from 0 (Sunday) to 6 (Saturday), not {0}")]
    FirstDay(u8),
    #[error("min_date {min} is after max_date {max}")]
    Bounds { min: Date, max: Date },
}

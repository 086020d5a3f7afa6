use std::{env, path::PathBuf};

use directories::{BaseDirs, ProjectDirs};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::core::{Rgba, TypedValue};

const CONFIG: &str = include_str!("../.config/config.json5");

/// Starting values for attributes the owning form leaves out.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    pub asc: bool,
    pub clearable: bool,
    pub multiple: bool,
    pub search_all_options: bool,
    pub show_total: bool,
    pub disable_filters: bool,
    pub disable_sort_by: bool,
    pub thumbnail_height: TypedValue,
    pub thumbnail_width: TypedValue,
    /// Initial `conditionalColumnTextColor`
    pub text_color: Rgba,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            asc: true,
            clearable: true,
            multiple: true,
            search_all_options: false,
            show_total: false,
            disable_filters: true,
            disable_sort_by: false,
            thumbnail_height: TypedValue::Int(50),
            thumbnail_width: TypedValue::Int(50),
            text_color: Rgba::BLACK,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: EditorDefaults,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Layer embedded defaults, then the user file, then `CONDTABLE_*` variables
    /// (`CONDTABLE_DEFAULTS__MULTIPLE=false`).
    ///
    /// An explicit `config_path` must exist; the default location is optional.
    pub fn from_path(config_path: Option<&PathBuf>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let builder = match config_path {
            Some(p) => builder.add_source(
                config::File::from(expand_tilde(p))
                    .format(config::FileFormat::Json5)
                    .required(true),
            ),
            None => builder.add_source(
                config::File::from(get_config_dir().join("config.json5"))
                    .format(config::FileFormat::Json5)
                    .required(false),
            ),
        };

        builder
            .add_source(
                config::Environment::with_prefix(PROJECT_NAME.as_str())
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Embedded defaults only; ignores the filesystem and environment.
    pub fn embedded() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5))
            .build()?
            .try_deserialize()
    }
}

fn expand_tilde(path: &PathBuf) -> PathBuf {
    if let Some(s) = path.to_str() {
        if s.starts_with('~') {
            if let Some(base) = BaseDirs::new() {
                return PathBuf::from(s.replacen('~', base.home_dir().to_str().unwrap_or(""), 1));
            }
        }
    }
    path.clone()
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj) = ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
        proj.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

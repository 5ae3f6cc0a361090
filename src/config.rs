//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/abshape/abshape.toml`
//! 3. Local config: `./.abshape.toml` (or the file passed on the command line)
//! 4. Environment variables: `ABSHAPE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Build settings: where sources live and where the artifact goes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the tab-delimited source files
    pub data_dir: PathBuf,
    /// Path of the JSON artifact
    pub output_path: PathBuf,
    /// Source file stems (`abstract_<stem>.txt`); empty means scan `data_dir`
    pub sources: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("input"),
            output_path: PathBuf::from("result/abstract.json"),
            sources: ["main", "a", "b", "ci", "gh"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Settings {
    /// Load settings with the layered precedence above.
    pub fn load(local: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(dirs) = ProjectDirs::from("", "", "abshape") {
            let global = dirs.config_dir().join("abshape.toml");
            builder = builder.add_source(File::from(global).required(false));
        }

        let local = local
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".abshape.toml"));
        builder = builder
            .add_source(File::from(local).required(false))
            .add_source(
                Environment::with_prefix("ABSHAPE")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("sources"),
            );

        builder.build()?.try_deserialize()
    }

    pub fn geta_path(&self) -> PathBuf {
        self.data_dir.join("geta.txt")
    }

    pub fn extra_path(&self) -> PathBuf {
        self.data_dir.join("extra.txt")
    }

    pub fn oracle_path(&self) -> PathBuf {
        self.data_dir.join("ob.txt")
    }
}

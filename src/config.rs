use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Directory scanned for fiches waiting to be imported.
    #[serde(default = "default_staging")]
    pub staging: PathBuf,
    /// Where imported fiches are moved. Defaults to the staging directory's
    /// parent, so `fiches/A_traiter` archives into `fiches/`.
    #[serde(default)]
    pub archive: Option<PathBuf>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            staging: default_staging(),
            archive: None,
            include_globs: default_include_globs(),
        }
    }
}

impl ImportConfig {
    pub fn archive_dir(&self) -> PathBuf {
        self.archive_for(&self.staging)
    }

    /// Archive directory when scanning `staging`, which may be a `--dir`
    /// override rather than the configured staging directory.
    pub fn archive_for(&self, staging: &Path) -> PathBuf {
        match &self.archive {
            Some(dir) => dir.clone(),
            None => staging
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

fn default_staging() -> PathBuf {
    PathBuf::from("fiches/A_traiter")
}

fn default_include_globs() -> Vec<String> {
    vec!["*.docx".to_string(), "*.txt".to_string()]
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.import.include_globs.is_empty() {
        anyhow::bail!("import.include_globs must not be empty");
    }

    // Archiving into the staging directory would re-import the same fiches
    // forever.
    if config.import.archive_dir() == config.import.staging {
        anyhow::bail!("import.archive must differ from import.staging");
    }

    Ok(config)
}

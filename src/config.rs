use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DB_PATH_ENV: &str = "ALCANCIA_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Storage {
    Sqlite(PathBuf),
    /// Balances live for the process only; no transaction log.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub storage: Storage,
    /// Arguments left after the global flags are removed.
    pub command: Vec<String>,
}

impl Config {
    /// Resolve storage from `--memory`, `--db <path>`, then `env_db_path`,
    /// then the platform data directory. Flags may appear anywhere.
    pub(crate) fn from_args(args: &[String], env_db_path: Option<String>) -> Result<Self> {
        let mut memory = false;
        let mut db_flag: Option<PathBuf> = None;
        let mut command = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--memory" => memory = true,
                "--db" => {
                    let path = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--db needs a path"))?;
                    db_flag = Some(PathBuf::from(path));
                }
                _ => command.push(arg.clone()),
            }
        }

        let storage = if memory {
            Storage::Memory
        } else if let Some(path) = db_flag {
            Storage::Sqlite(path)
        } else if let Some(path) = env_db_path.filter(|p| !p.trim().is_empty()) {
            Storage::Sqlite(PathBuf::from(path))
        } else {
            Storage::Sqlite(default_db_path()?)
        };

        Ok(Self { storage, command })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "alcancia", "Alcancia")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("alcancia.db"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::chunked::DEFAULT_CHUNK;

const APP_NAME: &str = "cxi";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "CXI_CONFIG";

/// Indexer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Growth step (in elements) for the corpus, suffix and symbol arrays
    #[serde(default = "default_alloc_chunk")]
    pub alloc_chunk: usize,

    /// Sort the suffix array on the rayon pool
    #[serde(default = "default_parallel_sort")]
    pub parallel_sort: bool,

    /// Corpus size above which the parallel sort kicks in
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Number of sorting threads
    /// If 0, uses the number of CPU cores
    #[serde(default)]
    pub sort_threads: usize,

    /// Show a spinner on stderr while reading and sorting
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

fn default_alloc_chunk() -> usize {
    DEFAULT_CHUNK
}

fn default_parallel_sort() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    100_000
}

fn default_show_progress() -> bool {
    true
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            alloc_chunk: default_alloc_chunk(),
            parallel_sort: default_parallel_sort(),
            parallel_threshold: default_parallel_threshold(),
            sort_threads: 0,
            show_progress: default_show_progress(),
        }
    }
}

impl IndexerConfig {
    /// Load config from `$CXI_CONFIG`, then the app config directory,
    /// falling back to defaults when neither exists
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: IndexerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Whether a corpus of `len` tokens should be sorted in parallel
    pub fn use_parallel_sort(&self, len: usize) -> bool {
        self.parallel_sort && len > self.parallel_threshold
    }

    /// Get the effective sorting thread count (resolves 0 to CPU count)
    pub fn effective_sort_threads(&self) -> usize {
        if self.sort_threads == 0 {
            num_cpus()
        } else {
            self.sort_threads
        }
    }
}

/// Get the number of CPUs available
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Get the path to the config file, if a config directory is known
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = IndexerConfig::default();
        assert_eq!(config.alloc_chunk, 65536);
        assert!(config.parallel_sort);
        assert_eq!(config.parallel_threshold, 100_000);
        assert!(config.show_progress);
    }

    #[test]
    fn test_effective_sort_threads() {
        let mut config = IndexerConfig::default();

        // 0 should resolve to CPU count
        assert!(config.effective_sort_threads() >= 1);

        config.sort_threads = 3;
        assert_eq!(config.effective_sort_threads(), 3);
    }

    #[test]
    fn test_parallel_threshold() {
        let mut config = IndexerConfig::default();
        assert!(!config.use_parallel_sort(10));
        assert!(config.use_parallel_sort(100_001));

        config.parallel_sort = false;
        assert!(!config.use_parallel_sort(1_000_000));
    }

    #[test]
    fn test_config_partial_json() {
        // Missing fields fall back to defaults
        let json = r#"{"alloc_chunk": 16}"#;
        let config: IndexerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.alloc_chunk, 16);
        assert!(config.parallel_sort);
        assert_eq!(config.sort_threads, 0);
    }

    #[test]
    fn test_config_empty_json() {
        let config: IndexerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IndexerConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"show_progress": false, "parallel_threshold": 7}}"#).unwrap();

        let config = IndexerConfig::load_from(file.path()).unwrap();
        assert!(!config.show_progress);
        assert_eq!(config.parallel_threshold, 7);
    }

    #[test]
    fn test_load_from_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = IndexerConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

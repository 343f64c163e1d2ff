use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_FILE: &str = "expenses.json";

pub const BIND_ADDR_VAR: &str = "EXPENSES_BIND_ADDR";
pub const DATA_FILE_VAR: &str = "EXPENSES_DATA_FILE";

/// Server settings. Defaults to localhost:8080 and `expenses.json` in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    /// Defaults, overridden by `EXPENSES_BIND_ADDR` / `EXPENSES_DATA_FILE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable source. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            bind_addr: var(BIND_ADDR_VAR).unwrap_or(defaults.bind_addr),
            data_file: var(DATA_FILE_VAR).map(PathBuf::from).unwrap_or(defaults.data_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_variables() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("expenses.json"));
    }

    #[test]
    fn test_overrides_and_blank_values() {
        let vars: HashMap<&str, &str> = [(BIND_ADDR_VAR, "0.0.0.0:9000"), (DATA_FILE_VAR, "  ")]
            .into_iter()
            .collect();
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }
}

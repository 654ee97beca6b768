use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::errors::PapirunError;

/// Optional defaults loaded from `papirun.toml`. Every field may be omitted;
/// CLI flags override anything set here.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub runs: Option<usize>,
    pub command: Option<String>,
    pub report_dir: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub region: Option<String>,
    pub counter: Option<String>,
}

/// Load config from `explicit` when given (missing file is then an error),
/// otherwise from `./papirun.toml` or `<config dir>/papirun/config.toml` if
/// either exists. No config file at all just means built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(FileConfig::default()),
        },
    };

    parse_file(&path)
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| PapirunError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: FileConfig = toml::from_str(&raw).map_err(|err| PapirunError::ConfigParse {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("papirun.toml");
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("papirun").join("config.toml");
    user.is_file().then_some(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn full_config_parses() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("papirun.toml");
        fs::write(
            &path,
            r#"
runs = 5
command = "./tiling_beta"
report_dir = "papi_out"
out = "results.csv"
region = "gpu_kernel"
counter = "PAPI_DP_OPS"
"#,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.runs, Some(5));
        assert_eq!(config.command.as_deref(), Some("./tiling_beta"));
        assert_eq!(config.report_dir, Some(PathBuf::from("papi_out")));
        assert_eq!(config.out, Some(PathBuf::from("results.csv")));
        assert_eq!(config.region.as_deref(), Some("gpu_kernel"));
        assert_eq!(config.counter.as_deref(), Some("PAPI_DP_OPS"));
    }

    #[test]
    fn partial_config_leaves_rest_unset() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("papirun.toml");
        fs::write(&path, "runs = 10\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.runs, Some(10));
        assert_eq!(config.command, None);
        assert_eq!(config.counter, None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("papirun.toml");
        fs::write(&path, "iterations = 3\n").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load(Some(Path::new("/tmp/papirun-no-such-config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let path = tmp.path().join("papirun.toml");
        fs::write(&path, "runs = [not toml").unwrap();

        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

//! Configuration file support for depviz.
//!
//! The config file is CSV-style: one `key;value` (or `key,value`) pair
//! per line, with `#` comments and blank lines ignored. Values are
//! parsed directly into the typed [`Config`] struct; a value is a bool
//! or a package name only because its key demands one, never because of
//! how the text looks.

use std::fs;
use std::path::{Path, PathBuf};

use crate::graph_resolution::domain::PackageName;
use crate::shared::error::DepvizError;
use crate::shared::Result;

/// Typed application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root package whose dependency graph is resolved.
    pub package: PackageName,
    /// Package index URL, or mapping file path in test mode.
    pub repository: String,
    /// `true` reads dependencies from a local mapping file instead of
    /// the network.
    pub test_mode: bool,
    /// `true` renders the tree with box-drawing connectors.
    pub ascii_tree: bool,
    /// Packages whose name contains this substring are excluded from
    /// the graph. Empty disables filtering.
    pub filter_substring: String,
    /// Target of the reverse lookup stage; defaults to `package`.
    pub reverse_package: Option<PackageName>,
    /// Write the payload here instead of stdout.
    pub output_file: Option<PathBuf>,
    /// Keys the parser did not recognize, kept for warnings.
    pub unknown_keys: Vec<String>,
}

impl Config {
    /// The reverse-lookup target: `reverse_package` if configured,
    /// otherwise the root package.
    pub fn reverse_target(&self) -> &PackageName {
        self.reverse_package.as_ref().unwrap_or(&self.package)
    }

    /// Lines echoing the validated configuration, for the diagnostic
    /// stream.
    pub fn echo_lines(&self) -> Vec<String> {
        let mut lines = vec!["Current configuration:".to_string(), "-".repeat(40)];
        lines.push(format!("package: {}", self.package));
        lines.push(format!("repository: {}", self.repository));
        lines.push(format!("test_mode: {}", self.test_mode));
        lines.push(format!("ascii_tree: {}", self.ascii_tree));
        lines.push(format!("filter_substring: {}", self.filter_substring));
        if let Some(reverse_package) = &self.reverse_package {
            lines.push(format!("reverse_package: {}", reverse_package));
        }
        if let Some(output_file) = &self.output_file {
            lines.push(format!("output_file: {}", output_file.display()));
        }
        lines.push("-".repeat(40));
        lines
    }
}

/// Load config from an explicit path. Returns an error if the file is
/// not found or any line or value is invalid.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(DepvizError::ConfigError {
            path: path.to_path_buf(),
            reason: "config file not found".to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path).map_err(|e| DepvizError::ConfigError {
        path: path.to_path_buf(),
        reason: format!("failed to read config file: {}", e),
    })?;

    let config = parse_config(path, &content)?;
    warn_unknown_keys(&config);

    Ok(config)
}

/// Warn about unknown keys in the config file.
fn warn_unknown_keys(config: &Config) {
    for key in &config.unknown_keys {
        eprintln!("⚠️  Warning: Unknown config key '{}' will be ignored.", key);
    }
}

fn parse_config(path: &Path, content: &str) -> Result<Config> {
    let mut entries: Vec<(String, String)> = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // The `;` separator takes precedence over `,` wherever it
        // appears in the line.
        let Some((key, value)) = line.split_once(';').or_else(|| line.split_once(',')) else {
            return Err(DepvizError::ConfigError {
                path: path.to_path_buf(),
                reason: format!("line {}: missing ';' or ',' separator", index + 1),
            }
            .into());
        };
        entries.push((key.trim().to_string(), value.trim().to_string()));
    }

    // A repeated key takes its last value, matching plain map semantics.
    let mut take = |wanted: &str| -> Option<String> {
        let mut found = None;
        for (key, value) in &entries {
            if key == wanted {
                found = Some(value.clone());
            }
        }
        found
    };

    let package_raw = take("package").ok_or(DepvizError::MissingParameter {
        name: "package".to_string(),
    })?;
    let repository = take("repository").ok_or(DepvizError::MissingParameter {
        name: "repository".to_string(),
    })?;
    let test_mode_raw = take("test_mode").ok_or(DepvizError::MissingParameter {
        name: "test_mode".to_string(),
    })?;
    let ascii_tree_raw = take("ascii_tree").ok_or(DepvizError::MissingParameter {
        name: "ascii_tree".to_string(),
    })?;
    let filter_substring = take("filter_substring").ok_or(DepvizError::MissingParameter {
        name: "filter_substring".to_string(),
    })?;
    let reverse_package_raw = take("reverse_package");
    let output_file_raw = take("output_file");

    let package = parse_package_name("package", &package_raw)?;

    if repository.is_empty() {
        return Err(DepvizError::InvalidParameter {
            name: "repository".to_string(),
            expected: "non-empty index URL or mapping file path".to_string(),
            value: repository,
        }
        .into());
    }

    let test_mode = parse_bool("test_mode", &test_mode_raw)?;
    let ascii_tree = parse_bool("ascii_tree", &ascii_tree_raw)?;

    let reverse_package = match reverse_package_raw {
        Some(raw) => Some(parse_package_name("reverse_package", &raw)?),
        None => None,
    };

    let output_file = match output_file_raw {
        Some(raw) if raw.is_empty() => {
            return Err(DepvizError::InvalidParameter {
                name: "output_file".to_string(),
                expected: "non-empty file path".to_string(),
                value: raw,
            }
            .into());
        }
        Some(raw) => Some(PathBuf::from(raw)),
        None => None,
    };

    let known_keys = [
        "package",
        "repository",
        "test_mode",
        "ascii_tree",
        "filter_substring",
        "reverse_package",
        "output_file",
    ];
    let mut unknown_keys: Vec<String> = Vec::new();
    for (key, _) in &entries {
        if !known_keys.contains(&key.as_str()) && !unknown_keys.contains(key) {
            unknown_keys.push(key.clone());
        }
    }

    Ok(Config {
        package,
        repository,
        test_mode,
        ascii_tree,
        filter_substring,
        reverse_package,
        output_file,
        unknown_keys,
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(DepvizError::InvalidParameter {
            name: name.to_string(),
            expected: "true or false".to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

fn parse_package_name(name: &str, value: &str) -> Result<PackageName> {
    PackageName::new(value.to_string()).map_err(|_| {
        DepvizError::InvalidParameter {
            name: name.to_string(),
            expected: "valid package name".to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

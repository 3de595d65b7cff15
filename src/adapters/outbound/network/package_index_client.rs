use crate::graph_resolution::domain::PackageName;
use crate::ports::outbound::DependencySource;
use crate::shared::error::DepvizError;
use crate::shared::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
struct IndexPackageInfo {
    info: IndexInfo,
}

#[derive(Debug, Deserialize)]
struct IndexInfo {
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
}

/// PackageIndexClient adapter for fetching dependency metadata from a
/// PyPI-style JSON API
///
/// This adapter implements the DependencySource port over HTTP. One GET
/// per package against `{repository}/{name}/json`; the `requires_dist`
/// list of the response is reduced to plain dependency names.
///
/// Requests are synchronous and run one at a time. There is no retry
/// and no client-side timeout; a failed or hung transfer surfaces as a
/// source error and aborts the build.
pub struct PackageIndexClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PackageIndexClient {
    /// Creates a client for the given repository URL.
    ///
    /// A trailing `/` on the URL is tolerated and trimmed.
    pub fn new(repository_url: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depviz/{}", version);
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(None)
            .build()?;

        Ok(Self {
            client,
            base_url: repository_url.trim_end_matches('/').to_string(),
        })
    }

    /// Validates a package name before it is placed into a URL
    fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
        if component.contains('/') || component.contains('\\') {
            anyhow::bail!(
                "{} contains path separators which are not allowed",
                component_type
            );
        }

        if component.contains("..") {
            anyhow::bail!("{} contains '..' which is not allowed", component_type);
        }

        if component.contains('#') || component.contains('?') || component.contains('@') {
            anyhow::bail!("{} contains URL-unsafe characters", component_type);
        }

        Ok(())
    }

    /// Fetches the raw requirement entries for a package.
    ///
    /// HTTP 404 means the index does not know the package, which reads
    /// as an empty requirement list. Every other failure makes the
    /// source unavailable.
    fn fetch_requirements(&self, package: &PackageName) -> Result<Vec<String>> {
        Self::validate_url_component(package.as_str(), "Package name")?;

        let encoded_package = urlencoding::encode(package.as_str());
        let url = format!("{}/{}/json", self.base_url, encoded_package);

        let response = self.client.get(&url).send().map_err(|e| {
            DepvizError::SourceUnavailable {
                location: self.base_url.clone(),
                details: e.to_string(),
            }
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(DepvizError::SourceUnavailable {
                location: url,
                details: format!("index returned status code {}", response.status()),
            }
            .into());
        }

        let package_info: IndexPackageInfo =
            response.json().map_err(|e| DepvizError::SourceUnavailable {
                location: url,
                details: format!("invalid JSON payload: {}", e),
            })?;

        Ok(package_info.info.requires_dist.unwrap_or_default())
    }
}

impl DependencySource for PackageIndexClient {
    fn direct_dependencies(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        let entries = self.fetch_requirements(package)?;
        Ok(parse_requirements(&entries))
    }

    fn describe(&self) -> String {
        format!("package index at {}", self.base_url)
    }
}

/// Reduces requirement entries to dependency names.
///
/// Entries gated behind an `extra ==` environment marker belong to
/// optional features and are skipped. Entries with no leading package
/// name are skipped with a warning. Duplicate names collapse, keeping
/// the first occurrence to preserve source order.
fn parse_requirements(entries: &[String]) -> Vec<PackageName> {
    let mut dependencies = Vec::new();
    let mut seen = HashSet::new();

    for entry in entries {
        if has_extra_marker(entry) {
            continue;
        }
        match requirement_name(entry) {
            Some(name) => {
                if seen.insert(name.clone()) {
                    dependencies.push(name);
                }
            }
            None => {
                eprintln!(
                    "⚠️  Warning: Skipping unparsable requirement entry '{}'",
                    entry
                );
            }
        }
    }

    dependencies
}

/// Whether the entry's environment marker restricts it to an extra.
fn has_extra_marker(entry: &str) -> bool {
    match entry.split_once(';') {
        Some((_, marker)) => marker.contains("extra ==") || marker.contains("extra=="),
        None => false,
    }
}

/// Extracts the dependency name: the longest leading run of valid
/// package-name characters.
fn requirement_name(entry: &str) -> Option<PackageName> {
    let trimmed = entry.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !PackageName::is_name_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    if end == 0 {
        return None;
    }
    PackageName::new(trimmed[..end].to_string()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PackageName {
        PackageName::new(s.to_string()).unwrap()
    }

    fn entries(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_client_creation() {
        let client = PackageIndexClient::new("https://pypi.org/pypi");
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = PackageIndexClient::new("https://pypi.org/pypi/").unwrap();
        assert!(client.describe().ends_with("https://pypi.org/pypi"));
    }

    #[test]
    fn test_parse_plain_names() {
        let deps = parse_requirements(&entries(&["requests", "flask"]));
        assert_eq!(deps, vec![name("requests"), name("flask")]);
    }

    #[test]
    fn test_parse_version_constraints_stripped() {
        let deps = parse_requirements(&entries(&[
            "charset-normalizer (<4,>=2)",
            "idna<4,>=2.5",
            "urllib3 >=1.21.1",
        ]));
        assert_eq!(
            deps,
            vec![name("charset-normalizer"), name("idna"), name("urllib3")]
        );
    }

    #[test]
    fn test_parse_skips_extra_marked_entries() {
        let deps = parse_requirements(&entries(&[
            "requests",
            "pytest ; extra == 'test'",
            "coverage; extra==\"dev\"",
        ]));
        assert_eq!(deps, vec![name("requests")]);
    }

    #[test]
    fn test_parse_keeps_non_extra_markers() {
        let deps = parse_requirements(&entries(&["tomli ; python_version < \"3.11\""]));
        assert_eq!(deps, vec![name("tomli")]);
    }

    #[test]
    fn test_parse_duplicates_keep_first() {
        let deps = parse_requirements(&entries(&["requests (>=2.0)", "requests"]));
        assert_eq!(deps, vec![name("requests")]);
    }

    #[test]
    fn test_parse_skips_unparsable_entries() {
        let deps = parse_requirements(&entries(&["(>=1.0)", "requests"]));
        assert_eq!(deps, vec![name("requests")]);
    }

    #[test]
    fn test_parse_preserves_bracket_extras_in_name() {
        let deps = parse_requirements(&entries(&["uvicorn[standard] (>=0.12)"]));
        assert_eq!(deps, vec![name("uvicorn[standard]")]);
    }

    #[test]
    fn test_requirement_name_leading_whitespace() {
        assert_eq!(requirement_name("  requests >= 2.0"), Some(name("requests")));
    }

    #[test]
    fn test_requirement_name_empty_entry() {
        assert!(requirement_name("").is_none());
        assert!(requirement_name("   ").is_none());
    }

    #[test]
    fn test_has_extra_marker() {
        assert!(has_extra_marker("pytest ; extra == 'test'"));
        assert!(has_extra_marker("pytest; extra=='test'"));
        assert!(!has_extra_marker("pytest"));
        assert!(!has_extra_marker("tomli ; python_version < \"3.11\""));
    }

    #[test]
    fn test_validate_url_component_rejects_unsafe_input() {
        assert!(PackageIndexClient::validate_url_component("a/b", "Package name").is_err());
        assert!(PackageIndexClient::validate_url_component("a\\b", "Package name").is_err());
        assert!(PackageIndexClient::validate_url_component("a..b", "Package name").is_err());
        assert!(PackageIndexClient::validate_url_component("a#b", "Package name").is_err());
        assert!(PackageIndexClient::validate_url_component("requests", "Package name").is_ok());
    }

    // Integration tests - require network access
    // Uncomment to run against the real PyPI API
    // #[test]
    // fn test_fetch_real_package() {
    //     let client = PackageIndexClient::new("https://pypi.org/pypi").unwrap();
    //     let deps = client.direct_dependencies(&name("requests")).unwrap();
    //     assert!(deps.iter().any(|d| d.as_str() == "urllib3"));
    // }
}

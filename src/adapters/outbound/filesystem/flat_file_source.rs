use crate::graph_resolution::domain::PackageName;
use crate::ports::outbound::{DependencyRecord, DependencyRecordScan, DependencySource};
use crate::shared::error::DepvizError;
use crate::shared::Result;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum mapping file size (10 MB)
const MAX_MAPPING_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// A mapping-file line that was skipped or overridden during loading.
///
/// Malformed records never fail the load; they are collected here so the
/// caller can warn about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWarning {
    pub line_number: usize,
    pub reason: String,
}

impl fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.reason)
    }
}

/// FlatFileSource adapter serving dependency data from a local mapping file
///
/// The file holds one record per line in `name: dep1, dep2` form; a
/// trailing `:` with nothing after it declares a leaf package. Blank
/// lines and `#` comments are ignored. The whole file is loaded once at
/// construction; lookups afterwards never touch the filesystem.
///
/// This adapter implements both DependencySource (lookups for the graph
/// build) and DependencyRecordScan (full enumeration for reverse lookup).
pub struct FlatFileSource {
    path: PathBuf,
    records: Vec<DependencyRecord>,
    index: HashMap<PackageName, Vec<PackageName>>,
    warnings: Vec<RecordWarning>,
}

impl FlatFileSource {
    /// Loads and parses the mapping file.
    ///
    /// # Errors
    /// A missing or unreadable file makes the source unavailable.
    /// Individual bad lines do not: they are skipped and retained as
    /// warnings.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DepvizError::SourceUnavailable {
                location: path.display().to_string(),
                details: "mapping file does not exist".to_string(),
            }
            .into());
        }

        let content = Self::safe_read_file(path)?;
        let (records, warnings) = parse_mapping(&content);

        let index = records
            .iter()
            .map(|record| (record.package.clone(), record.dependencies.clone()))
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            records,
            index,
            warnings,
        })
    }

    /// Warnings collected while loading, in file order.
    pub fn warnings(&self) -> &[RecordWarning] {
        &self.warnings
    }

    /// Safely read the mapping file:
    /// - Reject symbolic links
    /// - Validate it is a regular file
    /// - Check the size limit
    fn safe_read_file(path: &Path) -> Result<String> {
        let metadata = fs::symlink_metadata(path).map_err(|e| DepvizError::SourceUnavailable {
            location: path.display().to_string(),
            details: format!("failed to read file metadata: {}", e),
        })?;

        if metadata.is_symlink() {
            return Err(DepvizError::SourceUnavailable {
                location: path.display().to_string(),
                details: "mapping file is a symbolic link; symbolic links are not allowed"
                    .to_string(),
            }
            .into());
        }

        if !metadata.is_file() {
            return Err(DepvizError::SourceUnavailable {
                location: path.display().to_string(),
                details: "not a regular file".to_string(),
            }
            .into());
        }

        if metadata.len() > MAX_MAPPING_FILE_SIZE {
            return Err(DepvizError::SourceUnavailable {
                location: path.display().to_string(),
                details: format!(
                    "mapping file is too large ({} bytes). Maximum allowed size is {} bytes",
                    metadata.len(),
                    MAX_MAPPING_FILE_SIZE
                ),
            }
            .into());
        }

        fs::read_to_string(path).map_err(|e| {
            DepvizError::SourceUnavailable {
                location: path.display().to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl DependencySource for FlatFileSource {
    fn direct_dependencies(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        // An unlisted package reads as having no dependencies.
        Ok(self.index.get(package).cloned().unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("mapping file '{}'", self.path.display())
    }
}

impl DependencyRecordScan for FlatFileSource {
    fn records(&self) -> &[DependencyRecord] {
        &self.records
    }
}

/// Parses mapping-file content into records plus warnings for every
/// line that had to be skipped or overridden.
fn parse_mapping(content: &str) -> (Vec<DependencyRecord>, Vec<RecordWarning>) {
    let mut records: Vec<DependencyRecord> = Vec::new();
    let mut positions: HashMap<PackageName, usize> = HashMap::new();
    let mut warnings = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((head, tail)) = line.split_once(':') else {
            warnings.push(RecordWarning {
                line_number,
                reason: "missing ':' separator".to_string(),
            });
            continue;
        };

        let package = match PackageName::new(head.trim().to_string()) {
            Ok(name) => name,
            Err(_) => {
                warnings.push(RecordWarning {
                    line_number,
                    reason: format!("invalid package name '{}'", head.trim()),
                });
                continue;
            }
        };

        let mut dependencies = Vec::new();
        let mut record_valid = true;
        for segment in tail.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match PackageName::new(segment.to_string()) {
                Ok(dep) => dependencies.push(dep),
                Err(_) => {
                    warnings.push(RecordWarning {
                        line_number,
                        reason: format!(
                            "invalid dependency name '{}' in record for '{}'",
                            segment, package
                        ),
                    });
                    record_valid = false;
                    break;
                }
            }
        }
        if !record_valid {
            continue;
        }

        let record = DependencyRecord::new(package.clone(), dependencies);
        if let Some(&existing) = positions.get(&package) {
            warnings.push(RecordWarning {
                line_number,
                reason: format!("duplicate record for '{}' overrides the earlier one", package),
            });
            records[existing] = record;
        } else {
            positions.insert(package, records.len());
            records.push(record);
        }
    }

    (records, warnings)
}

use crate::shared::Result;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// NewType wrapper for package name with validation
///
/// Names are compared byte-for-byte: matching is case-sensitive and no
/// normalization is applied, so `Foo` and `foo` are distinct packages.
/// Ordering is lexicographic, which keeps `BTreeSet<PackageName>`
/// iteration deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        // Length limit to keep pathological inputs out of the graph
        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if !name.chars().all(Self::is_name_char) {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only ASCII letters, digits, hyphens, underscores, dots, and brackets are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    /// Whether a character may appear in a package name.
    ///
    /// The same set is used when extracting names from requirement
    /// strings: a name is the longest leading run of these characters.
    pub fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || c == '-'
            || c == '_'
            || c == '.'
            || c == '['
            || c == ']'  // For extras like package[extra]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//!
//! The policy applied to revisions whose build failed.
//!

///
/// The policy applied to revisions whose build failed.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildFailurePolicy {
    /// Benchmark the last configured artifact and mark the record as built unsuccessfully.
    #[default]
    StaleArtifact,
    /// Do not benchmark, and record the revision with no samples.
    Skip,
}

impl std::str::FromStr for BuildFailurePolicy {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "stale-artifact" => Ok(Self::StaleArtifact),
            "skip" => Ok(Self::Skip),
            string => anyhow::bail!(
                "Unknown build failure policy `{string}`. Supported policies: {}",
                [Self::StaleArtifact, Self::Skip]
                    .into_iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

impl std::fmt::Display for BuildFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleArtifact => write!(f, "stale-artifact"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

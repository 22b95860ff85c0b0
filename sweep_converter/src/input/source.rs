//!
//! The converter input source.
//!

///
/// The converter input source.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A result set written by the revision sweeper.
    #[default]
    Checkpoint,
    /// A directory of raw benchmark outputs, one collective per file.
    Logs,
}

impl std::str::FromStr for Source {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "checkpoint" => Ok(Self::Checkpoint),
            "logs" => Ok(Self::Logs),
            string => anyhow::bail!(
                "Unknown input source `{string}`. Supported sources: {}",
                vec![Self::Checkpoint, Self::Logs]
                    .into_iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ")
            ),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkpoint => write!(f, "checkpoint"),
            Self::Logs => write!(f, "logs"),
        }
    }
}

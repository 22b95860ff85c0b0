//!
//! The identity of a report table.
//!

///
/// The identity of a report table.
///
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Label {
    /// One revision of a result set.
    Revision {
        /// The position in the sweep.
        index: usize,
        /// The revision identifier.
        commit: String,
        /// Whether the revision failed to build.
        build_failed: bool,
    },
    /// One collective and data type of aggregated raw outputs.
    Collective {
        /// The collective.
        collective: String,
        /// The element data type.
        data_type: String,
    },
}

impl Label {
    /// The maximum length of a worksheet name.
    pub const SHEET_NAME_LIMIT: usize = 31;

    /// The characters forbidden in worksheet names.
    const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

    ///
    /// The worksheet name, truncated to the spreadsheet limit.
    ///
    pub fn sheet_name(&self) -> String {
        let name = match self {
            Self::Revision { index, commit, .. } => format!("{index} {commit}"),
            Self::Collective {
                collective,
                data_type,
            } => format!("{collective} {data_type}"),
        };
        name.chars()
            .map(|character| {
                if Self::SHEET_NAME_FORBIDDEN.contains(&character) {
                    '_'
                } else {
                    character
                }
            })
            .take(Self::SHEET_NAME_LIMIT)
            .collect()
    }

    ///
    /// The caption above the table.
    ///
    pub fn caption(&self) -> String {
        match self {
            Self::Revision {
                index,
                commit,
                build_failed: false,
            } => format!("#{index} {commit}"),
            Self::Revision {
                index,
                commit,
                build_failed: true,
            } => format!("#{index} {commit} (build failed)"),
            Self::Collective {
                collective,
                data_type,
            } => format!("1-node {collective} {data_type}"),
        }
    }

    ///
    /// The leading CSV fields of every row of the table.
    ///
    pub fn csv_fields(&self) -> String {
        match self {
            Self::Revision { index, commit, .. } => format!(r#"{index}, "{commit}""#),
            Self::Collective { collective, .. } => format!(r#""{collective}""#),
        }
    }
}

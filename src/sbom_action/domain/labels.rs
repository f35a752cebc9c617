use std::fmt;

/// Comma-delimited label list attached to a published SBOM.
///
/// Entries are trimmed and empty entries dropped on construction, so the
/// joined form never carries stray whitespace or doubled commas.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelList(Vec<String>);

impl LabelList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl fmt::Display for LabelList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

use crate::sbom_action::policies::input_aliases::InputField;

/// InputSource port for raw action inputs
///
/// An input source answers lookups for a single key. Keys are matched
/// case-insensitively; an empty string counts as "not set" further up,
/// so implementations may return it as-is.
pub trait InputSource: Send + Sync {
    /// Returns the raw value for `key`, if this source carries one
    fn get(&self, key: &str) -> Option<String>;

    /// Human-readable name used in diagnostics
    fn describe(&self) -> &str;

    /// First non-blank value among the field's keys
    fn resolve(&self, field: &InputField) -> Option<String> {
        field.resolve(|key| self.get(key))
    }
}

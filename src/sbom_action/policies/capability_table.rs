use std::fmt;

/// CLI flags that only exist from a certain Manifest CLI release onward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedFlag {
    ApiUri,
    Source,
    Relationship,
    Active,
    AssetLabel,
    Enrich,
    ProductLabel,
    ProductId,
    GeneratorPreset,
    GeneratorConfig,
}

/// Minimum CLI version that understands each gated flag
const CAPABILITIES: &[(GatedFlag, &str)] = &[
    (GatedFlag::ApiUri, "0.4.0"),
    (GatedFlag::Source, "0.6.0"),
    (GatedFlag::Relationship, "0.6.0"),
    (GatedFlag::Active, "0.8.1"),
    (GatedFlag::AssetLabel, "0.8.1"),
    (GatedFlag::Enrich, "0.9.0"),
    (GatedFlag::ProductLabel, "0.9.1"),
    (GatedFlag::ProductId, "0.9.1"),
    (GatedFlag::GeneratorPreset, "0.10.0"),
    (GatedFlag::GeneratorConfig, "0.10.0"),
];

impl GatedFlag {
    /// Flag name as passed on the command line (without leading dashes)
    pub fn flag_name(&self) -> &'static str {
        match self {
            GatedFlag::ApiUri => "api-uri",
            GatedFlag::Source => "source",
            GatedFlag::Relationship => "relationship",
            GatedFlag::Active => "active",
            GatedFlag::AssetLabel => "asset-label",
            GatedFlag::Enrich => "enrich",
            GatedFlag::ProductLabel => "product-label",
            GatedFlag::ProductId => "product-id",
            GatedFlag::GeneratorPreset => "generator-preset",
            GatedFlag::GeneratorConfig => "generator-config",
        }
    }

    pub fn min_version(&self) -> &'static str {
        CAPABILITIES
            .iter()
            .find(|(flag, _)| flag == self)
            .map(|(_, version)| *version)
            .unwrap_or("0.0.0")
    }
}

impl fmt::Display for GatedFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.flag_name())
    }
}

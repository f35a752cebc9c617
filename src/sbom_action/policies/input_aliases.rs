//! Ordered candidate keys for every action input.
//!
//! Older workflow files use `bomName`, `sbomName` or plain `name` for the same
//! value. Each field lists its keys once, newest spelling first among the
//! camel-case names; the first non-empty value wins.

/// One configuration field and the input keys that may carry it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub keys: &'static [&'static str],
}

impl InputField {
    /// Key reported in error messages
    pub fn primary_key(&self) -> &'static str {
        self.keys[0]
    }

    /// Resolves the field against a key lookup, returning the first value that
    /// is non-empty after trimming.
    pub fn resolve<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.keys
            .iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

pub const API_KEY: InputField = InputField {
    name: "api key",
    keys: &["apiKey", "apikey", "api-key"],
};

pub const PATH: InputField = InputField {
    name: "target path",
    keys: &["path"],
};

pub const FILE_PATH: InputField = InputField {
    name: "sbom file path",
    keys: &["sbomFilePath", "bomFilePath", "sbom-file-path"],
};

pub const OUTPUT: InputField = InputField {
    name: "output format",
    keys: &["sbomOutput", "bomOutput", "sbom-output", "output"],
};

pub const NAME: InputField = InputField {
    name: "artifact name",
    keys: &["sbomName", "bomName", "name", "sbom-name"],
};

pub const VERSION: InputField = InputField {
    name: "artifact version",
    keys: &["sbomVersion", "bomVersion", "version", "sbom-version"],
};

pub const GENERATOR: InputField = InputField {
    name: "generator",
    keys: &["sbomGenerator", "bomGenerator", "generator", "sbom-generator"],
};

pub const GENERATOR_VERSION: InputField = InputField {
    name: "generator version",
    keys: &["generator-version", "sbom-generator-version"],
};

pub const GENERATOR_PRESET: InputField = InputField {
    name: "generator preset",
    keys: &["generator-preset"],
};

pub const GENERATOR_CONFIG: InputField = InputField {
    name: "generator config",
    keys: &["generator-config"],
};

pub const GENERATOR_FLAGS: InputField = InputField {
    name: "generator flags",
    keys: &["generator-flags", "sbom-generator-flags"],
};

pub const ARTIFACT: InputField = InputField {
    name: "artifact upload",
    keys: &["sbomArtifact", "bomArtifact", "artifact"],
};

pub const PUBLISH: InputField = InputField {
    name: "publish",
    keys: &["sbomPublish", "bomPublish", "publish", "sbom-publish"],
};

pub const SOURCE: InputField = InputField {
    name: "source",
    keys: &["source"],
};

pub const RELATIONSHIP: InputField = InputField {
    name: "relationship",
    keys: &["relationship"],
};

pub const ACTIVE: InputField = InputField {
    name: "active",
    keys: &["active"],
};

pub const ENRICH: InputField = InputField {
    name: "enrich",
    keys: &["enrich"],
};

pub const ASSET_LABELS: InputField = InputField {
    name: "asset labels",
    keys: &["sbomLabels", "bomLabels", "asset-labels"],
};

pub const PRODUCT_LABELS: InputField = InputField {
    name: "product labels",
    keys: &["product-labels"],
};

pub const PRODUCT_ID: InputField = InputField {
    name: "product id",
    keys: &["product-id"],
};

pub const API_URI: InputField = InputField {
    name: "api endpoint",
    keys: &["apiURI", "api-uri"],
};

pub const PUBLISH_MODE: InputField = InputField {
    name: "publish mode",
    keys: &["publish-mode"],
};

pub const TEST_LOCALLY: InputField = InputField {
    name: "local testing",
    keys: &["test-locally"],
};

pub const FAIL_ON_STDERR: InputField = InputField {
    name: "fail on stderr",
    keys: &["fail-on-stderr"],
};

pub const COMMAND_TIMEOUT: InputField = InputField {
    name: "command timeout",
    keys: &["command-timeout"],
};

/// Every field, for diagnostics and unknown-key detection
pub const ALL_FIELDS: &[InputField] = &[
    API_KEY,
    PATH,
    FILE_PATH,
    OUTPUT,
    NAME,
    VERSION,
    GENERATOR,
    GENERATOR_VERSION,
    GENERATOR_PRESET,
    GENERATOR_CONFIG,
    GENERATOR_FLAGS,
    ARTIFACT,
    PUBLISH,
    SOURCE,
    RELATIONSHIP,
    ACTIVE,
    ENRICH,
    ASSET_LABELS,
    PRODUCT_LABELS,
    PRODUCT_ID,
    API_URI,
    PUBLISH_MODE,
    TEST_LOCALLY,
    FAIL_ON_STDERR,
    COMMAND_TIMEOUT,
];

/// True when `key` is one of the recognized input keys (case-insensitive)
pub fn is_known_key(key: &str) -> bool {
    ALL_FIELDS
        .iter()
        .flat_map(|field| field.keys.iter())
        .any(|known| known.eq_ignore_ascii_case(key))
}

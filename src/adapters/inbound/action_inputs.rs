use crate::ports::inbound::InputSource;
use crate::sbom_action::policies::input_aliases::InputField;
use std::collections::HashMap;

const INPUT_PREFIX: &str = "INPUT_";

/// Normalized lookup key: lowercase, spaces as underscores
fn normalize(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

/// EnvInputs adapter for the GitHub Actions `INPUT_<NAME>` convention
///
/// The runner upper-cases input names and keeps hyphens, so `sbom-name`
/// arrives as `INPUT_SBOM-NAME`. The legacy `TEST_LOCALLY` variable is
/// honoured as the `test-locally` input.
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    values: HashMap<String, String>,
}

impl EnvInputs {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut values = HashMap::new();
        let mut test_locally = None;
        for (name, value) in vars {
            if let Some(input) = name.strip_prefix(INPUT_PREFIX) {
                values.insert(normalize(input), value);
            } else if name == "TEST_LOCALLY" {
                test_locally = Some(value);
            }
        }
        if let Some(value) = test_locally {
            values.entry("test-locally".to_string()).or_insert(value);
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl InputSource for EnvInputs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(&normalize(key)).cloned()
    }

    fn describe(&self) -> &str {
        "environment"
    }
}

/// MapInputs adapter for explicit key/value pairs (command line, config file)
#[derive(Debug, Clone, Default)]
pub struct MapInputs {
    name: String,
    values: HashMap<String, String>,
}

impl MapInputs {
    pub fn new<I, K, V>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: pairs
                .into_iter()
                .map(|(k, v)| (normalize(k.as_ref()), v.into()))
                .collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl InputSource for MapInputs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(&normalize(key)).cloned()
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

/// LayeredInputs adapter stacking sources by precedence
///
/// For each key the first layer holding a non-blank value wins. Fields are
/// resolved layer by layer: any alias on a higher layer beats every alias on
/// the layers below it.
#[derive(Default)]
pub struct LayeredInputs {
    layers: Vec<Box<dyn InputSource>>,
}

impl LayeredInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer below all existing ones
    pub fn with_layer(mut self, layer: impl InputSource + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.describe()).collect()
    }
}

impl InputSource for LayeredInputs {
    fn get(&self, key: &str) -> Option<String> {
        self.layers
            .iter()
            .filter_map(|layer| layer.get(key))
            .find(|value| !value.trim().is_empty())
    }

    fn describe(&self) -> &str {
        "layered inputs"
    }

    fn resolve(&self, field: &InputField) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.resolve(field))
    }
}

use super::{Generator, LabelList, PublishMode, Relationship, SbomFile, SbomFormat, StderrPolicy};
use crate::sbom_action::policies::input_aliases::{self as inputs, InputField};
use crate::shared::error::ActionError;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

/// Normalized run parameters for one action invocation.
///
/// Built once from the raw inputs; every enumerated value is validated here so
/// an invalid output format or generator fails before any network or process
/// activity.
#[derive(Debug)]
pub struct ActionConfig {
    pub api_key: Option<SecretString>,
    pub target_path: PathBuf,
    pub sbom_file: SbomFile,
    pub output: SbomFormat,
    pub name: String,
    pub version: Option<String>,
    pub generator: Generator,
    pub generator_version: String,
    pub generator_preset: String,
    pub generator_config: String,
    pub generator_flags: String,
    pub upload_artifact: bool,
    pub publish: bool,
    pub publish_mode: PublishMode,
    pub source: String,
    pub relationship: Option<Relationship>,
    pub active: String,
    pub enrich: String,
    pub asset_labels: LabelList,
    pub product_labels: LabelList,
    pub product_id: String,
    pub api_uri: String,
    pub test_locally: bool,
    pub stderr_policy: StderrPolicy,
    pub command_timeout: Option<Duration>,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            target_path: PathBuf::from("."),
            sbom_file: SbomFile::default(),
            output: SbomFormat::default(),
            name: String::new(),
            version: None,
            generator: Generator::default(),
            generator_version: String::new(),
            generator_preset: String::new(),
            generator_config: String::new(),
            generator_flags: String::new(),
            upload_artifact: true,
            publish: true,
            publish_mode: PublishMode::default(),
            source: String::new(),
            relationship: None,
            active: String::new(),
            enrich: String::new(),
            asset_labels: LabelList::default(),
            product_labels: LabelList::default(),
            product_id: String::new(),
            api_uri: String::new(),
            test_locally: false,
            stderr_policy: StderrPolicy::default(),
            command_timeout: None,
        }
    }
}

impl ActionConfig {
    /// Resolves every field through its alias list against a single key lookup.
    ///
    /// # Errors
    /// Returns `ActionError::InvalidInput` for any value outside its enumeration,
    /// an unparseable boolean or a non-numeric timeout
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ActionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_fields(|field| field.resolve(&lookup))
    }

    /// Builds the configuration from a per-field resolver.
    ///
    /// Layered sources resolve a whole field per layer, so an alias set on a
    /// higher layer beats the primary key set on a lower one.
    ///
    /// # Errors
    /// Same as [`ActionConfig::from_lookup`]
    pub fn from_fields<F>(resolve: F) -> Result<Self, ActionError>
    where
        F: Fn(&InputField) -> Option<String>,
    {
        let get = |field: &InputField| resolve(field);
        let text = |field: &InputField| get(field).unwrap_or_default();
        let defaults = Self::default();

        let output = match get(&inputs::OUTPUT) {
            Some(value) => SbomFormat::parse_input(inputs::OUTPUT.primary_key(), &value)?,
            None => defaults.output,
        };
        let generator = match get(&inputs::GENERATOR) {
            Some(value) => Generator::parse_input(inputs::GENERATOR.primary_key(), &value)?,
            None => defaults.generator,
        };
        let relationship = get(&inputs::RELATIONSHIP)
            .map(|value| Relationship::parse_input(inputs::RELATIONSHIP.primary_key(), &value))
            .transpose()?;
        let publish_mode = match get(&inputs::PUBLISH_MODE) {
            Some(value) => PublishMode::parse_input(inputs::PUBLISH_MODE.primary_key(), &value)?,
            None => defaults.publish_mode,
        };
        let fail_on_stderr =
            parse_bool(&inputs::FAIL_ON_STDERR, get(&inputs::FAIL_ON_STDERR), false)?;
        let stderr_policy = if fail_on_stderr {
            StderrPolicy::Fail
        } else {
            StderrPolicy::Warn
        };

        Ok(Self {
            api_key: get(&inputs::API_KEY).map(SecretString::from),
            target_path: get(&inputs::PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.target_path),
            sbom_file: SbomFile::new(&text(&inputs::FILE_PATH)),
            output,
            name: text(&inputs::NAME),
            version: get(&inputs::VERSION),
            generator,
            generator_version: text(&inputs::GENERATOR_VERSION),
            generator_preset: text(&inputs::GENERATOR_PRESET),
            generator_config: text(&inputs::GENERATOR_CONFIG),
            generator_flags: text(&inputs::GENERATOR_FLAGS),
            upload_artifact: parse_bool(
                &inputs::ARTIFACT,
                get(&inputs::ARTIFACT),
                defaults.upload_artifact,
            )?,
            publish: parse_bool(&inputs::PUBLISH, get(&inputs::PUBLISH), defaults.publish)?,
            publish_mode,
            source: text(&inputs::SOURCE),
            relationship,
            active: text(&inputs::ACTIVE),
            enrich: text(&inputs::ENRICH),
            asset_labels: LabelList::parse(&text(&inputs::ASSET_LABELS)),
            product_labels: LabelList::parse(&text(&inputs::PRODUCT_LABELS)),
            product_id: text(&inputs::PRODUCT_ID),
            api_uri: text(&inputs::API_URI),
            test_locally: parse_bool(&inputs::TEST_LOCALLY, get(&inputs::TEST_LOCALLY), false)?,
            stderr_policy,
            command_timeout: parse_timeout(get(&inputs::COMMAND_TIMEOUT))?,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Name under which the SBOM is uploaded as a build artifact
    pub fn artifact_name(&self) -> String {
        if self.name.is_empty() {
            "sbom".to_string()
        } else {
            format!("{}-sbom", self.name)
        }
    }
}

fn parse_bool(
    field: &InputField,
    value: Option<String>,
    default: bool,
) -> Result<bool, ActionError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "enabled" => Ok(true),
        "false" | "no" | "0" | "disabled" => Ok(false),
        _ => Err(ActionError::InvalidInput {
            input: field.primary_key().to_string(),
            value,
            expected: "true, false".to_string(),
        }),
    }
}

fn parse_timeout(value: Option<String>) -> Result<Option<Duration>, ActionError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(seconds) => Ok(Some(Duration::from_secs(seconds))),
        Err(_) => Err(ActionError::InvalidInput {
            input: inputs::COMMAND_TIMEOUT.primary_key().to_string(),
            value,
            expected: "a whole number of seconds".to_string(),
        }),
    }
}

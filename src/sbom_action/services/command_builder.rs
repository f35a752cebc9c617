use super::capability_gate::{CapabilityGate, CapabilityWarning};
use crate::sbom_action::domain::{ActionConfig, CommandLine};
use crate::sbom_action::policies::GatedFlag;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable through which the CLI reads the API key
pub const API_KEY_ENV: &str = "MANIFEST_API_KEY";

/// A command plus the capability warnings raised while building it
#[derive(Debug)]
pub struct BuiltCommand {
    pub command: CommandLine,
    pub warnings: Vec<CapabilityWarning>,
}

/// Builds the `install`, `sbom` and `publish` invocations of the Manifest CLI.
///
/// Pure: nothing here touches the filesystem, the network or a process.
pub struct CommandBuilder {
    binary: String,
    gate: CapabilityGate,
}

impl CommandBuilder {
    pub fn new(binary: impl Into<String>, tool_version: &str) -> Self {
        Self {
            binary: binary.into(),
            gate: CapabilityGate::new(tool_version),
        }
    }

    /// `manifest install --generator="<g>" --version="<v>"`
    pub fn install(&self, config: &ActionConfig) -> CommandLine {
        let version = config
            .generator
            .version_or_default(&config.generator_version);
        CommandLine::new(&self.binary)
            .arg("install")
            .flag("generator", config.generator.as_str())
            .flag("version", version)
    }

    /// `manifest sbom ...`; `version` is the resolved artifact version
    pub fn generate(&self, config: &ActionConfig, version: Option<&str>) -> BuiltCommand {
        let mut warnings = Vec::new();
        let mut command = CommandLine::new(&self.binary)
            .arg("sbom")
            .flag("file", config.sbom_file.stem())
            .flag("output", config.output.as_str());

        if !config.name.is_empty() {
            command = command.flag("name", &config.name);
        }
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            command = command.flag("version", version);
        }
        command = command.flag("generator", config.generator.as_str());

        command = self.gated(
            command,
            GatedFlag::GeneratorPreset,
            &config.generator_preset,
            &mut warnings,
        );
        command = self.gated(
            command,
            GatedFlag::GeneratorConfig,
            &config.generator_config,
            &mut warnings,
        );

        let command = command
            .positional(&config.target_path.to_string_lossy())
            .passthrough(&config.generator_flags);

        BuiltCommand { command, warnings }
    }

    /// `manifest publish --ignore-validation="true" ... "<file>"`.
    ///
    /// The API key, when present, travels as the `MANIFEST_API_KEY` secret
    /// environment variable and never as a flag.
    pub fn publish(&self, config: &ActionConfig) -> BuiltCommand {
        let mut warnings = Vec::new();
        let mut command = CommandLine::new(&self.binary)
            .arg("publish")
            .flag("ignore-validation", "true");

        let relationship = config
            .relationship
            .map(|r| r.as_str().to_string())
            .unwrap_or_default();
        let enrich = config.enrich.to_uppercase();
        let asset_labels = config.asset_labels.joined();
        let product_labels = config.product_labels.joined();

        let optional = [
            (GatedFlag::ApiUri, config.api_uri.as_str()),
            (GatedFlag::Source, config.source.as_str()),
            (GatedFlag::Relationship, relationship.as_str()),
            (GatedFlag::Active, config.active.as_str()),
            (GatedFlag::Enrich, enrich.as_str()),
            (GatedFlag::AssetLabel, asset_labels.as_str()),
            (GatedFlag::ProductLabel, product_labels.as_str()),
            (GatedFlag::ProductId, config.product_id.as_str()),
        ];
        for (flag, value) in optional {
            command = self.gated(command, flag, value, &mut warnings);
        }

        command = command.positional(config.sbom_file.full());

        if let Some(key) = &config.api_key {
            command = command.secret_env(
                API_KEY_ENV,
                SecretString::from(key.expose_secret().to_string()),
            );
        }

        BuiltCommand { command, warnings }
    }

    fn gated(
        &self,
        command: CommandLine,
        flag: GatedFlag,
        value: &str,
        warnings: &mut Vec<CapabilityWarning>,
    ) -> CommandLine {
        if value.is_empty() {
            return command;
        }
        match self.gate.check(flag) {
            Ok(()) => command.flag(flag.flag_name(), value),
            Err(warning) => {
                warnings.push(warning);
                command
            }
        }
    }
}

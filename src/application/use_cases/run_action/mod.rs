use crate::application::dto::{ActionRequest, ActionResponse, PublishOutcome, SkipReason};
use crate::ports::inbound::SbomActionPort;
use crate::ports::outbound::{
    ArtifactStore, CommandOutput, CommandRunner, ProgressReporter, PublishRequest, ReleaseIndex,
    SbomPublisher, ToolProvisioner, UploadDescriptor, VersionSource,
};
use crate::sbom_action::domain::{
    ActionConfig, CommandLine, InstalledTool, Platform, PublishMode, ResolvedRelease, ToolSpec,
};
use crate::sbom_action::services::{
    resolve_version, BuiltCommand, CapabilityWarning, CommandBuilder, ResolvedVersion,
};
use crate::shared::error::ActionError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ResolveRelease,
    AcquireTool,
    DeriveVersion,
    GenerateSbom,
    UpdateLocalSbomHook,
    UploadArtifact,
    Publish,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ResolveRelease => "resolve-release",
            Step::AcquireTool => "acquire-tool",
            Step::DeriveVersion => "derive-version",
            Step::GenerateSbom => "generate-sbom",
            Step::UpdateLocalSbomHook => "update-local-sbom-hook",
            Step::UploadArtifact => "artifact-upload",
            Step::Publish => "publish",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn step_failed(step: Step) -> String {
    format!("Step '{}' failed", step)
}

/// RunActionUseCase - Orchestrates the acquire, generate and publish pipeline
///
/// Steps run strictly in sequence and each one is awaited before the next
/// starts; the first fatal error halts the run with context naming the step.
///
/// # Type Parameters
/// * `RI` - ReleaseIndex implementation
/// * `TP` - ToolProvisioner implementation
/// * `CR` - CommandRunner implementation
/// * `VS` - VersionSource implementation
/// * `AS` - ArtifactStore implementation
/// * `SP` - SbomPublisher implementation (optional, direct publish mode only)
/// * `PR` - ProgressReporter implementation
pub struct RunActionUseCase<RI, TP, CR, VS, AS, SP, PR> {
    release_index: RI,
    tool_provisioner: TP,
    command_runner: CR,
    version_source: VS,
    artifact_store: AS,
    publisher: Option<SP>,
    progress_reporter: PR,
}

impl<RI, TP, CR, VS, AS, SP, PR> RunActionUseCase<RI, TP, CR, VS, AS, SP, PR>
where
    RI: ReleaseIndex,
    TP: ToolProvisioner,
    CR: CommandRunner,
    VS: VersionSource,
    AS: ArtifactStore,
    SP: SbomPublisher,
    PR: ProgressReporter,
{
    /// Creates a new RunActionUseCase with injected dependencies
    pub fn new(
        release_index: RI,
        tool_provisioner: TP,
        command_runner: CR,
        version_source: VS,
        artifact_store: AS,
        publisher: Option<SP>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            release_index,
            tool_provisioner,
            command_runner,
            version_source,
            artifact_store,
            publisher,
            progress_reporter,
        }
    }

    /// Executes the pipeline
    ///
    /// # Arguments
    /// * `request` - Validated configuration plus working paths
    ///
    /// # Returns
    /// ActionResponse describing what was generated, uploaded and published
    pub async fn execute(&self, request: ActionRequest) -> Result<ActionResponse> {
        let config = &request.config;
        let spec = ToolSpec::MANIFEST_CLI;
        let mut warnings = Vec::new();

        if let Some(key) = &config.api_key {
            self.progress_reporter.register_secret(key.expose_secret());
        }

        // Step 1: Resolve the latest release asset for this platform
        let release = self
            .resolve_release(&spec, request.platform)
            .await
            .with_context(|| step_failed(Step::ResolveRelease))?;

        // Step 2: Make sure the binary is installed
        let tool = self
            .acquire_tool(&spec, &release)
            .await
            .with_context(|| step_failed(Step::AcquireTool))?;

        // Step 3: Derive the artifact version when none was given
        let version = self.derive_version(&request, &mut warnings).await;

        // Step 4: Install the generator and generate the SBOM
        self.generate_sbom(&request, &tool, &version, &mut warnings)
            .await
            .with_context(|| step_failed(Step::GenerateSbom))?;

        // Step 5: Let the local hook post-process the SBOM
        self.run_hook(&request, &tool, &version, &mut warnings)
            .await
            .with_context(|| step_failed(Step::UpdateLocalSbomHook))?;

        // Step 6: Upload the SBOM as a build artifact
        let artifact = self
            .upload_artifact_if_requested(&request)
            .await
            .with_context(|| step_failed(Step::UploadArtifact))?;

        // Step 7: Publish
        let publish = self
            .publish_if_requested(&request, &tool, &mut warnings)
            .await
            .with_context(|| step_failed(Step::Publish))?;

        let response = ActionResponse {
            tool_version: tool.version,
            sbom_path: request.sbom_path(),
            version,
            artifact,
            publish,
            warnings,
        };
        self.report_summary(&response);
        Ok(response)
    }

    async fn resolve_release(
        &self,
        spec: &ToolSpec,
        platform: Platform,
    ) -> Result<ResolvedRelease> {
        let asset_name = spec.asset_name(platform);
        self.progress_reporter.report(&format!(
            "🔍 Resolving latest {} release ({})",
            spec.slug(),
            asset_name
        ));

        let release = self
            .release_index
            .latest_release(spec.owner, spec.repository)
            .await?;
        let resolved = release.select_asset(&spec.slug(), &asset_name)?;

        self.progress_reporter
            .report(&format!("✅ Found {} {}", spec.binary_name, resolved.version));
        Ok(resolved)
    }

    async fn acquire_tool(
        &self,
        spec: &ToolSpec,
        release: &ResolvedRelease,
    ) -> Result<InstalledTool> {
        let tool = self.tool_provisioner.provision(spec, release).await?;
        if tool.cached {
            self.progress_reporter.report(&format!(
                "📦 Using cached {} at {}",
                tool.binary_name,
                tool.binary_path.display()
            ));
        } else {
            self.progress_reporter.report(&format!(
                "📦 Installed {} {} to {}",
                tool.binary_name,
                tool.version,
                tool.bin_dir.display()
            ));
        }
        Ok(tool)
    }

    /// Walks the version candidates lazily; a failing candidate only warns.
    async fn derive_version(
        &self,
        request: &ActionRequest,
        warnings: &mut Vec<String>,
    ) -> ResolvedVersion {
        let config = &request.config;
        if let Some(explicit) = config.version.as_deref() {
            return resolve_version(Some(explicit), None, None, None, Utc::now());
        }

        let dir = request.target_dir();
        let manifest = self.candidate(
            "package.json version",
            self.version_source.manifest_version(&dir).await,
            warnings,
        );
        let tag = match manifest {
            Some(_) => None,
            None => self.candidate(
                "latest git tag",
                self.version_source.latest_tag(&dir).await,
                warnings,
            ),
        };
        let short_sha = match (&manifest, &tag) {
            (None, None) => self.candidate(
                "commit hash",
                self.version_source.short_sha(&dir).await,
                warnings,
            ),
            _ => None,
        };

        let version = resolve_version(
            None,
            manifest.as_deref(),
            tag.as_deref(),
            short_sha.as_deref(),
            Utc::now(),
        );
        self.progress_reporter.report(&format!(
            "🏷️  Using version {} (from {})",
            version.value, version.origin
        ));
        version
    }

    fn candidate(
        &self,
        what: &str,
        result: Result<Option<String>>,
        warnings: &mut Vec<String>,
    ) -> Option<String> {
        match result {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                self.warn(
                    format!("Could not read {} ({}): {:#}", what, Step::DeriveVersion, e),
                    warnings,
                );
                None
            }
        }
    }

    async fn generate_sbom(
        &self,
        request: &ActionRequest,
        tool: &InstalledTool,
        version: &ResolvedVersion,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let config = &request.config;
        let builder = CommandBuilder::new(&tool.binary_name, &tool.version);

        self.progress_reporter.report(&format!(
            "⚙️  Installing generator {}",
            config.generator
        ));
        let install = self.prepare(builder.install(config), request, tool);
        self.run_checked(&install, config, warnings).await?;

        self.progress_reporter.report(&format!(
            "📝 Generating {} SBOM at {}",
            config.output,
            config.sbom_file.full()
        ));
        let BuiltCommand { command, warnings: gated } =
            builder.generate(config, Some(version.value.as_str()));
        self.report_capability_warnings(gated, warnings);
        let generate = self.prepare(command, request, tool);
        self.run_checked(&generate, config, warnings).await?;
        Ok(())
    }

    async fn run_hook(
        &self,
        request: &ActionRequest,
        tool: &InstalledTool,
        version: &ResolvedVersion,
        warnings: &mut Vec<String>,
    ) -> Result<()> {
        let Some(script) = &request.hook_script else {
            self.progress_reporter
                .report("⏭️  No SBOM hook configured, skipping");
            return Ok(());
        };
        if !script.exists() {
            self.warn(
                format!("SBOM hook {} not found, skipping", script.display()),
                warnings,
            );
            return Ok(());
        }

        let config = &request.config;
        self.progress_reporter
            .report(&format!("🪝 Running SBOM hook {}", script.display()));
        let command = CommandLine::new("bash")
            .positional(&script.to_string_lossy())
            .env("SBOM_FILENAME", config.sbom_file.full())
            .env("SBOM_OUTPUT", config.output.as_str())
            .env("SBOM_NAME", config.name.as_str())
            .env("SBOM_VERSION", version.value.as_str());
        let command = self.prepare(command, request, tool);
        self.run_checked(&command, config, warnings).await?;
        Ok(())
    }

    async fn upload_artifact_if_requested(
        &self,
        request: &ActionRequest,
    ) -> Result<Option<UploadDescriptor>> {
        let config = &request.config;
        if !config.upload_artifact {
            self.progress_reporter
                .report("⏭️  Artifact upload disabled, skipping");
            return Ok(None);
        }

        let name = config.artifact_name();
        let descriptor = self
            .artifact_store
            .upload(&name, &[request.sbom_path()], &request.work_dir)
            .await?;
        self.progress_reporter.report(&format!(
            "📤 Uploaded artifact '{}' to {}",
            descriptor.name,
            descriptor.location.display()
        ));
        Ok(Some(descriptor))
    }

    async fn publish_if_requested(
        &self,
        request: &ActionRequest,
        tool: &InstalledTool,
        warnings: &mut Vec<String>,
    ) -> Result<PublishOutcome> {
        let config = &request.config;
        let Some(api_key) = &config.api_key else {
            self.progress_reporter
                .report("⏭️  No API key provided, skipping publish");
            return Ok(PublishOutcome::Skipped(SkipReason::NoApiKey));
        };
        if !config.publish {
            self.progress_reporter
                .report("⏭️  Publishing disabled, skipping");
            return Ok(PublishOutcome::Skipped(SkipReason::Disabled));
        }

        match config.publish_mode {
            PublishMode::Cli => {
                self.progress_reporter.report("🚀 Publishing SBOM with the Manifest CLI");
                let builder = CommandBuilder::new(&tool.binary_name, &tool.version);
                let BuiltCommand { command, warnings: gated } = builder.publish(config);
                self.report_capability_warnings(gated, warnings);
                let command = self.prepare(command, request, tool);
                self.run_checked(&command, config, warnings).await?;
            }
            PublishMode::Direct => {
                let publisher = self.publisher.as_ref().ok_or_else(|| ActionError::Configuration {
                    details: "direct publish mode requires an HTTP publisher".to_string(),
                })?;
                self.progress_reporter.report("🚀 Publishing SBOM over HTTP");
                let publish_request = PublishRequest {
                    file_path: request.sbom_path(),
                    relationship: config.relationship.unwrap_or_default(),
                    source: config.source.clone(),
                    api_key: SecretString::from(api_key.expose_secret().to_string()),
                };
                let receipt = publisher.publish(&publish_request).await?;
                self.progress_reporter.report(&format!(
                    "✅ {} accepted the SBOM ({})",
                    receipt.endpoint, receipt.status
                ));
            }
        }
        Ok(PublishOutcome::Published(config.publish_mode))
    }

    /// Scopes a command to the work dir and the installed tool's directory
    fn prepare(
        &self,
        command: CommandLine,
        request: &ActionRequest,
        tool: &InstalledTool,
    ) -> CommandLine {
        command
            .search_path(&tool.bin_dir)
            .current_dir(&request.work_dir)
    }

    async fn run_checked(
        &self,
        command: &CommandLine,
        config: &ActionConfig,
        warnings: &mut Vec<String>,
    ) -> Result<CommandOutput> {
        self.progress_reporter.report(&format!("$ {}", command));
        let output = self.command_runner.run(command).await?;

        // Prefixed so a child line starting with `::` is never read as a workflow command
        for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
            self.progress_reporter.report(&format!("stdout: {}", line));
        }
        if let Some(stderr) = output.check(command, config.stderr_policy)? {
            self.warn(format!("{} wrote to stderr: {}", command.program(), stderr), warnings);
        }
        Ok(output)
    }

    fn report_capability_warnings(
        &self,
        gated: Vec<CapabilityWarning>,
        warnings: &mut Vec<String>,
    ) {
        for warning in gated {
            self.warn(warning.to_string(), warnings);
        }
    }

    fn warn(&self, message: String, warnings: &mut Vec<String>) {
        self.progress_reporter.report_warning(&message);
        warnings.push(message);
    }

    fn report_summary(&self, response: &ActionResponse) {
        let publish = match &response.publish {
            PublishOutcome::Published(mode) => format!("published via {}", mode.as_str()),
            PublishOutcome::Skipped(reason) => format!("not published ({})", reason),
        };
        let warnings = match response.warnings.len() {
            0 => String::new(),
            1 => ", 1 warning".to_string(),
            n => format!(", {} warnings", n),
        };
        self.progress_reporter.report_completion(&format!(
            "SBOM {} version {}, {}{}",
            response.sbom_path.display(),
            response.version.value,
            publish,
            warnings
        ));
    }
}

#[async_trait]
impl<RI, TP, CR, VS, AS, SP, PR> SbomActionPort for RunActionUseCase<RI, TP, CR, VS, AS, SP, PR>
where
    RI: ReleaseIndex,
    TP: ToolProvisioner,
    CR: CommandRunner,
    VS: VersionSource,
    AS: ArtifactStore,
    SP: SbomPublisher,
    PR: ProgressReporter,
{
    async fn run(&self, request: ActionRequest) -> Result<ActionResponse> {
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests;

use clap::Parser;
use manifest_sbom::adapters::inbound::{EnvInputs, LayeredInputs, MapInputs};
use manifest_sbom::adapters::outbound::console::ActionsConsoleReporter;
use manifest_sbom::adapters::outbound::filesystem::{DirectoryArtifactStore, TarGzExtractor};
use manifest_sbom::adapters::outbound::network::{
    token_from_env, upload_endpoint, GitHubReleaseClient, HttpDownloader, ManifestApiClient,
};
use manifest_sbom::adapters::outbound::process::{ProjectVersionSource, ShellRunner};
use manifest_sbom::application::dto::ActionRequest;
use manifest_sbom::application::use_cases::{RunActionUseCase, ToolAcquirer};
use manifest_sbom::cli::Args;
use manifest_sbom::config::{discover_config, load_config_from_path};
use manifest_sbom::ports::inbound::{InputSource, SbomActionPort};
use manifest_sbom::ports::outbound::ProgressReporter;
use manifest_sbom::sbom_action::domain::ActionConfig;
use manifest_sbom::shared::error::{category_of, ExitCode};
use manifest_sbom::shared::Result;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);
    let reporter = ActionsConsoleReporter::from_env();

    if let Err(e) = run(args, reporter.clone()).await {
        let message = match category_of(&e) {
            Some(category) => format!("[{}] {}", category.label(), e),
            None => e.to_string(),
        };

        // Display error chain
        let mut chain = vec![message];
        let mut source = e.source();
        while let Some(err) = source {
            chain.push(format!("Caused by: {}", err));
            source = err.source();
        }

        reporter.report_error(&chain.join("\n"));
        process::exit(ExitCode::Failure.as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Builds the input layers: command line, then `INPUT_*`, then the config file
fn load_inputs(args: &Args, reporter: &ActionsConsoleReporter) -> Result<LayeredInputs> {
    let config_file = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&args.work_dir)?,
    };

    let mut inputs = LayeredInputs::new()
        .with_layer(MapInputs::new("command line", args.input_pairs()))
        .with_layer(EnvInputs::from_env());

    if let Some(config_file) = config_file {
        for warning in config_file.warnings() {
            reporter.report_warning(&warning);
        }
        inputs = inputs.with_layer(config_file.to_inputs()?);
    }

    Ok(inputs)
}

async fn run(args: Args, reporter: ActionsConsoleReporter) -> Result<()> {
    // Configuration errors surface before any network or process activity
    let inputs = load_inputs(&args, &reporter)?;
    let config = ActionConfig::from_fields(|field| inputs.resolve(field))?;

    // Create adapters (Dependency Injection)
    let release_index = GitHubReleaseClient::new()?.with_token(token_from_env());
    let tool_provisioner = ToolAcquirer::new(
        HttpDownloader::new()?.with_progress(std::io::stderr().is_terminal()),
        TarGzExtractor::new(),
        args.tool_dir(),
        args.download_dir(),
    );
    let command_runner = ShellRunner::new().with_timeout(config.command_timeout);
    let version_source = ProjectVersionSource::new();
    let artifact_store = DirectoryArtifactStore::new(args.artifact_dir());
    let publisher = Some(ManifestApiClient::new(upload_endpoint(
        &config.api_uri,
        config.test_locally,
    ))?);

    // Create use case with injected dependencies
    let use_case = RunActionUseCase::new(
        release_index,
        tool_provisioner,
        command_runner,
        version_source,
        artifact_store,
        publisher,
        reporter,
    );

    let request = ActionRequest::new(config, args.work_dir.clone(), args.hook_script());
    use_case.run(request).await?;

    Ok(())
}

use super::*;
use crate::ports::outbound::PublishReceipt;
use crate::sbom_action::domain::{Release, ReleaseAsset, Relationship, StderrPolicy};
use crate::sbom_action::services::VersionOrigin;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// Mock implementations for testing

struct MockReleaseIndex {
    assets: Vec<&'static str>,
}

#[async_trait]
impl ReleaseIndex for MockReleaseIndex {
    async fn latest_release(&self, _owner: &str, _repository: &str) -> Result<Release> {
        Ok(Release {
            tag: "v0.9.1".to_string(),
            assets: self
                .assets
                .iter()
                .map(|name| ReleaseAsset {
                    name: name.to_string(),
                    download_url: format!("https://example.test/{}", name),
                })
                .collect(),
        })
    }
}

struct MockProvisioner {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ToolProvisioner for MockProvisioner {
    async fn provision(&self, spec: &ToolSpec, release: &ResolvedRelease) -> Result<InstalledTool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(InstalledTool {
            binary_name: spec.binary_name.to_string(),
            version: release.version.clone(),
            bin_dir: PathBuf::from("/tools/manifest"),
            binary_path: PathBuf::from("/tools/manifest/manifest"),
            cached: false,
        })
    }
}

#[derive(Debug, Clone)]
struct RecordedCommand {
    rendered: String,
    env: Vec<(String, String)>,
    secret_keys: Vec<String>,
    search_paths: Vec<PathBuf>,
}

/// Records every command and answers with the first matching canned output
struct MockRunner {
    log: Arc<Mutex<Vec<RecordedCommand>>>,
    responses: Vec<(&'static str, CommandOutput)>,
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        let rendered = command.render();
        self.log.lock().unwrap().push(RecordedCommand {
            rendered: rendered.clone(),
            env: command
                .env_vars()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            secret_keys: command.secret_env_keys().map(str::to_string).collect(),
            search_paths: command.search_paths().to_vec(),
        });
        Ok(self
            .responses
            .iter()
            .find(|(needle, _)| rendered.contains(needle))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(|| CommandOutput::success("")))
    }
}

#[derive(Default)]
struct MockVersionSource {
    manifest: Option<&'static str>,
    tag: Option<&'static str>,
    sha: Option<&'static str>,
    fail_manifest: bool,
    queries: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl VersionSource for MockVersionSource {
    async fn manifest_version(&self, _dir: &Path) -> Result<Option<String>> {
        self.queries.lock().unwrap().push("manifest");
        if self.fail_manifest {
            anyhow::bail!("package.json is not valid JSON");
        }
        Ok(self.manifest.map(str::to_string))
    }

    async fn latest_tag(&self, _dir: &Path) -> Result<Option<String>> {
        self.queries.lock().unwrap().push("tag");
        Ok(self.tag.map(str::to_string))
    }

    async fn short_sha(&self, _dir: &Path) -> Result<Option<String>> {
        self.queries.lock().unwrap().push("sha");
        Ok(self.sha.map(str::to_string))
    }
}

struct MockArtifactStore {
    uploads: Arc<Mutex<Vec<(String, Vec<PathBuf>)>>>,
}

#[async_trait]
impl ArtifactStore for MockArtifactStore {
    async fn upload(&self, name: &str, files: &[PathBuf], root: &Path) -> Result<UploadDescriptor> {
        self.uploads
            .lock()
            .unwrap()
            .push((name.to_string(), files.to_vec()));
        Ok(UploadDescriptor {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: root.join("artifacts").join(name),
            files: files.to_vec(),
        })
    }
}

struct MockPublisher {
    requests: Arc<Mutex<Vec<(PathBuf, Relationship, String, String)>>>,
    status: u16,
}

#[async_trait]
impl SbomPublisher for MockPublisher {
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt> {
        self.requests.lock().unwrap().push((
            request.file_path.clone(),
            request.relationship,
            request.source.clone(),
            request.api_key.expose_secret().to_string(),
        ));
        if self.status >= 300 {
            return Err(ActionError::PublishRejected {
                status: self.status,
                message: "denied".to_string(),
            }
            .into());
        }
        Ok(PublishReceipt {
            endpoint: "https://api.example.test/v1/sbom/upload".to_string(),
            status: self.status,
        })
    }
}

#[derive(Default, Clone)]
struct MockReporter {
    messages: Arc<Mutex<Vec<String>>>,
    warnings: Arc<Mutex<Vec<String>>>,
    secrets: Arc<Mutex<Vec<String>>>,
}

impl ProgressReporter for MockReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
    fn report_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
    fn register_secret(&self, secret: &str) {
        self.secrets.lock().unwrap().push(secret.to_string());
    }
}

type TestUseCase = RunActionUseCase<
    MockReleaseIndex,
    MockProvisioner,
    MockRunner,
    MockVersionSource,
    MockArtifactStore,
    MockPublisher,
    MockReporter,
>;

struct Harness {
    use_case: TestUseCase,
    commands: Arc<Mutex<Vec<RecordedCommand>>>,
    uploads: Arc<Mutex<Vec<(String, Vec<PathBuf>)>>>,
    published: Arc<Mutex<Vec<(PathBuf, Relationship, String, String)>>>,
    provisions: Arc<AtomicUsize>,
    reporter: MockReporter,
}

struct HarnessOptions {
    assets: Vec<&'static str>,
    responses: Vec<(&'static str, CommandOutput)>,
    versions: MockVersionSource,
    publisher_status: u16,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            assets: vec!["manifest_darwin_x86_64.tar.gz", "manifest_linux_x86_64.tar.gz"],
            responses: Vec::new(),
            versions: MockVersionSource::default(),
            publisher_status: 200,
        }
    }
}

fn harness(options: HarnessOptions) -> Harness {
    let commands = Arc::new(Mutex::new(Vec::new()));
    let uploads = Arc::new(Mutex::new(Vec::new()));
    let published = Arc::new(Mutex::new(Vec::new()));
    let provisions = Arc::new(AtomicUsize::new(0));
    let reporter = MockReporter::default();

    let use_case = RunActionUseCase::new(
        MockReleaseIndex {
            assets: options.assets,
        },
        MockProvisioner {
            calls: Arc::clone(&provisions),
        },
        MockRunner {
            log: Arc::clone(&commands),
            responses: options.responses,
        },
        options.versions,
        MockArtifactStore {
            uploads: Arc::clone(&uploads),
        },
        Some(MockPublisher {
            requests: Arc::clone(&published),
            status: options.publisher_status,
        }),
        reporter.clone(),
    );

    Harness {
        use_case,
        commands,
        uploads,
        published,
        provisions,
        reporter,
    }
}

fn request(config: ActionConfig) -> ActionRequest {
    ActionRequest::new(config, PathBuf::from("/work"), None)
}

fn rendered(h: &Harness) -> Vec<String> {
    h.commands
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.rendered.clone())
        .collect()
}

fn with_key(config: ActionConfig) -> ActionConfig {
    ActionConfig {
        api_key: Some(SecretString::from("key-123".to_string())),
        ..config
    }
}

#[tokio::test]
async fn test_demo_run_without_publish() {
    let h = harness(HarnessOptions::default());
    let config = with_key(ActionConfig {
        name: "demo".to_string(),
        version: Some("1.2.3".to_string()),
        publish: false,
        ..ActionConfig::default()
    });

    let response = h.use_case.execute(request(config)).await.unwrap();

    let commands = rendered(&h);
    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0],
        r#"manifest install --generator="syft" --version="v0.96.0""#
    );
    assert!(commands[1].contains(r#"--output="cyclonedx-json" --name="demo" --version="1.2.3""#));
    assert!(commands.iter().all(|c| !c.contains("publish")));

    assert_eq!(response.tool_version, "v0.9.1");
    assert_eq!(response.version.origin, VersionOrigin::Explicit);
    assert_eq!(response.publish, PublishOutcome::Skipped(SkipReason::Disabled));
    assert_eq!(response.sbom_path, PathBuf::from("/work/sbom.json"));
    assert_eq!(h.provisions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_no_api_key_skips_publish_even_when_enabled() {
    let h = harness(HarnessOptions::default());
    let config = ActionConfig {
        publish: true,
        ..ActionConfig::default()
    };

    let response = h.use_case.execute(request(config)).await.unwrap();

    assert_eq!(response.publish, PublishOutcome::Skipped(SkipReason::NoApiKey));
    assert!(rendered(&h).iter().all(|c| !c.contains("manifest publish")));
    assert!(h.published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cli_publish_passes_key_as_secret_env() {
    let h = harness(HarnessOptions::default());
    let config = with_key(ActionConfig {
        version: Some("1.0.0".to_string()),
        source: "ci".to_string(),
        ..ActionConfig::default()
    });

    let response = h.use_case.execute(request(config)).await.unwrap();

    assert_eq!(response.publish, PublishOutcome::Published(PublishMode::Cli));
    let commands = h.commands.lock().unwrap();
    let publish = commands.last().unwrap();
    assert_eq!(
        publish.rendered,
        r#"manifest publish --ignore-validation="true" --source="ci" "sbom.json""#
    );
    assert_eq!(publish.secret_keys, ["MANIFEST_API_KEY"]);
    assert!(!publish.rendered.contains("key-123"));
    assert_eq!(publish.search_paths, [PathBuf::from("/tools/manifest")]);
    assert_eq!(*h.reporter.secrets.lock().unwrap(), ["key-123"]);
}

#[tokio::test]
async fn test_direct_publish_uses_http_publisher() {
    let h = harness(HarnessOptions::default());
    let config = with_key(ActionConfig {
        version: Some("1.0.0".to_string()),
        publish_mode: PublishMode::Direct,
        relationship: Some(Relationship::Third),
        ..ActionConfig::default()
    });

    let response = h.use_case.execute(request(config)).await.unwrap();

    assert_eq!(response.publish, PublishOutcome::Published(PublishMode::Direct));
    let published = h.published.lock().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, PathBuf::from("/work/sbom.json"));
    assert_eq!(published[0].1, Relationship::Third);
    assert_eq!(published[0].3, "key-123");
    assert!(rendered(&h).iter().all(|c| !c.contains("manifest publish")));
}

#[tokio::test]
async fn test_direct_publish_rejection_is_network_error() {
    let h = harness(HarnessOptions {
        publisher_status: 403,
        ..HarnessOptions::default()
    });
    let config = with_key(ActionConfig {
        version: Some("1.0.0".to_string()),
        publish_mode: PublishMode::Direct,
        ..ActionConfig::default()
    });

    let err = h.use_case.execute(request(config)).await.unwrap_err();

    assert!(err.to_string().contains("publish"));
    let category = crate::shared::error::category_of(&err);
    assert_eq!(category, Some(crate::shared::error::ErrorCategory::Network));
}

#[tokio::test]
async fn test_missing_asset_halts_before_acquisition() {
    let h = harness(HarnessOptions {
        assets: vec!["manifest_windows_x86_64.zip"],
        ..HarnessOptions::default()
    });

    let err = h
        .use_case
        .execute(request(ActionConfig::default()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("resolve-release"));
    assert!(format!("{:#}", err).contains("manifest_windows_x86_64.zip"));
    assert_eq!(h.provisions.load(Ordering::SeqCst), 0);
    assert!(rendered(&h).is_empty());
}

#[tokio::test]
async fn test_failing_generate_halts_pipeline() {
    let h = harness(HarnessOptions {
        responses: vec![(
            "manifest sbom",
            CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "no such target".to_string(),
            },
        )],
        ..HarnessOptions::default()
    });
    let config = with_key(ActionConfig {
        version: Some("1.0.0".to_string()),
        ..ActionConfig::default()
    });

    let err = h.use_case.execute(request(config)).await.unwrap_err();

    assert!(err.to_string().contains("generate-sbom"));
    assert!(h.uploads.lock().unwrap().is_empty());
    assert!(rendered(&h).iter().all(|c| !c.contains("publish")));
}

#[tokio::test]
async fn test_stderr_policy_warn_versus_fail() {
    let noisy = || {
        vec![(
            "manifest install",
            CommandOutput {
                status: Some(0),
                stdout: "installed".to_string(),
                stderr: "warning: slow mirror".to_string(),
            },
        )]
    };

    let h = harness(HarnessOptions {
        responses: noisy(),
        ..HarnessOptions::default()
    });
    let response = h
        .use_case
        .execute(request(ActionConfig {
            version: Some("1.0.0".to_string()),
            ..ActionConfig::default()
        }))
        .await
        .unwrap();
    assert!(response.warnings.iter().any(|w| w.contains("slow mirror")));

    let h = harness(HarnessOptions {
        responses: noisy(),
        ..HarnessOptions::default()
    });
    let err = h
        .use_case
        .execute(request(ActionConfig {
            version: Some("1.0.0".to_string()),
            stderr_policy: StderrPolicy::Fail,
            ..ActionConfig::default()
        }))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("generate-sbom"));
    assert_eq!(rendered(&h).len(), 1);
}

#[tokio::test]
async fn test_capability_warnings_are_reported() {
    let h = harness(HarnessOptions::default());
    let config = with_key(ActionConfig {
        version: Some("1.0.0".to_string()),
        generator_preset: "strict".to_string(),
        ..ActionConfig::default()
    });

    let response = h.use_case.execute(request(config)).await.unwrap();

    assert!(response
        .warnings
        .iter()
        .any(|w| w.contains("--generator-preset requires Manifest CLI 0.10.0")));
    assert_eq!(h.reporter.warnings.lock().unwrap().len(), response.warnings.len());
}

#[tokio::test]
async fn test_version_from_manifest_skips_git_queries() {
    let versions = MockVersionSource {
        manifest: Some("2.3.4"),
        tag: Some("v9.9.9"),
        ..MockVersionSource::default()
    };
    let queries = Arc::clone(&versions.queries);
    let h = harness(HarnessOptions {
        versions,
        ..HarnessOptions::default()
    });

    let response = h
        .use_case
        .execute(request(ActionConfig::default()))
        .await
        .unwrap();

    assert_eq!(response.version.value, "2.3.4");
    assert_eq!(response.version.origin, VersionOrigin::Manifest);
    assert_eq!(*queries.lock().unwrap(), ["manifest"]);
    assert!(rendered(&h)[1].contains(r#"--version="2.3.4""#));
}

#[tokio::test]
async fn test_unreadable_manifest_warns_and_falls_back_to_tag() {
    let versions = MockVersionSource {
        tag: Some("v1.4.0"),
        fail_manifest: true,
        ..MockVersionSource::default()
    };
    let h = harness(HarnessOptions {
        versions,
        ..HarnessOptions::default()
    });

    let response = h
        .use_case
        .execute(request(ActionConfig::default()))
        .await
        .unwrap();

    assert_eq!(response.version.origin, VersionOrigin::GitTag);
    assert!(response
        .warnings
        .iter()
        .any(|w| w.contains("package.json is not valid JSON")));
}

#[tokio::test]
async fn test_synthesized_version_when_nothing_available() {
    let versions = MockVersionSource {
        sha: Some("0a1b2c3d4e"),
        ..MockVersionSource::default()
    };
    let h = harness(HarnessOptions {
        versions,
        ..HarnessOptions::default()
    });

    let response = h
        .use_case
        .execute(request(ActionConfig::default()))
        .await
        .unwrap();

    assert_eq!(response.version.origin, VersionOrigin::Synthesized);
    assert!(response.version.value.starts_with("v0.0.0-"));
    assert!(response.version.value.ends_with("-0a1b2c3"));
}

#[tokio::test]
async fn test_artifact_upload_toggle() {
    let h = harness(HarnessOptions::default());
    let config = ActionConfig {
        name: "demo".to_string(),
        version: Some("1.0.0".to_string()),
        ..ActionConfig::default()
    };
    let response = h.use_case.execute(request(config)).await.unwrap();
    let descriptor = response.artifact.unwrap();
    assert_eq!(descriptor.name, "demo-sbom");
    assert_eq!(
        *h.uploads.lock().unwrap(),
        [("demo-sbom".to_string(), vec![PathBuf::from("/work/sbom.json")])]
    );

    let h = harness(HarnessOptions::default());
    let config = ActionConfig {
        upload_artifact: false,
        version: Some("1.0.0".to_string()),
        ..ActionConfig::default()
    };
    let response = h.use_case.execute(request(config)).await.unwrap();
    assert!(response.artifact.is_none());
    assert!(h.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_hook_runs_with_sbom_environment() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("update-sbom.sh");
    std::fs::write(&script, "#!/bin/bash\n").unwrap();

    let h = harness(HarnessOptions::default());
    let config = ActionConfig {
        name: "demo".to_string(),
        version: Some("1.2.3".to_string()),
        ..ActionConfig::default()
    };
    let request = ActionRequest::new(config, PathBuf::from("/work"), Some(script.clone()));

    h.use_case.execute(request).await.unwrap();

    let commands = h.commands.lock().unwrap();
    let hook = commands
        .iter()
        .find(|c| c.rendered.starts_with("bash "))
        .unwrap();
    assert!(hook.rendered.contains("update-sbom.sh"));
    let env: std::collections::HashMap<_, _> = hook.env.iter().cloned().collect();
    assert_eq!(env["SBOM_FILENAME"], "sbom.json");
    assert_eq!(env["SBOM_OUTPUT"], "cyclonedx-json");
    assert_eq!(env["SBOM_NAME"], "demo");
    assert_eq!(env["SBOM_VERSION"], "1.2.3");
}

#[tokio::test]
async fn test_missing_hook_warns_and_continues() {
    let h = harness(HarnessOptions::default());
    let config = ActionConfig {
        version: Some("1.0.0".to_string()),
        ..ActionConfig::default()
    };
    let request = ActionRequest::new(
        config,
        PathBuf::from("/work"),
        Some(PathBuf::from("/definitely/not/here/update-sbom.sh")),
    );

    let response = h.use_case.execute(request).await.unwrap();

    assert!(response.warnings.iter().any(|w| w.contains("not found")));
    assert!(rendered(&h).iter().all(|c| !c.starts_with("bash ")));
}

#[tokio::test]
async fn test_runs_through_inbound_port() {
    let h = harness(HarnessOptions::default());
    let port: &dyn SbomActionPort = &h.use_case;
    let response = port
        .run(request(ActionConfig {
            version: Some("1.0.0".to_string()),
            ..ActionConfig::default()
        }))
        .await
        .unwrap();
    assert_eq!(response.tool_version, "v0.9.1");
}

#[tokio::test]
async fn test_child_stdout_is_prefixed() {
    let h = harness(HarnessOptions {
        responses: vec![(
            "manifest install",
            CommandOutput::success("::set-output name=x::y\ninstalled\n"),
        )],
        ..HarnessOptions::default()
    });
    h.use_case
        .execute(request(ActionConfig {
            version: Some("1.0.0".to_string()),
            ..ActionConfig::default()
        }))
        .await
        .unwrap();

    let messages = h.reporter.messages.lock().unwrap().clone();
    assert!(messages.contains(&"stdout: ::set-output name=x::y".to_string()));
    assert!(messages.contains(&"stdout: installed".to_string()));
    assert!(!messages.iter().any(|m| m.starts_with("::")));
}

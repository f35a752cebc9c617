use flate2::write::GzEncoder;
use flate2::Compression;

/// Shell stand-in for the Manifest CLI
///
/// Every invocation is appended to `manifest-calls.log` in the working
/// directory. `sbom` writes `<--file>.json`; `publish` insists on the API key
/// arriving through the environment.
pub const FAKE_CLI: &str = r##"#!/bin/sh
echo "$*" >> manifest-calls.log
case "$1" in
  install)
    echo "installed $2"
    ;;
  sbom)
    for arg in "$@"; do
      case "$arg" in
        --file=*) file="${arg#--file=}" ;;
      esac
    done
    mkdir -p "$(dirname "$file")"
    printf '{"bomFormat":"CycloneDX","specVersion":"1.5"}' > "$file.json"
    ;;
  publish)
    if [ -z "$MANIFEST_API_KEY" ]; then
      echo "missing api key" >&2
      exit 3
    fi
    echo "published"
    ;;
  *)
    echo "unknown command $1" >&2
    exit 64
    ;;
esac
"##;

/// A gzip tarball holding `manifest-cli/manifest`, one directory deep
pub fn fake_cli_tarball() -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut header = tar::Header::new_gnu();
    header.set_size(FAKE_CLI.len() as u64);
    header.set_mode(0o644);
    builder
        .append_data(&mut header, "manifest-cli/manifest", FAKE_CLI.as_bytes())
        .unwrap();

    builder.into_inner().unwrap().finish().unwrap()
}

/// Lines the fake CLI logged in `dir`
pub fn cli_calls(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("manifest-calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

//! Manifest sources
//!
//! A manifest is the concatenated YAML produced by templating a chart. It is
//! obtained either by shelling out to `helm template` or by reading text that
//! was rendered beforehand.

use super::{ManifestError, ManifestResult};
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

/// Anything able to produce manifest text
pub trait ManifestSource {
    /// Short human-readable description, used in logs
    fn describe(&self) -> String;

    /// Produce the full manifest text. Blocks until done.
    fn load(&self) -> ManifestResult<String>;
}

/// What to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub chart: PathBuf,
    pub release: String,
    pub namespace: Option<String>,
    pub values_files: Vec<PathBuf>,
}

impl RenderRequest {
    pub fn new(chart: impl Into<PathBuf>, release: impl Into<String>) -> Self {
        Self {
            chart: chart.into(),
            release: release.into(),
            namespace: None,
            values_files: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.is_empty());
        self
    }

    pub fn with_values_files(mut self, values_files: Vec<PathBuf>) -> Self {
        self.values_files = values_files;
        self
    }
}

/// Renders a chart with the `helm template` command
#[derive(Debug, Clone)]
pub struct HelmTemplate {
    binary: String,
    request: RenderRequest,
}

impl HelmTemplate {
    pub fn new(binary: impl Into<String>, request: RenderRequest) -> Self {
        Self {
            binary: binary.into(),
            request,
        }
    }

    /// Command line arguments passed to the helm binary
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "template".into(),
            self.request.release.clone().into(),
            self.request.chart.clone().into(),
        ];
        if let Some(namespace) = &self.request.namespace {
            args.push("--namespace".into());
            args.push(namespace.into());
        }
        for values in &self.request.values_files {
            args.push("-f".into());
            args.push(values.clone().into());
        }
        args
    }
}

impl ManifestSource for HelmTemplate {
    fn describe(&self) -> String {
        format!(
            "{} template {} {}",
            self.binary,
            self.request.release,
            self.request.chart.display()
        )
    }

    fn load(&self) -> ManifestResult<String> {
        tracing::debug!("Running {}", self.describe());

        let output = Command::new(&self.binary)
            .args(self.args())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ManifestError::HelmNotFound {
                    binary: self.binary.clone(),
                },
                _ => ManifestError::Io {
                    path: self.binary.clone(),
                    source: e,
                },
            })?;

        if !output.status.success() {
            // Keep both streams, helm reports template errors on stderr.
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ManifestError::Render {
                status: output.status.to_string(),
                output: combined,
            });
        }

        let manifest = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("helm template produced {} bytes", manifest.len());
        Ok(manifest)
    }
}

/// Pre-rendered manifest text on disk or on stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestFile {
    Path(PathBuf),
    Stdin,
}

impl ManifestFile {
    /// `-` selects stdin, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            ManifestFile::Stdin
        } else {
            ManifestFile::Path(PathBuf::from(arg))
        }
    }
}

impl ManifestSource for ManifestFile {
    fn describe(&self) -> String {
        match self {
            ManifestFile::Path(path) => path.display().to_string(),
            ManifestFile::Stdin => "<stdin>".to_string(),
        }
    }

    fn load(&self) -> ManifestResult<String> {
        match self {
            ManifestFile::Path(path) => {
                std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
            ManifestFile::Stdin => {
                let mut manifest = String::new();
                std::io::stdin()
                    .read_to_string(&mut manifest)
                    .map_err(|source| ManifestError::Io {
                        path: self.describe(),
                        source,
                    })?;
                Ok(manifest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(template: &HelmTemplate) -> Vec<String> {
        template
            .args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_helm_args_minimal() {
        let template = HelmTemplate::new("helm", RenderRequest::new("./chart", "my-release"));
        assert_eq!(args_of(&template), vec!["template", "my-release", "./chart"]);
    }

    #[test]
    fn test_helm_args_with_namespace_and_values() {
        let request = RenderRequest::new("./chart", "my-release")
            .with_namespace(Some("prod".to_string()))
            .with_values_files(vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml")]);
        let template = HelmTemplate::new("helm", request);
        assert_eq!(
            args_of(&template),
            vec![
                "template",
                "my-release",
                "./chart",
                "--namespace",
                "prod",
                "-f",
                "a.yaml",
                "-f",
                "b.yaml"
            ]
        );
    }

    #[test]
    fn test_empty_namespace_is_dropped() {
        let request = RenderRequest::new("./chart", "r").with_namespace(Some(String::new()));
        assert_eq!(request.namespace, None);
    }

    #[test]
    fn test_missing_binary() {
        let template = HelmTemplate::new(
            "helmgraph-definitely-not-a-binary",
            RenderRequest::new("./chart", "r"),
        );
        assert!(matches!(
            template.load(),
            Err(ManifestError::HelmNotFound { .. })
        ));
    }

    #[test]
    fn test_manifest_file_from_arg() {
        assert_eq!(ManifestFile::from_arg("-"), ManifestFile::Stdin);
        assert_eq!(
            ManifestFile::from_arg("out.yaml"),
            ManifestFile::Path(PathBuf::from("out.yaml"))
        );
    }

    #[test]
    fn test_manifest_file_missing() {
        let source = ManifestFile::Path(PathBuf::from("/nonexistent/helmgraph/manifest.yaml"));
        assert!(matches!(source.load(), Err(ManifestError::Io { .. })));
    }
}

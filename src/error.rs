use std::path::PathBuf;

/// Failure modes of an export run. Every variant is fatal and bubbles up to
/// the binary boundary where it turns into a nonzero exit; per-item problems
/// (a VMI without a name or namespace) are logged and skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unable to load cluster configuration: {0}")]
    ClusterConfig(#[source] kube::Error),

    #[error("error accessing KubeVirt API: {0}")]
    Api(#[source] kube::Error),

    #[error("unable to write report to {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

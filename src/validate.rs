use crate::cluster::{self, ClusterConfig};
use crate::config::OutputFormat;
use crate::utils;
use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CLUSTER_FILE_EXTENSIONS: &[&str] = &["yml", "yaml"];

#[derive(Debug)]
pub struct Outcome {
    pub path: PathBuf,
    pub result: anyhow::Result<ClusterConfig>,
}

#[derive(Serialize, Debug)]
struct Report<'a> {
    path: String,
    #[serde(flatten)]
    config: &'a ClusterConfig,
}

#[tracing::instrument(name = "validate::validate_paths", skip(paths), fields(paths = paths.len()))]
pub async fn validate_paths(paths: Vec<PathBuf>) -> anyhow::Result<Vec<Outcome>> {
    let mut files = vec![];

    for path in paths {
        let metadata = tokio::fs::metadata(&path)
            .await
            .with_context(|| format!("Failed to access {}", path.display()))?;

        if metadata.is_dir() {
            let mut found: Vec<PathBuf> = utils::scan_for_files(&path)
                .await
                .with_context(|| format!("Failed to scan {}", path.display()))?
                .into_iter()
                .filter(|file| utils::has_extension(file, CLUSTER_FILE_EXTENSIONS))
                .collect();

            info!(dir = %path.display(), files = found.len(), "Scanned cluster config directory");
            files.append(&mut found);
        } else {
            files.push(path);
        }
    }

    Ok(utils::parse_files(files, load_cluster_file)
        .await
        .into_iter()
        .map(|(path, result)| Outcome { path, result })
        .collect())
}

pub fn load_cluster_file(path: &Path) -> anyhow::Result<ClusterConfig> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to open cluster config {}", path.display()))?;

    cluster::from_bytes(&bytes)
        .with_context(|| format!("Invalid cluster config {}", path.display()))
}

pub fn render(outcomes: &[Outcome], format: OutputFormat) -> anyhow::Result<String> {
    let reports: Vec<Report> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.result.as_ref().ok().map(|config| Report {
                path: outcome.path.display().to_string(),
                config,
            })
        })
        .collect();

    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(&reports)?,
        OutputFormat::Json => serde_json::to_string_pretty(&reports)? + "\n",
    })
}

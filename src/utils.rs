use anyhow::anyhow;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::path::{Path, PathBuf};
use tracing::error;

pub async fn scan_for_files(path: impl AsRef<Path>) -> anyhow::Result<Vec<PathBuf>> {
    let mut dir_entries = tokio::fs::read_dir(path).await?;
    let mut files_in_folder = vec![];

    while let Some(dir_entry) = dir_entries.next_entry().await? {
        let is_file = dir_entry
            .file_type()
            .await
            .map(|file_type| file_type.is_file())
            .unwrap_or(false);

        if is_file {
            files_in_folder.push(dir_entry.path());
        }
    }

    Ok(files_in_folder)
}

/// Runs `parse_fn` for every file on the blocking pool and pairs each result
/// with its path, ordered by path. A failed task yields an error for its file.
pub async fn parse_files<T: 'static + Send>(
    files: Vec<PathBuf>,
    parse_fn: impl Fn(&Path) -> anyhow::Result<T> + 'static + Send + Copy,
) -> Vec<(PathBuf, anyhow::Result<T>)> {
    let mut handles = files
        .into_iter()
        .map(|path| {
            let task_path = path.clone();

            tokio::task::spawn_blocking(move || parse_fn(task_path.as_path()))
                .map(move |join_handle_result| (path, join_handle_result))
        })
        .collect::<FuturesUnordered<_>>();

    let mut results = vec![];

    while let Some((path, join_handle_result)) = handles.next().await {
        let result = join_handle_result.unwrap_or_else(|e| {
            error!(
                path = %path.display(),
                error = format!("{:?}", e).as_str(),
                "Parse task failed"
            );
            Err(anyhow!("Parse task for {} failed: {}", path.display(), e))
        });

        results.push((path, result));
    }

    results.sort_by(|(a, _), (b, _)| a.cmp(b));
    results
}

pub fn has_extension(path: impl AsRef<Path>, extensions: &[&str]) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

// Upload orchestration: find every file under the root, push them all
// to the site at once and fold the server's running size totals.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;
use walkdir::WalkDir;

use crate::api::{ApiClient, SiteSession};
use crate::content::content_type;
use crate::error::{Error, Result};
use crate::ui::Reporter;

/// One file to upload: where it is on disk and its `/`-joined path below
/// the root, which names it on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub path: PathBuf,
    pub rel_path: String,
}

/// What one successful upload reported.
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub rel_path: String,
    pub content_type: Option<&'static str>,
    pub size: u64,
    pub total_site_size: u64,
}

/// Outcome of uploading a whole directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub files: usize,
    /// Largest running total the server reported, `None` if nothing was
    /// uploaded.
    pub total_site_size: Option<u64>,
}

/// Every regular file below `root`, sorted by path. Directory symlinks
/// are not followed; symlinks to files are included.
pub fn collect_files(root: &Path) -> Result<Vec<UploadTask>> {
    let mut tasks = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        tasks.push(UploadTask {
            path: entry.path().to_path_buf(),
            rel_path: slash_path(relative),
        });
    }
    Ok(tasks)
}

/// Join path components with `/` whatever the platform separator is.
pub fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Upload every task concurrently.
///
/// All uploads are spawned at once with no limit. The first failure to
/// come back wins: the remaining uploads are aborted and joined before
/// that error is returned.
pub async fn upload_all(
    api: &ApiClient,
    session: &SiteSession,
    tasks: Vec<UploadTask>,
    reporter: &Reporter,
) -> Result<UploadSummary> {
    let files = tasks.len();
    let session = Arc::new(session.clone());
    let mut set = JoinSet::new();
    for task in tasks {
        let api = api.clone();
        let session = Arc::clone(&session);
        let reporter = reporter.clone();
        set.spawn(async move { upload_one(&api, &session, task, &reporter).await });
    }

    let mut total_site_size = None;
    while let Some(joined) = set.join_next().await {
        match joined.map_err(Error::from).and_then(|r| r) {
            Ok(result) => {
                total_site_size = total_site_size.max(Some(result.total_site_size));
            }
            Err(err) => {
                debug!(in_flight = set.len(), "aborting remaining uploads");
                set.shutdown().await;
                return Err(err);
            }
        }
    }

    Ok(UploadSummary {
        files,
        total_site_size,
    })
}

async fn upload_one(
    api: &ApiClient,
    session: &SiteSession,
    task: UploadTask,
    reporter: &Reporter,
) -> Result<UploadResult> {
    let ct = content_type(&task.rel_path);
    let body = tokio::fs::read(&task.path).await?;

    match api.upload_file(session, &task.rel_path, ct, body).await {
        Ok(info) => {
            let result = UploadResult {
                rel_path: task.rel_path,
                content_type: ct,
                size: info.size,
                total_site_size: info.total_site_size,
            };
            reporter.uploaded(&result);
            Ok(result)
        }
        Err(err) => {
            if let Error::Upload { path, status, body } = &err {
                reporter.failed(path, *status, body);
            }
            Err(err)
        }
    }
}

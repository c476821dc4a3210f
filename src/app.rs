// Top level flow of one run: check the directory, create a site, upload
// everything into it and print the closing report.

use std::path::Path;

use tracing::info;

use crate::api::{ApiClient, SiteSession};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::ui::Reporter;
use crate::upload::{self, UploadSummary};

/// A finished run: the site that was created and what went into it.
#[derive(Debug, Clone)]
pub struct Report {
    pub session: SiteSession,
    pub summary: UploadSummary,
}

/// Upload `dir` to a new site.
///
/// The directory is checked before the network is touched, and the site
/// is created before any file is read.
pub async fn run(config: &Config, dir: &Path, reporter: &Reporter) -> Result<Report> {
    let root = std::path::absolute(dir)?;
    if !root.is_dir() {
        return Err(Error::NotADirectory(root));
    }

    let api = ApiClient::new(config)?;
    let session = api.create_site().await?;
    let tasks = upload::collect_files(&root)?;
    info!(root = %root.display(), files = tasks.len(), "site created");
    reporter.site_created(&session, tasks.len());

    match upload::upload_all(&api, &session, tasks, reporter).await {
        Ok(summary) => {
            reporter.finished(&session, summary.total_site_size);
            Ok(Report { session, summary })
        }
        Err(err) => {
            reporter.abandon();
            Err(err)
        }
    }
}

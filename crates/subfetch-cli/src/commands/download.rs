//! `subfetch download`

use crate::cli::{DownloadArgs, OutputFormat};
use crate::workspace::{Workspace, check_format};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use subfetch_provider::{DownloadRequest, SubtitleProvider};
use tracing::info;

/// A subtitle stored in the temp area
#[derive(Debug, Clone, Serialize)]
pub struct SavedSubtitle {
    /// Where the file was written
    pub path: PathBuf,

    /// Name suggested by the provider
    pub file_name: String,

    /// Size of the file
    pub bytes: usize,
}

/// Download the subtitle file and store it in the workspace temp area
///
/// The format is checked before any request so an unusable extension does
/// not cost a download from the quota.
pub async fn download(
    args: &DownloadArgs,
    provider: &dyn SubtitleProvider,
    workspace: &Workspace,
) -> Result<SavedSubtitle> {
    check_format(&args.sub_format)?;
    let request = DownloadRequest::new(args.file_id).with_format(args.sub_format.clone());

    let subtitle = provider
        .download_subtitle(&request)
        .await
        .with_context(|| format!("Failed to download subtitle file {}", args.file_id))?;

    let path = workspace.store_subtitle(&subtitle.content, &args.sub_format)?;
    info!("Saved {} as {}", subtitle.file_name, path.display());

    Ok(SavedSubtitle {
        path,
        file_name: subtitle.file_name,
        bytes: subtitle.content.len(),
    })
}

/// Handle `subfetch download`
pub async fn handle(
    args: &DownloadArgs,
    format: OutputFormat,
    provider: &dyn SubtitleProvider,
    workspace: &Workspace,
) -> Result<()> {
    let saved = download(args, provider, workspace).await?;
    super::emit(format, &saved, &saved.path.display().to_string())
}

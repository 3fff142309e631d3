use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use updater_engine::{
    Category, DownloadClient, DownloadProgress, FileListing, ListingClient, UpdaterConfig,
    UpdaterError, select, utils::suggest_save_name,
};

use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The server answered but listed nothing.
    NoFiles,
    Saved { file_name: String, path: PathBuf },
}

/// What the front end hears about a running download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent<'a> {
    /// Sent once, right before the request goes out.
    Started {
        file_name: &'a str,
        destination: &'a Path,
    },
    Progress {
        file_name: &'a str,
        progress: DownloadProgress,
    },
}

/// List, pick, choose a destination, download.
pub struct Workflow<P: Prompter> {
    config: UpdaterConfig,
    listing: ListingClient,
    downloads: DownloadClient,
    prompter: P,
}

impl<P: Prompter> Workflow<P> {
    pub fn new(config: UpdaterConfig, prompter: P) -> Result<Self, UpdaterError> {
        let listing = ListingClient::new(config.listing_timeout())?;
        let downloads = DownloadClient::new(config.download_timeout(), config.chunk_size)?;
        Ok(Self {
            config,
            listing,
            downloads,
            prompter,
        })
    }

    pub async fn fetch_listing(&self, category: Category) -> Result<FileListing, UpdaterError> {
        self.listing.list(self.config.base_url(category)).await
    }

    /// Runs the whole workflow for one category.
    ///
    /// Every `UpdaterError` is returned as the error's root cause so callers
    /// can tell the kinds apart; prompt I/O errors are passed through as-is.
    pub async fn run<F>(&mut self, category: Category, mut on_event: F) -> Result<WorkflowOutcome>
    where
        F: FnMut(WorkflowEvent<'_>),
    {
        let files = self.fetch_listing(category).await?;
        if files.is_empty() {
            warn!("no {} files available", category);
            return Ok(WorkflowOutcome::NoFiles);
        }

        let input = self.prompter.pick_file(category, &files)?;
        let selected = select(&files, input.as_deref())?;
        info!("selected {} file {}", category, selected);

        let suggested = suggest_save_name(&selected, &self.config.default_save_ext);
        let Some(destination) = self.prompter.choose_save_path(&suggested)? else {
            info!("Status: Download canceled.");
            return Err(UpdaterError::CancelledByUser.into());
        };

        info!("Status: Downloading {} ...", selected);
        on_event(WorkflowEvent::Started {
            file_name: &selected,
            destination: &destination,
        });
        let path = self
            .downloads
            .download(
                self.config.base_url(category),
                &selected,
                &destination,
                |progress| {
                    on_event(WorkflowEvent::Progress {
                        file_name: &selected,
                        progress,
                    })
                },
            )
            .await?;
        info!("Status: {} downloaded successfully.", selected);

        Ok(WorkflowOutcome::Saved {
            file_name: selected,
            path,
        })
    }
}

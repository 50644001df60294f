// src/pipeline.rs

use crate::config::ReportConfig;
use crate::delivery::{DeliveryError, Messenger};
use crate::listings::extract_properties;
use crate::report::{chunk_report, newest_properties, render_report, utf16_len};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document read for every profile.
pub const LATEST_DOCUMENT: &str = "latest.md";

/// Directory names starting with this are templates, not profiles.
const TEMPLATE_PREFIX: char = '<';

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    Sent { chunks: usize, properties: usize },
    MissingDocument,
    NoProperties,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
    pub profile: String,
    pub outcome: ProfileOutcome,
}

/// Drives one pass of extract -> rank -> render -> chunk -> send over every
/// profile, strictly one message at a time.
pub struct ReportRunner<'a, M: Messenger + ?Sized> {
    config: &'a ReportConfig,
    messenger: &'a M,
}

impl<'a, M: Messenger + ?Sized> ReportRunner<'a, M> {
    pub fn new(config: &'a ReportConfig, messenger: &'a M) -> Self {
        Self { config, messenger }
    }

    /// Runs every profile in discovery order.
    ///
    /// Missing documents and empty documents are recorded and skipped. The
    /// first delivery or I/O failure stops the run; nothing already sent is
    /// tracked or retried.
    pub fn run(&self, today: NaiveDate) -> Result<Vec<ProfileReport>, PipelineError> {
        let root = self.config.profiles_root();
        let profiles = discover_profiles(&root)?;
        tracing::info!(count = profiles.len(), "Found profiles: {:?}", profiles);

        let mut reports = Vec::with_capacity(profiles.len());
        for profile in profiles {
            tracing::info!("Processing profile: {profile}");
            let outcome = self.process_profile(&root, &profile, today)?;
            reports.push(ProfileReport { profile, outcome });
        }

        Ok(reports)
    }

    fn process_profile(
        &self,
        root: &Path,
        profile: &str,
        today: NaiveDate,
    ) -> Result<ProfileOutcome, PipelineError> {
        let Some(content) = load_latest(root, profile)? else {
            tracing::warn!("No {LATEST_DOCUMENT} found for {profile}");
            return Ok(ProfileOutcome::MissingDocument);
        };

        let properties = extract_properties(&content);
        tracing::info!("Found {} properties in {profile}", properties.len());
        if properties.is_empty() {
            return Ok(ProfileOutcome::NoProperties);
        }

        let newest = newest_properties(&properties, self.config.top_n);
        let report = render_report(profile, &properties, &newest, today);
        tracing::debug!(units = utf16_len(&report), "Generated report");

        let chunks = chunk_report(&report, self.config.max_chunk_chars);
        self.deliver(&chunks)?;

        tracing::info!("✅ Report sent for {profile}");
        Ok(ProfileOutcome::Sent {
            chunks: chunks.len(),
            properties: properties.len(),
        })
    }

    fn deliver(&self, chunks: &[String]) -> Result<(), DeliveryError> {
        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 && !self.config.pacing.is_zero() {
                std::thread::sleep(self.config.pacing);
            }

            tracing::info!(
                "Sending chunk {}/{} ({} UTF-16 units)",
                i + 1,
                chunks.len(),
                utf16_len(chunk)
            );
            self.messenger.send_message(chunk)?;
        }
        Ok(())
    }
}

/// Profile directories directly under `root`, sorted by name.
///
/// A missing root is logged and treated as "no profiles".
pub fn discover_profiles(root: &Path) -> Result<Vec<String>, PipelineError> {
    if !root.is_dir() {
        tracing::error!("Profiles folder not found: {}", root.display());
        return Ok(Vec::new());
    }

    let io_err = |source: std::io::Error| PipelineError::Io {
        path: root.to_path_buf(),
        source,
    };

    let mut profiles = Vec::new();
    for entry in std::fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) if name.starts_with(TEMPLATE_PREFIX) => {}
            Ok(name) => profiles.push(name),
            Err(raw) => tracing::warn!("Skipping non UTF-8 profile folder {raw:?}"),
        }
    }

    profiles.sort();
    Ok(profiles)
}

/// Contents of `<root>/<profile>/latest.md`, or `None` when it does not exist.
pub fn load_latest(root: &Path, profile: &str) -> Result<Option<String>, PipelineError> {
    let path = root.join(profile).join(LATEST_DOCUMENT);

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PipelineError::Io { path, source }),
    }
}

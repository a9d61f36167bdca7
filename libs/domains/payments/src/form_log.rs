//! Append-only form log.
//!
//! Payment interest submissions are tagged with a UUID and appended to a
//! plain text file, one line per submission, and can be read back verbatim.

use crate::error::{PaymentError, PaymentResult};
use crate::models::FormLogRequest;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;
use uuid::Uuid;

/// Default log file location, relative to the working directory.
const DEFAULT_LOG_FILE: &str = "form_logs.txt";

/// Append-only UUID-tagged form log backed by a local file.
#[derive(Debug, Clone)]
pub struct FormLog {
    path: PathBuf,
}

impl FormLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log path from `FORM_LOG_FILE`, or the default next to the process.
    pub fn from_env() -> Self {
        let path =
            std::env::var("FORM_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Self::new(path)
    }

    /// Append one entry and return the UUID it was tagged with.
    pub async fn append(&self, entry: &FormLogRequest) -> PaymentResult<Uuid> {
        let id = Uuid::new_v4();
        let line = format!(
            "UUID: {}, Name: {}, Email: {}, Phone: {}, USD: {:.2}\n",
            id, entry.name, entry.email, entry.phone, entry.usd
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        info!(uuid = %id, path = %self.path.display(), "Form entry logged");
        Ok(id)
    }

    /// Read all logged lines back verbatim.
    ///
    /// Returns `LogNotFound` when nothing has been logged yet.
    pub async fn read_all(&self) -> PaymentResult<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents.lines().map(|l| format!("{}\n", l)).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PaymentError::LogNotFound),
            Err(e) => Err(PaymentError::Io(e)),
        }
    }
}

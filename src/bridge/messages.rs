//! Request and reply messages exchanged with the file worker

use crate::error::Error;
use crate::state::TabId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A document read from disk.
///
/// Field names mirror the `open-file` reply shape (`fileName`, `content`,
/// `filePath`) when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedFile {
    /// Final path segment
    pub file_name: String,
    pub content: String,
    pub file_path: PathBuf,
}

/// A full-content write to a known path, shaped like the `save-file`
/// request (`filePath`, `content`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub file_path: PathBuf,
    pub content: String,
}

/// Which bridge operation a reply belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOp {
    Open,
    Save,
}

/// A save captured at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveJob {
    /// Tab the result is applied to
    pub target: TabId,
    /// Destination; `None` asks the user through the save dialog
    pub path: Option<PathBuf>,
    /// File name proposed by the save dialog
    pub suggested_name: String,
    /// Directory the save dialog starts in
    pub initial_dir: Option<PathBuf>,
    /// Content snapshot to write
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeRequest {
    OpenFile,
    SaveFile(SaveJob),
}

impl BridgeRequest {
    pub fn op(&self) -> BridgeOp {
        match self {
            Self::OpenFile => BridgeOp::Open,
            Self::SaveFile(_) => BridgeOp::Save,
        }
    }
}

#[derive(Debug)]
pub enum BridgeReply {
    Opened(OpenedFile),
    Saved {
        target: TabId,
        path: PathBuf,
        /// The snapshot that was written
        content: String,
    },
    /// The user dismissed a dialog; nothing happened
    Cancelled(BridgeOp),
    Failed {
        op: BridgeOp,
        target: Option<TabId>,
        error: Error,
    },
}

//! Host side of the bridge: dialogs plus filesystem reads and writes
//!
//! `FileHost` is the only code that touches the disk. It runs on the bridge
//! worker thread and turns each request into exactly one reply.

use super::dialogs::FileDialogs;
use super::messages::{BridgeReply, BridgeRequest, OpenedFile, SaveJob, SaveRequest};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Filesystem
// ─────────────────────────────────────────────────────────────────────────────

/// Read a UTF-8 document.
///
/// Invalid UTF-8 is reported as a read failure.
pub fn read_document(path: &Path) -> Result<OpenedFile> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;

    let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(OpenedFile {
        file_name,
        content,
        file_path: path.to_path_buf(),
    })
}

/// Write the full content, replacing whatever is at the path.
pub fn write_document(request: &SaveRequest) -> Result<()> {
    fs::write(&request.file_path, request.content.as_bytes()).map_err(|source| {
        Error::FileWrite {
            path: request.file_path.clone(),
            source,
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// FileHost
// ─────────────────────────────────────────────────────────────────────────────

pub struct FileHost<D: FileDialogs> {
    dialogs: D,
}

impl<D: FileDialogs> FileHost<D> {
    pub fn new(dialogs: D) -> Self {
        Self { dialogs }
    }

    /// Ask for a file and read it. `Ok(None)` means the picker was cancelled.
    pub fn open_file(&self) -> Result<Option<OpenedFile>> {
        match self.dialogs.pick_file() {
            Some(path) => read_document(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Write `job`, asking for a destination first if it has none.
    ///
    /// Returns the path written, or `Ok(None)` if the save dialog was
    /// cancelled.
    pub fn save_file(&self, job: &SaveJob) -> Result<Option<std::path::PathBuf>> {
        let path = match &job.path {
            Some(path) => path.clone(),
            None => match self
                .dialogs
                .pick_save_path(&job.suggested_name, job.initial_dir.as_deref())
            {
                Some(path) => path,
                None => return Ok(None),
            },
        };

        write_document(&SaveRequest {
            file_path: path.clone(),
            content: job.content.clone(),
        })?;
        Ok(Some(path))
    }

    /// Serve one request.
    pub fn handle(&self, request: BridgeRequest) -> BridgeReply {
        let op = request.op();
        match request {
            BridgeRequest::OpenFile => match self.open_file() {
                Ok(Some(file)) => {
                    info!("Read {}", file.file_path.display());
                    BridgeReply::Opened(file)
                }
                Ok(None) => {
                    debug!("Open dialog cancelled");
                    BridgeReply::Cancelled(op)
                }
                Err(error) => {
                    warn!("Open failed: {}", error);
                    BridgeReply::Failed {
                        op,
                        target: None,
                        error,
                    }
                }
            },
            BridgeRequest::SaveFile(job) => match self.save_file(&job) {
                Ok(Some(path)) => {
                    info!("Wrote {}", path.display());
                    BridgeReply::Saved {
                        target: job.target,
                        path,
                        content: job.content,
                    }
                }
                Ok(None) => {
                    debug!("Save dialog cancelled");
                    BridgeReply::Cancelled(op)
                }
                Err(error) => {
                    warn!("Save failed: {}", error);
                    BridgeReply::Failed {
                        op,
                        target: Some(job.target),
                        error,
                    }
                }
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgeOp;
    use crate::state::TabId;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Dialogs that answer from a script and remember what they were asked.
    #[derive(Default, Clone)]
    struct ScriptedDialogs {
        open: Option<PathBuf>,
        save: Option<PathBuf>,
        save_prompts: Arc<Mutex<Vec<(String, Option<PathBuf>)>>>,
    }

    impl FileDialogs for ScriptedDialogs {
        fn pick_file(&self) -> Option<PathBuf> {
            self.open.clone()
        }

        fn pick_save_path(&self, suggested_name: &str, initial_dir: Option<&Path>) -> Option<PathBuf> {
            if let Ok(mut prompts) = self.save_prompts.lock() {
                prompts.push((suggested_name.to_string(), initial_dir.map(Path::to_path_buf)));
            }
            self.save.clone()
        }
    }

    fn job(path: Option<PathBuf>, content: &str) -> SaveJob {
        SaveJob {
            target: TabId(4),
            path,
            suggested_name: "Untitled.txt".to_string(),
            initial_dir: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_open_reads_selected_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hello.md");
        fs::write(&path, "# Hello").unwrap();

        let host = FileHost::new(ScriptedDialogs {
            open: Some(path.clone()),
            ..Default::default()
        });
        match host.handle(BridgeRequest::OpenFile) {
            BridgeReply::Opened(file) => {
                assert_eq!(file.file_name, "hello.md");
                assert_eq!(file.content, "# Hello");
                assert_eq!(file.file_path, path);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_open_cancelled() {
        let host = FileHost::new(ScriptedDialogs::default());
        assert!(matches!(
            host.handle(BridgeRequest::OpenFile),
            BridgeReply::Cancelled(BridgeOp::Open)
        ));
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let host = FileHost::new(ScriptedDialogs {
            open: Some(dir.path().join("gone.txt")),
            ..Default::default()
        });
        match host.handle(BridgeRequest::OpenFile) {
            BridgeReply::Failed { op, target, error } => {
                assert_eq!(op, BridgeOp::Open);
                assert!(target.is_none());
                assert!(matches!(error, Error::FileRead { .. }));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_open_invalid_utf8_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(matches!(
            read_document(&path),
            Err(Error::FileRead { .. })
        ));
    }

    #[test]
    fn test_open_then_save_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let original = "{\r\n  \"k\": \"välue\"\n}\n\n";
        fs::write(&path, original).unwrap();

        let opened = read_document(&path).unwrap();
        write_document(&SaveRequest {
            file_path: opened.file_path.clone(),
            content: opened.content,
        })
        .unwrap();

        assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
    }

    #[test]
    fn test_save_with_path_skips_dialog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let dialogs = ScriptedDialogs::default();
        let prompts = dialogs.save_prompts.clone();
        let host = FileHost::new(dialogs);

        match host.handle(BridgeRequest::SaveFile(job(Some(path.clone()), "body"))) {
            BridgeReply::Saved {
                target,
                path: saved,
                content,
            } => {
                assert_eq!(target, TabId(4));
                assert_eq!(saved, path);
                assert_eq!(content, "body");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "body");
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_save_without_path_prompts() {
        let dir = TempDir::new().unwrap();
        let chosen = dir.path().join("chosen.md");
        let dialogs = ScriptedDialogs {
            save: Some(chosen.clone()),
            ..Default::default()
        };
        let prompts = dialogs.save_prompts.clone();
        let host = FileHost::new(dialogs);

        let mut request = job(None, "text");
        request.initial_dir = Some(dir.path().to_path_buf());
        assert_eq!(host.save_file(&request).unwrap(), Some(chosen.clone()));
        assert_eq!(fs::read_to_string(&chosen).unwrap(), "text");

        let prompts = prompts.lock().unwrap();
        assert_eq!(
            prompts.as_slice(),
            &[("Untitled.txt".to_string(), Some(dir.path().to_path_buf()))]
        );
    }

    #[test]
    fn test_save_cancelled_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let dialogs = ScriptedDialogs::default();
        let prompts = dialogs.save_prompts.clone();
        let host = FileHost::new(dialogs);

        let mut request = job(None, "text");
        request.initial_dir = Some(dir.path().to_path_buf());
        assert!(matches!(
            host.handle(BridgeRequest::SaveFile(request)),
            BridgeReply::Cancelled(BridgeOp::Save)
        ));

        // The dialog was shown in `dir`, and nothing landed there.
        assert_eq!(prompts.lock().unwrap().len(), 1);
        assert_eq!(prompts.lock().unwrap()[0].1.as_deref(), Some(dir.path()));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/file.txt");
        let host = FileHost::new(ScriptedDialogs::default());

        match host.handle(BridgeRequest::SaveFile(job(Some(path), "x"))) {
            BridgeReply::Failed { op, target, error } => {
                assert_eq!(op, BridgeOp::Save);
                assert_eq!(target, Some(TabId(4)));
                assert!(matches!(error, Error::FileWrite { .. }));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_read_directory_path_without_name() {
        assert!(matches!(
            read_document(Path::new("/")),
            Err(Error::InvalidPath(_))
        ));
    }
}

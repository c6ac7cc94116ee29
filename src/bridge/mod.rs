//! File access bridge
//!
//! All native dialogs and filesystem access happen on a dedicated worker
//! thread. The UI submits `BridgeRequest`s and collects `BridgeReply`s once
//! per frame without blocking.

mod dialogs;
mod host;
pub mod messages;

pub use dialogs::{FileDialogs, NativeDialogs};
pub use host::FileHost;
pub use messages::{BridgeOp, BridgeReply, BridgeRequest, SaveJob};

use crate::error::{Error, Result};
use eframe::egui;
use log::{debug, info};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Something that accepts file requests.
///
/// Replies come back asynchronously; see `BridgeClient::poll`.
pub trait FileBridge {
    fn submit(&self, request: BridgeRequest) -> Result<()>;
}

/// UI-side handle to the bridge worker.
pub struct BridgeClient {
    requests: Sender<BridgeRequest>,
    replies: Receiver<BridgeReply>,
}

impl BridgeClient {
    /// Start the worker thread.
    ///
    /// When `repaint` is given, the worker wakes the UI after each reply.
    pub fn spawn<D: FileDialogs>(dialogs: D, repaint: Option<egui::Context>) -> Result<Self> {
        let (request_tx, request_rx) = channel::<BridgeRequest>();
        let (reply_tx, reply_rx) = channel::<BridgeReply>();
        let host = FileHost::new(dialogs);

        thread::Builder::new()
            .name("file-bridge".into())
            .spawn(move || {
                info!("File bridge started");
                for request in request_rx {
                    debug!("Bridge handling {:?}", request.op());
                    let reply = host.handle(request);
                    if reply_tx.send(reply).is_err() {
                        break;
                    }
                    if let Some(ctx) = &repaint {
                        ctx.request_repaint();
                    }
                }
                info!("File bridge stopped");
            })?;

        Ok(Self {
            requests: request_tx,
            replies: reply_rx,
        })
    }

    /// Collect every reply that has arrived since the last poll.
    pub fn poll(&self) -> Vec<BridgeReply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.replies.try_recv() {
            replies.push(reply);
        }
        replies
    }
}

impl FileBridge for BridgeClient {
    fn submit(&self, request: BridgeRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| Error::BridgeUnavailable)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::messages::{OpenedFile, SaveRequest};
    use super::*;
    use crate::state::TabId;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tempfile::TempDir;

    struct FixedDialogs {
        open: Option<PathBuf>,
        save: Option<PathBuf>,
    }

    impl FileDialogs for FixedDialogs {
        fn pick_file(&self) -> Option<PathBuf> {
            self.open.clone()
        }

        fn pick_save_path(&self, _: &str, _: Option<&Path>) -> Option<PathBuf> {
            self.save.clone()
        }
    }

    fn next_reply(client: &BridgeClient) -> BridgeReply {
        client
            .replies
            .recv_timeout(Duration::from_secs(5))
            .expect("bridge did not reply")
    }

    #[test]
    fn test_open_round_trip_through_worker() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello").unwrap();

        let client = BridgeClient::spawn(
            FixedDialogs {
                open: Some(path),
                save: None,
            },
            None,
        )
        .unwrap();

        client.submit(BridgeRequest::OpenFile).unwrap();
        match next_reply(&client) {
            BridgeReply::Opened(file) => assert_eq!(file.content, "hello"),
            other => panic!("unexpected reply: {:?}", other),
        }
        assert!(client.poll().is_empty());
    }

    #[test]
    fn test_replies_keep_request_order() {
        let dir = TempDir::new().unwrap();
        let client = BridgeClient::spawn(
            FixedDialogs {
                open: None,
                save: None,
            },
            None,
        )
        .unwrap();

        client.submit(BridgeRequest::OpenFile).unwrap();
        client
            .submit(BridgeRequest::SaveFile(SaveJob {
                target: TabId(1),
                path: Some(dir.path().join("b.txt")),
                suggested_name: "b.txt".to_string(),
                initial_dir: None,
                content: "b".to_string(),
            }))
            .unwrap();

        assert!(matches!(
            next_reply(&client),
            BridgeReply::Cancelled(BridgeOp::Open)
        ));
        assert!(matches!(
            next_reply(&client),
            BridgeReply::Saved { target: TabId(1), .. }
        ));
    }

    #[test]
    fn test_wire_types_use_camel_case() {
        let opened = OpenedFile {
            file_name: "a.txt".to_string(),
            content: "x".to_string(),
            file_path: PathBuf::from("/tmp/a.txt"),
        };
        let json = serde_json::to_value(&opened).unwrap();
        assert_eq!(json["fileName"], "a.txt");
        assert_eq!(json["filePath"], "/tmp/a.txt");
        assert_eq!(json["content"], "x");

        let request: SaveRequest =
            serde_json::from_str(r##"{"filePath":"/tmp/b.md","content":"# b"}"##).unwrap();
        assert_eq!(request.file_path, PathBuf::from("/tmp/b.md"));
        assert_eq!(request.content, "# b");
    }
}

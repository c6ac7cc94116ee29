//! Native file dialog integration using the rfd crate

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Extensions offered under "Text Files".
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "json", "xml", "csv"];

/// The pickers the file host needs.
///
/// Both return `None` when the user cancels.
pub trait FileDialogs: Send + 'static {
    fn pick_file(&self) -> Option<PathBuf>;

    fn pick_save_path(&self, suggested_name: &str, initial_dir: Option<&Path>) -> Option<PathBuf>;
}

/// System dialogs via rfd.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialogs;

fn with_filters(dialog: FileDialog) -> FileDialog {
    dialog
        .add_filter("Text Files", TEXT_EXTENSIONS)
        .add_filter("All Files", &["*"])
}

impl FileDialogs for NativeDialogs {
    fn pick_file(&self) -> Option<PathBuf> {
        with_filters(FileDialog::new().set_title("Open File")).pick_file()
    }

    fn pick_save_path(&self, suggested_name: &str, initial_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = with_filters(FileDialog::new().set_title("Save File"))
            .set_file_name(suggested_name);

        if let Some(dir) = initial_dir {
            dialog = dialog.set_directory(dir);
        }

        dialog.save_file()
    }
}

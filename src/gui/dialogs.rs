//! Modal dialogs backed by native message boxes

use crate::controller::ConfirmDialog;
use async_trait::async_trait;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

/// Overwrite confirmation via a native yes/no message box.
///
/// Runs on the worker task; the dialog blocks the job, not the UI event
/// loop.
pub struct NativeConfirm;

#[async_trait]
impl ConfirmDialog for NativeConfirm {
    async fn confirm_overwrite(&self, path: &Path) -> bool {
        let result = AsyncMessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("File Exists")
            .set_description(format!(
                "{} already exists. Do you want to replace it?",
                path.display()
            ))
            .set_buttons(MessageButtons::YesNo)
            .show()
            .await;

        matches!(result, MessageDialogResult::Yes)
    }
}

/// Info-OK modal used for input validation errors.
pub async fn show_input_error(message: String) {
    AsyncMessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Input Error")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}

/// Native folder picker for the destination directory.
pub async fn pick_destination_folder(start_dir: PathBuf) -> Option<PathBuf> {
    AsyncFileDialog::new()
        .set_title("Select Save Directory")
        .set_directory(start_dir)
        .pick_folder()
        .await
        .map(|handle| handle.path().to_path_buf())
}

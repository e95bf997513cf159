use std::fs::create_dir_all;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::error;

pub(crate) fn create_parent_dir_if_not_exist(path: &Path) -> io::Result<()> {
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.exists() {
            if let Err(e) = create_dir_all(parent_dir) {
                error!("Failed to create log directory: {:?}", e);
                return Err(e);
            }
        }
    }
    Ok(())
}

pub(crate) fn open_file_for_append(path: PathBuf) -> io::Result<File> {
    create_parent_dir_if_not_exist(&path)?;
    OpenOptions::new().append(true).create(true).open(&path)
}

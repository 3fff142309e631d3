use std::path::Path;
use tokio::{
    fs::{File, OpenOptions},
    io,
};

/// Opens `file` for writing from the start, truncating any previous content.
/// Parent directories are not created.
pub async fn open_file_writer(file: &Path) -> Result<File, io::Error> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file)
        .await
}

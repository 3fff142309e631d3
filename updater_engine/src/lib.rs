pub mod chunker;
pub mod download;
pub mod errors;
pub mod listing;
pub mod open_file_writer;
pub mod selection;
pub mod types;
pub mod updater_config;
pub mod utils;

pub use download::DownloadClient;
pub use errors::{ErrorKind, UpdaterError};
pub use listing::ListingClient;
pub use selection::select;
pub use types::{Category, DownloadProgress, DownloadRequest, FileListing};
pub use updater_config::UpdaterConfig;

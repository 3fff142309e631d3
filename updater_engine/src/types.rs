use std::{fmt, path::PathBuf};

/// Filenames in the order the server reported them.
pub type FileListing = Vec<String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Firmware,
    Effects,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Firmware => "firmware",
            Category::Effects => "effects",
        }
    }

    /// Heading used when presenting a listing of this category.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Firmware => "Firmware Files",
            Category::Effects => "Effects Files",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub base_url: String,
    pub file_name: String,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    pub downloaded: u64,
    /// 0 when the server did not report a size
    pub total: u64,
}

impl DownloadProgress {
    pub fn is_indeterminate(&self) -> bool {
        self.total == 0
    }

    /// Whole percent, 0 when the total is unknown.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.downloaded as u128 * 100) / self.total as u128;
        pct.min(100) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_truncates() {
        let progress = DownloadProgress {
            downloaded: 65536,
            total: 128000,
        };
        assert_eq!(progress.percentage(), 51);
        assert!(!progress.is_indeterminate());
    }

    #[test]
    fn unknown_total_is_indeterminate() {
        let progress = DownloadProgress {
            downloaded: 4096,
            total: 0,
        };
        assert!(progress.is_indeterminate());
        assert_eq!(progress.percentage(), 0);
    }

    #[test]
    fn overshoot_is_capped() {
        let progress = DownloadProgress {
            downloaded: 300,
            total: 200,
        };
        assert_eq!(progress.percentage(), 100);
    }
}

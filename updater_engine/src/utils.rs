use url::Url;

use crate::errors::UpdaterError;

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}

/// Joins `base_url` and `file_name` with exactly one `/`.
pub fn join_url(base_url: &str, file_name: &str) -> Result<Url, UpdaterError> {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return Err(UpdaterError::download("base URL is empty"));
    }
    let joined = format!("{}/{}", base, file_name);
    Url::parse(&joined).map_err(|err| UpdaterError::download(format!("invalid URL {joined}: {err}")))
}

/// Appends `ext` unless `name` already ends with it, ignoring case.
pub fn suggest_save_name(name: &str, ext: &str) -> String {
    if ext.is_empty() || name.to_lowercase().ends_with(&ext.to_lowercase()) {
        name.to_string()
    } else {
        format!("{}{}", name, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_trims_trailing_separators() {
        let url = join_url("http://localhost:8000/firmware/", "pedal-v2.bin").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/firmware/pedal-v2.bin");

        let url = join_url("http://localhost:8000/effects//", "fx.bin").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/effects/fx.bin");
    }

    #[test]
    fn join_rejects_empty_base() {
        let err = join_url("", "a.bin").unwrap_err();
        assert!(matches!(err, UpdaterError::DownloadFailure { .. }));

        let err = join_url("not a url", "a.bin").unwrap_err();
        assert!(matches!(err, UpdaterError::DownloadFailure { .. }));
    }

    #[test]
    fn save_name_gets_extension_once() {
        assert_eq!(suggest_save_name("pedal-v2", ".bin"), "pedal-v2.bin");
        assert_eq!(suggest_save_name("pedal-v2.bin", ".bin"), "pedal-v2.bin");
        assert_eq!(suggest_save_name("PEDAL.BIN", ".bin"), "PEDAL.BIN");
        assert_eq!(suggest_save_name("reverb.fx", ""), "reverb.fx");
    }

    #[test]
    fn bytes_are_humanized() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(128000), "125.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.00 MB");
    }
}

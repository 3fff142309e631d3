use colored::Colorize;
use std::io::{self, Write};
use updater_engine::{DownloadProgress, utils::format_bytes};

const TAB_SPACE: &str = "  ";
const CLEAR_LINE: &str = "\x1B[K";

/// Redraws a single progress line in place on stdout.
pub struct ProgressPrinter {
    file_name: String,
    width: usize,
    drawn: bool,
}

impl ProgressPrinter {
    pub fn new(file_name: impl Into<String>, width: usize) -> Self {
        Self {
            file_name: file_name.into(),
            width,
            drawn: false,
        }
    }

    pub fn update(&mut self, progress: DownloadProgress) {
        // carriage return without newline so the next update overwrites it
        print!(
            "\r{CLEAR_LINE}{}",
            progress_line(&self.file_name, progress, self.width)
        );
        // a failed flush only delays the redraw
        io::stdout().flush().ok();
        self.drawn = true;
    }

    /// Moves past the progress line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.drawn {
            println!();
            self.drawn = false;
        }
    }
}

pub fn progress_line(file_name: &str, progress: DownloadProgress, width: usize) -> String {
    let downloaded = format_bytes(progress.downloaded);
    if progress.is_indeterminate() {
        return format!(
            "{TAB_SPACE}{} {} {}",
            file_name,
            "━".repeat(width).bright_black(),
            downloaded
        );
    }

    let (filled, empty) = bar_split(progress.percentage(), width);
    format!(
        "{TAB_SPACE}{} {}{} {} [{}/{}]",
        file_name,
        "━".repeat(filled).green(),
        "━".repeat(empty).bright_black(),
        format!("{}%", progress.percentage()).blue(),
        downloaded,
        format_bytes(progress.total)
    )
}

fn bar_split(percentage: u8, width: usize) -> (usize, usize) {
    let filled = ((width as f64) * (percentage.min(100) as f64 / 100.0)).round() as usize;
    (filled, width - filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar_split(0, 40), (0, 40));
        assert_eq!(bar_split(50, 40), (20, 20));
        assert_eq!(bar_split(100, 40), (40, 0));
    }

    #[test]
    fn line_shows_percentage_and_sizes() {
        colored::control::set_override(false);
        let line = progress_line(
            "pedal-v2.bin",
            DownloadProgress {
                downloaded: 64000,
                total: 128000,
            },
            10,
        );
        assert_eq!(line, "  pedal-v2.bin ━━━━━━━━━━ 50% [62.50 KB/125.00 KB]");
    }

    #[test]
    fn unknown_total_shows_bytes_only() {
        colored::control::set_override(false);
        let line = progress_line(
            "fx.bin",
            DownloadProgress {
                downloaded: 2048,
                total: 0,
            },
            4,
        );
        assert_eq!(line, "  fx.bin ━━━━ 2.00 KB");
    }
}

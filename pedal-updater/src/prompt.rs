use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use std::path::{Component, Path, PathBuf};
use updater_engine::{Category, UpdaterError};

/// The human side of the workflow.
pub trait Prompter {
    /// Raw name typed by the user; `None` when nothing was entered.
    fn pick_file(&mut self, category: Category, files: &[String]) -> Result<Option<String>>;

    /// Destination for the download; `None` when the user declined.
    fn choose_save_path(&mut self, suggested: &str) -> Result<Option<PathBuf>>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn pick_file(&mut self, category: Category, files: &[String]) -> Result<Option<String>> {
        (**self).pick_file(category, files)
    }

    fn choose_save_path(&mut self, suggested: &str) -> Result<Option<PathBuf>> {
        (**self).choose_save_path(suggested)
    }
}

/// Uses command line values where given and asks on the terminal otherwise.
/// With `interactive` off, defaults are taken without asking.
#[derive(Debug, Clone)]
pub struct CliPrompter {
    pub file: Option<String>,
    pub out: Option<PathBuf>,
    pub interactive: bool,
    pub download_dir: PathBuf,
}

impl Prompter for CliPrompter {
    fn pick_file(&mut self, category: Category, files: &[String]) -> Result<Option<String>> {
        if let Some(file) = &self.file {
            return Ok(Some(file.clone()));
        }
        if !self.interactive {
            return Ok(None);
        }

        println!("{}", category.title().bold());
        for file in files {
            println!("  {}", file);
        }
        let default = files.first().map(String::as_str).unwrap_or_default();
        let choice: String = Input::new()
            .with_prompt(format!("Type the file name (Default: {})", default))
            .allow_empty(true)
            .interact_text()?;

        Ok(if choice.trim().is_empty() {
            None
        } else {
            Some(choice)
        })
    }

    fn choose_save_path(&mut self, suggested: &str) -> Result<Option<PathBuf>> {
        if let Some(out) = &self.out {
            return Ok(Some(out.clone()));
        }
        if !is_plain_file_name(suggested) {
            return Err(UpdaterError::download(format!(
                "refusing to save under server-supplied name '{}'",
                suggested
            ))
            .into());
        }
        let suggested_path = self.download_dir.join(suggested);
        if !self.interactive {
            return Ok(Some(suggested_path));
        }

        let answer: String = Input::new()
            .with_prompt("Save as (empty to cancel)")
            .with_initial_text(suggested_path.to_string_lossy())
            .allow_empty(true)
            .interact_text()?;

        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
    }
}

/// True for a single normal path component: no separators, no `..`, not absolute.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unattended() -> CliPrompter {
        CliPrompter {
            file: None,
            out: None,
            interactive: false,
            download_dir: PathBuf::from("/downloads"),
        }
    }

    #[test]
    fn unattended_takes_defaults() -> Result<()> {
        let mut prompter = unattended();
        let files = vec!["a.bin".to_string()];
        assert_eq!(prompter.pick_file(Category::Firmware, &files)?, None);
        assert_eq!(
            prompter.choose_save_path("a.bin")?,
            Some(PathBuf::from("/downloads/a.bin"))
        );
        Ok(())
    }

    #[test]
    fn unattended_refuses_names_outside_download_dir() {
        let mut prompter = unattended();
        for name in [
            "/home/user/.config/evil.bin",
            "../../etc/evil.bin",
            "nested/evil.bin",
            "..",
            "",
        ] {
            let err = prompter.choose_save_path(name).unwrap_err();
            let updater_error = err.downcast_ref::<UpdaterError>().unwrap();
            assert!(
                matches!(updater_error, UpdaterError::DownloadFailure { .. }),
                "{name:?} was accepted"
            );
        }
    }

    #[test]
    fn explicit_out_ignores_the_remote_name() -> Result<()> {
        let mut prompter = CliPrompter {
            out: Some(PathBuf::from("/tmp/out.bin")),
            ..unattended()
        };
        assert_eq!(
            prompter.choose_save_path("../evil.bin")?,
            Some(PathBuf::from("/tmp/out.bin"))
        );
        Ok(())
    }

    #[test]
    fn arguments_win_over_prompts() -> Result<()> {
        let mut prompter = CliPrompter {
            file: Some("b.bin".into()),
            out: Some(PathBuf::from("/tmp/out.bin")),
            interactive: true,
            ..unattended()
        };
        let files = vec!["a.bin".to_string(), "b.bin".to_string()];
        assert_eq!(
            prompter.pick_file(Category::Effects, &files)?,
            Some("b.bin".to_string())
        );
        assert_eq!(
            prompter.choose_save_path("b.bin")?,
            Some(PathBuf::from("/tmp/out.bin"))
        );
        Ok(())
    }
}

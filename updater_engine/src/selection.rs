use crate::errors::UpdaterError;

/// Picks a file out of `files`.
///
/// No input (or a blank one) selects the first entry. Anything else must
/// match an entry exactly; there is no fallback.
pub fn select(files: &[String], input: Option<&str>) -> Result<String, UpdaterError> {
    let Some(default) = files.first() else {
        return Err(UpdaterError::selection("no files available"));
    };

    match input {
        None => Ok(default.clone()),
        Some(choice) if choice.trim().is_empty() => Ok(default.clone()),
        Some(choice) => files
            .iter()
            .find(|file| file.as_str() == choice)
            .cloned()
            .ok_or_else(|| UpdaterError::selection(format!("'{}' is not in the list", choice))),
    }
}

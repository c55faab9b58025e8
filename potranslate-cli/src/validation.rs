use std::path::Path;

use potranslate::submit::validate_locale;

/// Validate that the catalog exists and is a regular file
pub fn validate_catalog_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }

    Ok(())
}

/// Value parser for locale arguments, backed by the library's locale check
pub fn parse_language_code(lang: &str) -> Result<String, String> {
    validate_locale(lang).map_err(|e| e.to_string())?;
    Ok(lang.to_string())
}

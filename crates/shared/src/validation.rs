//! Common validation utilities.

use std::collections::HashSet;

use validator::ValidationError;

/// Maximum length of a single SELECT/MULTI_SELECT option.
pub const MAX_OPTION_LENGTH: usize = 100;

/// Maximum number of options a field may declare.
pub const MAX_OPTIONS_PER_FIELD: usize = 200;

lazy_static::lazy_static! {
    /// Field machine names: lower snake case, starting with a letter.
    pub static ref FIELD_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z][a-z0-9_]{0,63}$").unwrap();

    /// Category machine names: upper snake case, starting with a letter.
    pub static ref CATEGORY_NAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Z][A-Z0-9_]{0,49}$").unwrap();
}

fn error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into().into());
    err
}

/// Validates a field machine name (e.g. `body_type`).
pub fn validate_field_name(name: &str) -> Result<(), ValidationError> {
    if FIELD_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(error(
            "field_name_format",
            "Field name must be lower snake case (a-z, 0-9, _), start with a letter, max 64 characters",
        ))
    }
}

/// Validates a category machine name (e.g. `DJ_RJ`).
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if CATEGORY_NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(error(
            "category_name_format",
            "Category name must be upper snake case (A-Z, 0-9, _), start with a letter, max 50 characters",
        ))
    }
}

/// Validates a single option token for SELECT/MULTI_SELECT fields.
///
/// Options are stored comma-delimited for multi-select values, so a comma
/// can never appear inside an option.
pub fn validate_option_token(option: &str) -> Result<(), ValidationError> {
    if option.trim().is_empty() {
        return Err(error("option_blank", "Options must not be blank"));
    }
    if option.trim() != option {
        return Err(error(
            "option_whitespace",
            format!("Option '{}' must not have leading or trailing whitespace", option),
        ));
    }
    if option.contains(',') {
        return Err(error(
            "option_delimiter",
            format!("Option '{}' must not contain a comma", option),
        ));
    }
    if option.chars().count() > MAX_OPTION_LENGTH {
        return Err(error(
            "option_length",
            format!("Options must be at most {} characters", MAX_OPTION_LENGTH),
        ));
    }
    Ok(())
}

/// Validates a full option list: non-empty, bounded, unique, valid tokens.
pub fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.is_empty() {
        return Err(error("options_empty", "Option list must not be empty"));
    }
    if options.len() > MAX_OPTIONS_PER_FIELD {
        return Err(error(
            "options_count",
            format!("At most {} options are allowed", MAX_OPTIONS_PER_FIELD),
        ));
    }

    let mut seen = HashSet::new();
    for option in options {
        validate_option_token(option)?;
        if !seen.insert(option.as_str()) {
            return Err(error(
                "options_duplicate",
                format!("Option '{}' is listed more than once", option),
            ));
        }
    }
    Ok(())
}

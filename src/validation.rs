//! Input validation for usernames and tasks.
//!
//! Validation runs before any session or task mutation; a rejected input
//! changes nothing.

use crate::error::ValidationError;
use crate::tasks::{TaskDraft, TaskUpdate};

/// Minimum length of a trimmed username, in characters.
pub const MIN_USERNAME_LEN: usize = 2;

/// Check a login name and return it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::UsernameTooShort`] if fewer than
/// [`MIN_USERNAME_LEN`] characters remain after trimming.
pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    Ok(trimmed.to_string())
}

/// Check a new task and return it normalized.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] if the trimmed title is empty.
pub fn validate_draft(draft: TaskDraft) -> Result<TaskDraft, ValidationError> {
    let draft = draft.normalized();
    if draft.title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(draft)
}

/// Check an edit and return it normalized.
///
/// # Errors
///
/// Returns [`ValidationError::TitleRequired`] if the edit sets an empty title.
pub fn validate_update(update: TaskUpdate) -> Result<TaskUpdate, ValidationError> {
    let update = update.normalized();
    if update.title.as_deref().is_some_and(str::is_empty) {
        return Err(ValidationError::TitleRequired);
    }
    Ok(update)
}

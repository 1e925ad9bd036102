//! Field-level validation for user input.

use crate::error::CoreError;

/// Maximum length of a video id. Real video-sharing ids are far shorter.
pub const MAX_VIDEO_ID_LENGTH: usize = 64;

/// Maximum length of an annotation timestamp string.
pub const MAX_TIMESTAMP_LENGTH: usize = 32;

/// Maximum length of an annotation body.
pub const MAX_CONTENT_LENGTH: usize = 10_000;

/// Maximum length of a video title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Minimum password length accepted when seeding a password user.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a video id: non-empty, bounded, and limited to `[A-Za-z0-9_-]`.
///
/// Ids are used as document map keys, so separators such as `.` or `$` are
/// rejected.
pub fn validate_video_id(video_id: &str) -> Result<(), CoreError> {
    if video_id.is_empty() {
        return Err(CoreError::Validation("video id empty".into()));
    }
    if video_id.len() > MAX_VIDEO_ID_LENGTH {
        return Err(CoreError::Validation(format!(
            "video id must be at most {MAX_VIDEO_ID_LENGTH} characters"
        )));
    }
    if !video_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "video id '{video_id}' may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Reject `value` if it is longer than `max` characters.
pub fn validate_max_length(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Canonical form of an email used for lookups: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn video_id_accepts_url_safe_ids() {
        assert!(validate_video_id("dQw4w9WgXcQ").is_ok());
        assert!(validate_video_id("a-b_c").is_ok());
    }

    #[test]
    fn video_id_rejects_empty() {
        assert_matches!(validate_video_id(""), Err(CoreError::Validation(msg)) if msg == "video id empty");
    }

    #[test]
    fn video_id_rejects_key_separators() {
        assert!(validate_video_id("abc.def").is_err());
        assert!(validate_video_id("$where").is_err());
        assert!(validate_video_id("with space").is_err());
    }

    #[test]
    fn video_id_rejects_overlong() {
        let id = "a".repeat(MAX_VIDEO_ID_LENGTH + 1);
        assert!(validate_video_id(&id).is_err());
        assert!(validate_video_id(&id[..MAX_VIDEO_ID_LENGTH]).is_ok());
    }

    #[test]
    fn max_length_counts_characters() {
        assert!(validate_max_length("content", "héllo", 5).is_ok());
        assert_matches!(
            validate_max_length("content", "héllo!", 5),
            Err(CoreError::Validation(msg)) if msg == "content must be at most 5 characters"
        );
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Maverick@Example.COM "), "maverick@example.com");
    }

    #[test]
    fn password_strength_boundary() {
        assert!(validate_password_strength("1234567", 8).is_err());
        assert!(validate_password_strength("12345678", 8).is_ok());
    }
}

//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Minimum post title length
pub const MIN_POST_TITLE_LENGTH: usize = 5;

/// Minimum post content length
pub const MIN_POST_CONTENT_LENGTH: usize = 5;

/// Image URL sent by clients that did not pick a new image on update
pub const UNSET_IMAGE_URL: &str = "undefined";

// =============================================================================
// Pagination
// =============================================================================

/// First page number
pub const DEFAULT_PAGE: u64 = 1;

/// Fixed number of posts per feed page
pub const POSTS_PER_PAGE: u64 = 2;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

// =============================================================================
// Images
// =============================================================================

/// Directory (relative to the image root) that uploaded images live in
pub const IMAGE_SUBDIR: &str = "images";

/// Accepted image file extensions
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check if a file name carries an accepted image extension
pub fn is_allowed_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

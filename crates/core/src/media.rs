//! Room image naming rules.
//!
//! Stored objects are addressed by a key of the form
//! `<unix-millis>-<original file name>` with whitespace replaced by `_`.
//! The public URL is `<public base>/<key>`.

use crate::error::CoreError;

/// Accepted image file extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Validate an uploaded file name's extension and return it lowercased.
pub fn validate_image_file_name(file_name: &str) -> Result<String, CoreError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '{file_name}'. Supported: {}",
            IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// Build a unique object key for an uploaded image.
///
/// Path separators are dropped so the key can never escape the bucket root.
pub fn image_object_key(file_name: &str, unix_millis: i64) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{unix_millis}-{cleaned}")
}

/// Whether `key` names a single file: non-empty, no path separators, and
/// not one of the relative components `.` or `..`.
pub fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['/', '\\']) && key != "." && key != ".."
}

/// Public URL for a stored key.
pub fn public_url(public_base: &str, key: &str) -> String {
    format!("{}/{key}", public_base.trim_end_matches('/'))
}

/// Recover the object key from a public URL produced by [`public_url`].
///
/// Returns `None` when the URL does not live under `public_base` or the
/// remaining key is empty.
pub fn key_from_public_url(public_base: &str, url: &str) -> Option<String> {
    let prefix = format!("{}/", public_base.trim_end_matches('/'));
    let key = url.strip_prefix(&prefix)?;
    is_plain_key(key).then(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_image_extensions() {
        assert_eq!(validate_image_file_name("room.JPG").unwrap(), "jpg");
        assert_eq!(validate_image_file_name("a.b.webp").unwrap(), "webp");
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(validate_image_file_name("notes.txt").is_err());
        assert!(validate_image_file_name("noext").is_err());
    }

    #[test]
    fn object_key_replaces_whitespace() {
        assert_eq!(
            image_object_key("sea view room.png", 1_700_000_000_000),
            "1700000000000-sea_view_room.png"
        );
    }

    #[test]
    fn object_key_strips_directories() {
        assert_eq!(image_object_key("../../etc/passwd.png", 5), "5-passwd.png");
        assert_eq!(image_object_key("C:\\pics\\a b.jpg", 5), "5-a_b.jpg");
    }

    #[test]
    fn object_key_keeps_inner_dots() {
        let key = image_object_key("sea..view.png", 7);
        assert_eq!(key, "7-sea..view.png");
        assert!(is_plain_key(&key));
        assert!(!is_plain_key(".."));
        assert!(!is_plain_key("a/b.png"));
    }

    #[test]
    fn public_url_and_key_round_trip() {
        let url = public_url("/media/", "42-room.png");
        assert_eq!(url, "/media/42-room.png");
        assert_eq!(
            key_from_public_url("/media", &url).as_deref(),
            Some("42-room.png")
        );
    }

    #[test]
    fn foreign_urls_yield_no_key() {
        assert_eq!(key_from_public_url("/media", "https://cdn.example.com/x.png"), None);
        assert_eq!(key_from_public_url("/media", "/media/"), None);
        assert_eq!(key_from_public_url("/media", "/media/../secret"), None);
        assert_eq!(key_from_public_url("/media", "/media/.."), None);
    }
}

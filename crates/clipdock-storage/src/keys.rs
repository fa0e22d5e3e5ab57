//! Asset naming helpers shared by upload handlers and storage backends.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Fallback extension for MIME types that don't split into type/subtype.
const FALLBACK_EXT: &str = ".bin";

/// Map a MIME type to a file extension.
///
/// `"video/mp4"` becomes `".mp4"`. Anything that doesn't split into exactly
/// two slash-separated parts falls back to `".bin"`.
pub fn media_type_to_ext(media_type: &str) -> String {
    let parts: Vec<&str> = media_type.split('/').collect();
    if parts.len() != 2 {
        return FALLBACK_EXT.to_string();
    }
    format!(".{}", parts[1])
}

/// Generate an unguessable asset file name: 32 cryptographically random
/// bytes as URL-safe unpadded base64, plus the extension.
pub fn random_asset_name(ext: &str) -> String {
    let mut buf = [0u8; 32];
    rand::rng().fill_bytes(&mut buf);
    format!("{}{}", URL_SAFE_NO_PAD.encode(buf), ext)
}

/// Storage key for a published video: namespaced by aspect-ratio bucket.
pub fn object_key(aspect_bucket: &str, file_name: &str) -> String {
    format!("{}/{}", aspect_bucket, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ext_from_well_formed_mime() {
        assert_eq!(media_type_to_ext("video/mp4"), ".mp4");
        assert_eq!(media_type_to_ext("image/png"), ".png");
        assert_eq!(media_type_to_ext("image/jpeg"), ".jpeg");
    }

    #[test]
    fn ext_falls_back_for_malformed_mime() {
        assert_eq!(media_type_to_ext("mp4"), ".bin");
        assert_eq!(media_type_to_ext(""), ".bin");
        assert_eq!(media_type_to_ext("a/b/c"), ".bin");
    }

    #[test]
    fn ext_with_exactly_one_slash_uses_subtype_verbatim() {
        // Two parts always win, even degenerate ones.
        assert_eq!(media_type_to_ext("video/"), ".");
        assert_eq!(media_type_to_ext("/mp4"), ".mp4");
    }

    #[test]
    fn random_names_are_url_safe_and_distinct() {
        let a = random_asset_name(".mp4");
        let b = random_asset_name(".mp4");
        assert_ne!(a, b);
        assert!(a.ends_with(".mp4"));
        // 32 bytes -> 43 base64 chars unpadded
        assert_eq!(a.len(), 43 + 4);
        let encoded = a.trim_end_matches(".mp4");
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn object_key_namespaces_by_bucket() {
        assert_eq!(object_key("landscape", "abc.mp4"), "landscape/abc.mp4");
        assert_eq!(object_key("other", "x.bin"), "other/x.bin");
    }
}

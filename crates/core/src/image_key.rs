//! Human-readable keys derived from image URLs.
//!
//! The configurator names assets by the final path segment of their object
//! storage URL; the dashboard shows that segment, minus the file extension,
//! as the cut's key.

/// Placeholder returned when no usable URL is available.
pub const KEY_UNAVAILABLE: &str = "key unavailable";

/// Extensions stripped from the final path segment, matched case-insensitively.
const KNOWN_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Derive the display key for a cut from its image URL.
///
/// Takes the final path segment of the URL (query and fragment stripped) and
/// removes one trailing known image extension. Inputs without a `scheme://`
/// prefix fall back to a plain split on `/`. Missing or empty input yields
/// [`KEY_UNAVAILABLE`]; this function never fails.
///
/// # Examples
///
/// ```
/// use recorte_core::image_key::extract_key;
///
/// assert_eq!(extract_key(Some("https://cdn.example.com/cuts/bone-aba.png")), "bone-aba");
/// assert_eq!(extract_key(Some("bone-aba")), "bone-aba");
/// assert_eq!(extract_key(None), "key unavailable");
/// ```
pub fn extract_key(image_url: Option<&str>) -> String {
    let Some(raw) = image_url else {
        return KEY_UNAVAILABLE.to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return KEY_UNAVAILABLE.to_string();
    }
    // Query and fragment never contribute to the key.
    let raw = raw.split(['?', '#']).next().unwrap_or(raw);
    let path = match raw.split_once("://") {
        Some((_, rest)) => match rest.find('/') {
            Some(slash) => &rest[slash + 1..],
            None => "",
        },
        None => raw,
    };
    let segment = path.rsplit('/').next().unwrap_or(path);
    let key = strip_known_extension(segment);
    if key.is_empty() {
        KEY_UNAVAILABLE.to_string()
    } else {
        key.to_string()
    }
}

/// Strip exactly one trailing known image extension, case-insensitively.
fn strip_known_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, ext))
            if KNOWN_IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known)) =>
        {
            stem
        }
        _ => segment,
    }
}

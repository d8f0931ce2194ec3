//! Inline encoding of package binaries as `data:` URLs.
//!
//! An inline value carries its content type and the complete original bytes,
//! so the course no longer needs the package to display its media.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::package::AssetKind;

/// Content type for a package entry, from its file extension.
///
/// Falls back to the default for `kind` when the extension is missing or
/// unknown, and to `application/octet-stream` when the kind is unknown too.
pub fn content_type_for(path: &str, kind: Option<AssetKind>) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "json" => "application/json",
        _ => kind.map_or("application/octet-stream", |kind| kind.fallback_content_type()),
    }
}

/// Encode bytes as a base64 `data:` URL.
///
/// # Example
///
/// ```
/// use lexy::importer::encode_data_url;
///
/// assert_eq!(encode_data_url("text/plain", b"hola"), "data:text/plain;base64,aG9sYQ==");
/// ```
pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URL into its content type and bytes.
///
/// Returns `None` for anything that is not a base64 data URL.
pub fn decode_data_url(value: &str) -> Option<(String, Vec<u8>)> {
    let rest = value.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let content_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;

    Some((content_type.to_string(), bytes))
}

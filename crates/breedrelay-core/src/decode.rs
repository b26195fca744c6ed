//! Base64 image decoding with data-URI stripping and padding repair.

use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::error::{Error, Result};
use crate::types::DecodedImage;

/// Data-URI scheme marker; everything up to and including it is discarded.
const DATA_URI_MARKER: &str = "base64,";

/// Decode a raw or data-URI-prefixed base64 string into image bytes.
///
/// The prefix is stripped before padding repair. Fails with
/// [`Error::InvalidEncoding`] if the payload is empty or not decodable
/// base64 even after padding, and with [`Error::InvalidImage`] if the
/// decoded bytes are not a recognizable image container.
pub fn decode(input: &str) -> Result<DecodedImage> {
    let payload = strip_data_uri(input);
    if payload.is_empty() {
        return Err(Error::invalid_encoding("empty image payload"));
    }

    let padded = repair_padding(payload);
    let bytes = BASE64_STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| Error::invalid_encoding(e.to_string()))?;

    let format = image::guess_format(&bytes).map_err(|e| Error::invalid_image(e.to_string()))?;
    tracing::debug!(size = bytes.len(), format = ?format, "decoded image payload");

    Ok(DecodedImage { bytes, format })
}

/// Discard a `data:image/...;base64,` prefix if one is present.
fn strip_data_uri(input: &str) -> &str {
    match input.split_once(DATA_URI_MARKER) {
        Some((_, payload)) => payload,
        None => input,
    }
}

/// Pad with `=` to restore the length to a multiple of 4.
fn repair_padding(payload: &str) -> Cow<'_, str> {
    match payload.len() % 4 {
        0 => Cow::Borrowed(payload),
        remainder => {
            let missing = 4 - remainder;
            let mut padded = String::with_capacity(payload.len() + missing);
            padded.push_str(payload);
            for _ in 0..missing {
                padded.push('=');
            }
            Cow::Owned(padded)
        }
    }
}

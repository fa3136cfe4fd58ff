//! Share codes: a recipe squeezed into a short string that survives copy/paste
//! and URL embedding.
//!
//! Format: compact JSON, zlib (DEFLATE plus an Adler-32 trailer), base64 with
//! the URL-safe alphabet and no padding. The output only uses `A-Z a-z 0-9 - _`.
//! A damaged code fails the checksum rather than decoding to an altered recipe.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use std::io::{Read, Write};

use crate::model::Recipe;
use crate::RecipeError;

/// Upper bound on the decompressed size of a share code
const MAX_DECODED_LEN: u64 = 1024 * 1024;

/// Encode a recipe as a share code. The same recipe always gives the same code.
pub fn encode(recipe: &Recipe) -> Result<String, RecipeError> {
    let json = serde_json::to_vec(recipe)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;

    let token = URL_SAFE_NO_PAD.encode(compressed);
    debug!(
        "Encoded recipe {} ({} bytes of JSON) into {} chars",
        recipe.id,
        json.len(),
        token.len()
    );
    Ok(token)
}

/// Decode a share code back into a recipe
///
/// Surrounding whitespace is ignored. Anything that does not come out as a
/// well-formed recipe is `InvalidToken`.
pub fn decode(token: &str) -> Result<Recipe, RecipeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(RecipeError::InvalidToken("code is empty".to_string()));
    }

    let compressed = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| RecipeError::InvalidToken(format!("not a valid code: {}", e)))?;

    let mut json = Vec::new();
    let mut decoder = ZlibDecoder::new(compressed.as_slice()).take(MAX_DECODED_LEN + 1);
    decoder
        .read_to_end(&mut json)
        .map_err(|e| RecipeError::InvalidToken(format!("cannot decompress: {}", e)))?;

    if json.len() as u64 > MAX_DECODED_LEN {
        return Err(RecipeError::InvalidToken(
            "decompressed code is too large".to_string(),
        ));
    }

    // The bufread decoder only consumes the bytes of the stream itself
    let trailing = decoder.get_ref().get_ref().len();
    if trailing > 0 {
        return Err(RecipeError::InvalidToken(format!(
            "{} unexpected bytes after the end of the code",
            trailing
        )));
    }

    serde_json::from_slice(&json)
        .map_err(|e| RecipeError::InvalidToken(format!("not a recipe: {}", e)))
}

//! Shared key generation for storage backends.
//!
//! Key format: `{caller_id}/{unix_millis}-{13 base36 chars}.{extension}`,
//! with `jpg` as the fallback extension.

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 13;
const FALLBACK_EXTENSION: &str = "jpg";

/// Generate a fresh object key for the given caller and original filename.
pub fn generate_object_key(caller_id: Uuid, original_filename: Option<&str>) -> String {
    let mut rng = rand::rng();
    let random: String = (0..RANDOM_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    object_key(
        caller_id,
        original_filename,
        Utc::now().timestamp_millis(),
        &random,
    )
}

fn object_key(
    caller_id: Uuid,
    original_filename: Option<&str>,
    timestamp_millis: i64,
    random: &str,
) -> String {
    let extension = original_filename
        .and_then(extension_of)
        .unwrap_or(FALLBACK_EXTENSION);
    format!("{}/{}-{}.{}", caller_id, timestamp_millis, random, extension)
}

/// Everything after the last dot of `filename`, or `None` when there is no
/// dot or nothing follows it. Dotfiles such as `.hidden` yield `hidden`.
fn extension_of(filename: &str) -> Option<&str> {
    let (_, extension) = filename.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(extension)
}

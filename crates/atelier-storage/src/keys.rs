//! Object key generation.
//!
//! Keys are folder-scoped and collision-free by construction:
//! `{folder}/{millis}-{random}` with the original file extension appended so
//! locally served files keep a usable name.

use rand::distr::{Alphanumeric, SampleString};
use std::time::{SystemTime, UNIX_EPOCH};

const SUFFIX_LEN: usize = 9;

/// Generate a bare object id: `{millis}-{random}`. Cloudinary public ids use
/// this directly (no extension); the folder travels as a separate parameter.
pub fn random_object_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix = Alphanumeric
        .sample_string(&mut rand::rng(), SUFFIX_LEN)
        .to_lowercase();
    format!("{millis}-{suffix}")
}

/// Generate a fresh object key for an upload into `folder`.
pub fn object_key(folder: &str, original_filename: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix = Alphanumeric
        .sample_string(&mut rand::rng(), SUFFIX_LEN)
        .to_lowercase();

    let ext = original_filename
        .rsplit_once('.')
        .map(|(_, e)| e)
        .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match ext {
        Some(ext) => format!("{}/{}-{}.{}", folder.trim_matches('/'), millis, suffix, ext),
        None => format!("{}/{}-{}", folder.trim_matches('/'), millis, suffix),
    }
}

//! Fixed-width logger names for aligned console output
//!
//! Names shorter than the current width are padded, longer ones are
//! abbreviated segment by segment (`service/user-auth/handler` becomes
//! `ser/use/han`) and the current width ratchets up to the widest name seen,
//! never past the maximum.
//!
//! The widths are shared by every logger printed through the same
//! [`NameNormalizer`]. Console appenders use [`NameNormalizer::shared`] unless
//! given their own instance.

use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

pub const DEFAULT_MAX_NAME_LEN: usize = 20;
pub const DEFAULT_CUR_NAME_LEN: usize = 7;

/// Separators tried in priority order when abbreviating a name
const SEPARATORS: [char; 3] = ['/', '.', '-'];

/// Longest prefix kept from each name segment
const SEGMENT_PREFIX_LEN: usize = 3;

static SHARED: OnceLock<Arc<NameNormalizer>> = OnceLock::new();

#[derive(Debug)]
pub struct NameNormalizer {
    max_len: usize,
    initial_len: usize,
    cur_len: Mutex<usize>,
}

impl NameNormalizer {
    pub fn new(max_len: usize) -> Self {
        Self::with_widths(max_len, DEFAULT_CUR_NAME_LEN)
    }

    /// Create a normalizer with an explicit starting width
    ///
    /// The starting width is clamped to `max_len`.
    pub fn with_widths(max_len: usize, cur_len: usize) -> Self {
        let cur_len = cur_len.min(max_len);
        Self {
            max_len,
            initial_len: cur_len,
            cur_len: Mutex::new(cur_len),
        }
    }

    /// Process-wide normalizer with the default widths
    pub fn shared() -> Arc<NameNormalizer> {
        Arc::clone(SHARED.get_or_init(|| Arc::new(NameNormalizer::default())))
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Width settled by the names normalized so far
    pub fn cur_len(&self) -> usize {
        *self.cur_len.lock()
    }

    /// Return the current width to its starting value
    pub fn reset(&self) {
        *self.cur_len.lock() = self.initial_len;
    }

    pub fn normalize(&self, name: &str) -> String {
        // Held for the whole call so the ratchet sees a consistent width.
        let mut cur_len = self.cur_len.lock();
        let len = name.chars().count();

        if len == self.max_len || len == *cur_len {
            return name.to_string();
        }
        if len < *cur_len {
            return pad(name, *cur_len);
        }

        let normalized = match split_segments(name) {
            Some((sep, segments)) => truncate(&compress(&segments, sep), self.max_len),
            None => truncate(name, self.max_len),
        };

        let width = normalized.chars().count();
        if width >= *cur_len {
            *cur_len = width;
            normalized
        } else {
            pad(&normalized, *cur_len)
        }
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NAME_LEN)
    }
}

/// Split on the first separator that yields more than one segment
fn split_segments(name: &str) -> Option<(char, Vec<&str>)> {
    SEPARATORS.iter().find_map(|&sep| {
        let segments: Vec<&str> = name.split(sep).collect();
        (segments.len() > 1).then_some((sep, segments))
    })
}

/// Abbreviate each segment and rejoin them
///
/// An empty segment (doubled separator) stops separator insertion for the
/// rest of the name.
fn compress(segments: &[&str], sep: char) -> String {
    let mut out = String::new();
    let mut joining = true;

    for (idx, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            joining = false;
        }
        out.extend(segment.chars().take(SEGMENT_PREFIX_LEN));
        if joining && idx + 1 < segments.len() {
            out.push(sep);
        }
    }
    out
}

fn truncate(name: &str, max_len: usize) -> String {
    name.chars().take(max_len).collect()
}

fn pad(name: &str, width: usize) -> String {
    format!("{:<width$}", name, width = width)
}

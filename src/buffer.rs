use crate::error::{Result, TopWordsError};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Input bytes loaded under a hard size limit.
///
/// Content over the limit is an error, never silently cut short.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    bytes: Vec<u8>,
    limit: usize,
}

impl InputBuffer {
    /// Read a whole file, failing if it holds more than `limit` bytes
    pub fn read_path(path: impl AsRef<Path>, limit: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TopWordsError::io(path, e))?;

        // Regular files report their size up front; anything else is
        // checked while reading.
        let size_hint = match file.metadata() {
            Ok(meta) if meta.is_file() => {
                if meta.len() > limit as u64 {
                    return Err(TopWordsError::InputTooLarge {
                        limit,
                        actual: Some(meta.len()),
                    });
                }
                meta.len() as usize
            }
            _ => 0,
        };

        let mut bytes = Vec::with_capacity(size_hint);
        file.take((limit as u64).saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|e| TopWordsError::io(path, e))?;

        Self::bounded(bytes, limit)
    }

    /// Read from any reader, failing once more than `limit` bytes arrive
    pub fn read_from<R: Read>(reader: R, limit: usize) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|e| TopWordsError::io("<reader>", e))?;
        Self::bounded(bytes, limit)
    }

    /// Wrap bytes already in memory
    pub fn from_bytes(bytes: Vec<u8>, limit: usize) -> Result<Self> {
        if bytes.len() > limit {
            return Err(TopWordsError::InputTooLarge {
                limit,
                actual: Some(bytes.len() as u64),
            });
        }
        Ok(Self { bytes, limit })
    }

    /// Accept bytes read through a `limit + 1` window; overflow size is unknown
    fn bounded(bytes: Vec<u8>, limit: usize) -> Result<Self> {
        if bytes.len() > limit {
            return Err(TopWordsError::InputTooLarge {
                limit,
                actual: None,
            });
        }
        Ok(Self { bytes, limit })
    }

    /// The content as text; invalid UTF-8 becomes U+FFFD
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the current size of the buffer
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Get the byte limit of the buffer
    pub fn capacity(&self) -> usize {
        self.limit
    }
}

use parking_lot::Mutex;

use super::EntropyProvider;
use crate::error::EntropyError;

const NAME: &str = "fixed";

/// Replays a fixed byte script.
///
/// A cycling provider wraps around at the end of its script; an exhausting
/// one fails once the script cannot satisfy a request. Use it to pin down
/// exact draw sequences in tests. It provides no randomness at all.
pub struct FixedBytesProvider {
    script: Vec<u8>,
    cursor: Mutex<usize>,
    cycle: bool,
}

impl FixedBytesProvider {
    /// Replays `script`, wrapping around at the end.
    pub fn cycling(script: impl Into<Vec<u8>>) -> Self {
        Self {
            script: script.into(),
            cursor: Mutex::new(0),
            cycle: true,
        }
    }

    /// Replays `script` once, then fails every read it cannot satisfy.
    pub fn exhausting(script: impl Into<Vec<u8>>) -> Self {
        Self {
            script: script.into(),
            cursor: Mutex::new(0),
            cycle: false,
        }
    }

    /// A cycling script in which each value is one 8-byte draw.
    pub fn from_draws(draws: &[u64]) -> Self {
        Self::cycling(draws.iter().flat_map(|d| d.to_le_bytes()).collect::<Vec<_>>())
    }
}

impl EntropyProvider for FixedBytesProvider {
    fn random_bytes(&self, count: usize) -> Result<Vec<u8>, EntropyError> {
        let len = self.script.len();
        let mut cursor = self.cursor.lock();

        if len == 0 {
            return Err(EntropyError::unreadable(NAME, "empty script"));
        }

        if self.cycle {
            let out = (0..count).map(|i| self.script[(*cursor + i) % len]).collect();
            *cursor = (*cursor + count) % len;
            return Ok(out);
        }

        let end = *cursor + count;
        if end > len {
            return Err(EntropyError::unreadable(
                NAME,
                format!("yielded fewer than {count} bytes"),
            ));
        }

        let out = self.script[*cursor..end].to_vec();
        *cursor = end;

        Ok(out)
    }
}

//! UTF-16 encoding for native string arguments.

use crate::error::{Result, RuntimeError};

/// Encode `value` as a NUL-terminated UTF-16 buffer.
///
/// Fails with [`RuntimeError::Encoding`] when `value` already contains a
/// NUL, since the native side would silently truncate it.
pub fn encode_wide(value: &str, what: &str) -> Result<Vec<u16>> {
    if value.contains('\0') {
        return Err(RuntimeError::Encoding {
            what: what.to_string(),
        });
    }
    Ok(value.encode_utf16().chain(std::iter::once(0)).collect())
}

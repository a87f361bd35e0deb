//! Session id generation.

use crate::error::ChatError;

/// A random version-4 UUID in its canonical hyphenated form.
///
/// # Errors
///
/// `ChatError::Store` if the OS random source is unavailable.
pub fn new_session_id() -> Result<String, ChatError> {
    let mut bytes = [0u8; 16];
    getrandom::fill(&mut bytes)
        .map_err(|e| ChatError::Store(format!("failed to generate session id: {e}")))?;
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    ))
}

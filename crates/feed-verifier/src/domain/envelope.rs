//! Envelope decoding
//!
//! Turns one received multipart frame into a `NotificationEnvelope`.
//! Pure: no I/O, no state.

use shared_types::{NotificationEnvelope, RawFrame, Topic};

use crate::error::VerifierError;

/// Length of the ASCII topic tag at the start of part 0.
pub const TOPIC_TAG_LEN: usize = 3;

/// Minimum parts a frame must carry: topic tag and payload.
pub const MIN_FRAME_PARTS: usize = 2;

/// Decode a raw frame into topic and payload.
///
/// Part 2, when present and exactly 4 bytes, is read as a little-endian
/// sequence counter. Any other shape of part 2 is ignored.
pub fn decode_frame(frame: &RawFrame) -> Result<NotificationEnvelope, VerifierError> {
    let (head, payload) = match frame.parts() {
        [head, payload, ..] => (head, payload),
        parts => {
            return Err(VerifierError::malformed(format!(
                "expected at least {MIN_FRAME_PARTS} parts, got {}",
                parts.len()
            )))
        }
    };

    let tag = head.get(..TOPIC_TAG_LEN).ok_or_else(|| {
        VerifierError::malformed(format!("topic tag has {} bytes", head.len()))
    })?;

    let topic = Topic::from_tag(tag).ok_or_else(|| {
        VerifierError::malformed(format!(
            "unknown topic tag {:?}",
            String::from_utf8_lossy(tag)
        ))
    })?;

    let sequence = frame
        .part(2)
        .and_then(|raw| <[u8; 4]>::try_from(raw.as_ref()).ok())
        .map(u32::from_le_bytes);

    Ok(NotificationEnvelope {
        topic,
        payload: payload.clone(),
        sequence,
    })
}

//! Field-level codec helpers shared by both record kinds.

use std::io::{ErrorKind, Read};

use bytes::{Buf, BufMut};

/// Write `value` into a NUL-padded field of `width` bytes.
///
/// Text is cut to `width - 1` bytes (on a char boundary) so the field is
/// always NUL terminated.
pub fn put_fixed_str<B: BufMut>(buf: &mut B, value: &str, width: usize) {
    let mut end = value.len().min(width.saturating_sub(1));
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    buf.put_slice(&value.as_bytes()[..end]);
    buf.put_bytes(0, width - end);
}

/// Read a NUL-padded field of `width` bytes; text stops at the first NUL.
pub fn get_fixed_str<B: Buf>(buf: &mut B, width: usize) -> String {
    let mut raw = vec![0u8; width];
    buf.copy_to_slice(&mut raw);
    let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Read exactly one fixed-size record into `block`.
///
/// Returns `Ok(false)` at end of file. A trailing partial record also
/// yields `Ok(false)` and is never decoded.
pub fn read_block<R: Read>(reader: &mut R, block: &mut [u8]) -> std::io::Result<bool> {
    let mut filled = 0;
    while filled < block.len() {
        match reader.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    if filled > 0 && filled < block.len() {
        tracing::warn!(
            "Ignoring partial record at end of file ({} of {} bytes)",
            filled,
            block.len()
        );
    }

    Ok(filled == block.len())
}

//! The decoder: opcode stream in, raster bytes out.
//!
//! Dispatch is table-driven over the full 256-value tag space (the
//! original design's bit-mask-predicate chain, tested for each tag in
//! turn, is replaced here by a single match with the two full-byte tags
//! `0xFE`/`0xFF` checked ahead of the generic `11xxxxxx` RUN class — see
//! `DESIGN.md`).

use crate::error::DecodeError;
use crate::header::Header;
use crate::pixel::Pixel;
use crate::table::SeenTable;

const OP_RGB: u8 = 0xfe;
const OP_RGBA: u8 = 0xff;

/// Decodes the opcode stream following an already-parsed header directly
/// into `output`. `output.len()` must equal
/// `header.width * header.height * header.channels` exactly.
///
/// This is the allocation-free entry point; [`crate::decode_stream`] wraps
/// it with header parsing and output allocation for `alloc` callers.
pub fn decode_into(header: &Header, opcodes: &[u8], output: &mut [u8]) -> Result<(), DecodeError> {
    let channels = header.channels as usize;
    let expected = header.width as usize * header.height as usize * channels;
    if output.len() != expected {
        return Err(DecodeError::OutputLengthMismatch { expected, actual: output.len() });
    }

    let has_alpha = header.has_alpha();
    let mut table = SeenTable::new();
    let mut prev = Pixel::initial();
    let mut pos = 0usize;
    let mut cursor = 0usize;

    while pos < output.len() {
        let tag = *opcodes.get(cursor).ok_or(DecodeError::Truncated)?;

        if tag & 0xc0 == 0xc0 && tag != OP_RGB && tag != OP_RGBA {
            // RUN: the only opcode that can emit more than one pixel per
            // tag byte, so it gets its own inner loop rather than folding
            // into the single-pixel `pixel` binding below.
            cursor += 1;
            let mut length = (tag & 0x3f) as usize + 1;
            while length > 0 && pos < output.len() {
                prev.write(&mut output[pos..pos + channels], has_alpha);
                table.put(prev);
                pos += channels;
                length -= 1;
            }
            continue;
        }

        let pixel = match tag {
            OP_RGB => {
                let bytes = opcodes.get(cursor + 1..cursor + 4).ok_or(DecodeError::Truncated)?;
                cursor += 4;
                Pixel { r: bytes[0], g: bytes[1], b: bytes[2], a: prev.a }
            }
            OP_RGBA => {
                let bytes = opcodes.get(cursor + 1..cursor + 5).ok_or(DecodeError::Truncated)?;
                cursor += 5;
                Pixel { r: bytes[0], g: bytes[1], b: bytes[2], a: bytes[3] }
            }
            t if t & 0xc0 == 0x00 => {
                cursor += 1;
                table.get(t & 0x3f)
            }
            t if t & 0xc0 == 0x40 => {
                cursor += 1;
                let dr = ((t >> 4) & 0x03) as i8 - 2;
                let dg = ((t >> 2) & 0x03) as i8 - 2;
                let db = (t & 0x03) as i8 - 2;
                prev.add_wrapping(dr, dg, db)
            }
            t if t & 0xc0 == 0x80 => {
                let b2 = *opcodes.get(cursor + 1).ok_or(DecodeError::Truncated)?;
                cursor += 2;
                let dg = (t & 0x3f) as i8 - 32;
                let dr = ((b2 >> 4) & 0x0f) as i8 - 8 + dg;
                let db = (b2 & 0x0f) as i8 - 8 + dg;
                prev.add_wrapping(dr, dg, db)
            }
            _ => return Err(DecodeError::MalformedOpcode(tag)),
        };

        pixel.write(&mut output[pos..pos + channels], has_alpha);
        table.put(pixel);
        prev = pixel;
        pos += channels;
    }

    Ok(())
}

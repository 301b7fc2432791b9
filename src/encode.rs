//! The encoder: raster bytes in, opcode stream out.
//!
//! Tries RUN, DIFF, INDEX, LUMA, RGB, RGBA in that order for each pixel —
//! the priority order is part of the on-wire contract, not an
//! implementation detail (see `DESIGN.md`).

use crate::error::EncodeError;
use crate::header::Header;
use crate::pixel::Pixel;
use crate::table::SeenTable;

const OP_INDEX: u8 = 0x00;
const OP_DIFF: u8 = 0x40;
const OP_LUMA: u8 = 0x80;
const OP_RUN: u8 = 0xc0;
const OP_RGB: u8 = 0xfe;
const OP_RGBA: u8 = 0xff;

const MAX_RUN: usize = 62;

/// Maximum number of opcode-stream bytes `encode_into` can produce for a
/// raster with the given header: 5 bytes/pixel worst case for RGBA
/// sources, 4 for RGB.
pub fn max_encoded_len(header: &Header) -> usize {
    let per_pixel = if header.has_alpha() { 5 } else { 4 };
    header.width as usize * header.height as usize * per_pixel
}

/// Encodes `raster` (row-major, interleaved, `header.channels` bytes per
/// pixel) into `output`. Returns the number of bytes written. Does not
/// write the container header or end marker — see [`crate::encode_stream`]
/// for the full file-framing entry point.
pub fn encode_into(header: &Header, raster: &[u8], output: &mut [u8]) -> Result<usize, EncodeError> {
    let channels = header.channels as usize;
    let expected = header.width as usize * header.height as usize * channels;
    if raster.len() != expected {
        return Err(EncodeError::RasterLengthMismatch { expected, actual: raster.len() });
    }

    let has_alpha = header.has_alpha();
    let mut table = SeenTable::new();
    let mut prev = Pixel::initial();
    let mut written = 0usize;
    let pixel_count = header.width as usize * header.height as usize;
    let mut i = 0usize;

    while i < pixel_count {
        let cur = Pixel::read(&raster[i * channels..], has_alpha);

        if cur == prev {
            let mut length = 1usize;
            while length < MAX_RUN
                && i + length < pixel_count
                && Pixel::read(&raster[(i + length) * channels..], has_alpha) == prev
            {
                length += 1;
            }
            let byte = output.get_mut(written).ok_or(EncodeError::OutputTooSmall)?;
            *byte = OP_RUN | (length - 1) as u8;
            written += 1;
            i += length;
            table.put(cur);
            prev = cur;
            continue;
        }

        let delta = cur.diff_from(&prev);
        let diff = if delta.a == 0 { diff_nibbles(delta.r, delta.g, delta.b) } else { None };
        let luma = if delta.a == 0 { luma_nibbles(delta.r, delta.g, delta.b) } else { None };

        if let Some((r2, g2, b2)) = diff {
            let byte = output.get_mut(written).ok_or(EncodeError::OutputTooSmall)?;
            *byte = OP_DIFF | r2 << 4 | g2 << 2 | b2;
            written += 1;
        } else if table.get(cur.hash()) == cur {
            let byte = output.get_mut(written).ok_or(EncodeError::OutputTooSmall)?;
            *byte = OP_INDEX | cur.hash();
            written += 1;
        } else if let Some((dg, dr_dg, db_dg)) = luma {
            let bytes = output.get_mut(written..written + 2).ok_or(EncodeError::OutputTooSmall)?;
            bytes[0] = OP_LUMA | dg;
            bytes[1] = dr_dg << 4 | db_dg;
            written += 2;
        } else if delta.a == 0 {
            let bytes = output.get_mut(written..written + 4).ok_or(EncodeError::OutputTooSmall)?;
            bytes[0] = OP_RGB;
            bytes[1] = cur.r;
            bytes[2] = cur.g;
            bytes[3] = cur.b;
            written += 4;
        } else {
            let bytes = output.get_mut(written..written + 5).ok_or(EncodeError::OutputTooSmall)?;
            bytes[0] = OP_RGBA;
            bytes[1] = cur.r;
            bytes[2] = cur.g;
            bytes[3] = cur.b;
            bytes[4] = cur.a;
            written += 5;
        }

        table.put(cur);
        prev = cur;
        i += 1;
    }

    Ok(written)
}

/// Biases each wrapping delta by 2 and checks it landed in `0..=3` (i.e.
/// the original delta was in `-2..=1`), all in wrapping `u8` space — `r`,
/// `g`, `b` come straight from [`Pixel::diff_from`] and can be any wrapped
/// byte, so this must never widen to `i8` before checking the range.
#[inline(always)]
fn diff_nibbles(r: u8, g: u8, b: u8) -> Option<(u8, u8, u8)> {
    let r = r.wrapping_add(2);
    let g = g.wrapping_add(2);
    let b = b.wrapping_add(2);
    if (r | g | b) & !0x03 == 0 {
        Some((r, g, b))
    } else {
        None
    }
}

/// Same idea as [`diff_nibbles`] for the LUMA opcode: `dr - dg` and `db -
/// dg` are themselves wrapping differences of two already-wrapped deltas,
/// computed with `wrapping_sub` rather than plain subtraction so a pair of
/// ordinary, fully-valid pixels (e.g. `dr = -95, dg = 90`) can't overflow
/// `i8` on the way to being range-checked.
#[inline(always)]
fn luma_nibbles(dr: u8, dg: u8, db: u8) -> Option<(u8, u8, u8)> {
    let dr_dg = dr.wrapping_sub(dg).wrapping_add(8);
    let db_dg = db.wrapping_sub(dg).wrapping_add(8);
    let dg = dg.wrapping_add(32);
    if dr_dg & 0xf0 == 0 && db_dg & 0xf0 == 0 && dg & 0xc0 == 0 {
        Some((dg, dr_dg, db_dg))
    } else {
        None
    }
}

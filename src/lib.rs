//! QOI — the "Quite OK Image" format for fast, lossless image compression.
//!
//! <https://qoiformat.org>
//!
//! QOI encodes and decodes images in a lossless format built around a
//! 64-slot table of recently-seen pixels and a handful of delta-coded
//! opcodes, rather than general-purpose entropy coding.
//!
//! # Data format
//!
//! A QOI file has a 14-byte header, followed by any number of data
//! "chunks", and an 8-byte end marker.
//!
//! ```text
//! struct Header {
//!     magic: [u8; 4], // "qoif"
//!     width: u32,     // big-endian
//!     height: u32,    // big-endian
//!     channels: u8,   // 3 = RGB, 4 = RGBA
//!     colorspace: u8, // 0 = sRGB with linear alpha, 1 = all channels linear
//! }
//! ```
//!
//! Images are encoded top to bottom, left to right. Both the encoder and
//! decoder start from a previous-pixel value of `{r: 0, g: 0, b: 0, a:
//! 255}`. A 64-entry table of previously-seen pixels (zero-initialized,
//! distinct from the previous-pixel value above) is maintained by both
//! sides; every pixel produced or consumed is written into this table at
//! the index given by [`pixel::Pixel::hash`].
//!
//! Each opcode is a 2-bit or 8-bit tag followed by a number of data bits,
//! always byte-aligned as a whole. The 8-bit tags (`QOI_OP_RGB`,
//! `QOI_OP_RGBA`) take precedence over the 2-bit tags — a decoder must
//! check for them first, since the 2-bit RUN tag's bit pattern would
//! otherwise also match them. See [`decode::decode_into`] and
//! [`encode::encode_into`] for the chunk layouts and the priority order in
//! which the encoder tries them.
//!
//! The byte stream ends with seven `0x00` bytes followed by one `0x01`
//! byte. This end marker is a framing aid, not a checksum — a stream that
//! is missing it but otherwise supplies `width * height` pixels still
//! decodes successfully.
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod decode;
pub mod encode;
pub mod error;
mod header;
#[cfg(feature = "alloc")]
mod image;
#[cfg(feature = "io")]
pub mod io;
pub mod pixel;
pub mod table;

pub use error::{DecodeError, EncodeError, ImageError};
pub use header::Header;
#[cfg(feature = "alloc")]
pub use image::Image;
pub use pixel::Pixel;
pub use table::SeenTable;

#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Parses the header and decodes the opcode stream in `bytes` into a fresh
/// [`Image`]. `bytes` may or may not include the trailing end marker —
/// only the header-declared pixel count is authoritative (see
/// `DESIGN.md`).
#[cfg(feature = "alloc")]
pub fn decode_stream(bytes: &[u8]) -> Result<Image, DecodeError> {
    let parsed = Header::parse(bytes)?;
    let opcodes = &bytes[header::HEADER_SIZE..];

    let size = parsed.width as usize * parsed.height as usize * parsed.channels as usize;
    let mut raster = vec![0u8; size];
    decode::decode_into(&parsed, opcodes, &mut raster)?;

    log::trace!("decoded {}x{} image ({} bytes)", parsed.width, parsed.height, raster.len());
    Ok(Image::from_parts(parsed, raster))
}

/// Encodes `image` into a complete QOI byte stream: header, opcode stream,
/// end marker.
#[cfg(feature = "alloc")]
pub fn encode_stream(image: &Image) -> Result<Vec<u8>, EncodeError> {
    let parsed = image.header();
    let mut out = vec![0u8; header::HEADER_SIZE];
    let header_bytes: &mut [u8; header::HEADER_SIZE] =
        (&mut out[..header::HEADER_SIZE]).try_into().expect("exact length slice");
    parsed.write(header_bytes);

    let mut opcodes = vec![0u8; encode::max_encoded_len(&parsed)];
    let written = encode::encode_into(&parsed, image.raster(), &mut opcodes)?;
    opcodes.truncate(written);
    out.extend_from_slice(&opcodes);
    out.extend_from_slice(&header::END_MARKER);

    log::trace!("encoded {}x{} image into {} bytes", parsed.width, parsed.height, out.len());
    Ok(out)
}

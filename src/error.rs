//! Error kinds for the codec core.
//!
//! These replace the original design's process-wide `qoi_errno` register
//! (see the design notes in `DESIGN.md`): every fallible operation returns
//! its outcome directly, so independent encode/decode passes never share
//! mutable error state and are safe to run concurrently on separate
//! threads.

use core::fmt::{self, Display};

/// Errors that can occur while decoding a QOI byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeError {
    /// The first four bytes of the stream are not `b"qoif"`.
    NotAQoiFile,
    /// The stream ended before `width * height` pixels were produced.
    Truncated,
    /// A tag byte matched no opcode pattern. Unreachable in practice — all
    /// 256 tag values are covered by the dispatch table — kept for
    /// defensive callers that construct a decoder by hand.
    MalformedOpcode(u8),
    /// The header declares a channel count other than 3 or 4.
    InvalidChannels(u8),
    /// A caller-supplied output buffer's length doesn't match
    /// `width * height * channels`.
    OutputLengthMismatch { expected: usize, actual: usize },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NotAQoiFile => f.write_str("input is not a QOI file (bad magic)"),
            DecodeError::Truncated => {
                f.write_str("input ended before the declared pixel count was decoded")
            }
            DecodeError::MalformedOpcode(b) => {
                write!(f, "tag byte 0x{:02x} matched no known opcode", b)
            }
            DecodeError::InvalidChannels(c) => {
                write!(f, "header declares {} channels, must be 3 or 4", c)
            }
            DecodeError::OutputLengthMismatch { expected, actual } => write!(
                f,
                "output buffer is {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Errors that can occur while encoding a raster into a QOI byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodeError {
    /// The raster's length doesn't match `width * height * channels`.
    RasterLengthMismatch { expected: usize, actual: usize },
    /// The caller-supplied output buffer is too small to hold the header,
    /// opcode stream, and end marker. Only returned by the no-alloc
    /// `encode_into` entry point.
    OutputTooSmall,
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::RasterLengthMismatch { expected, actual } => write!(
                f,
                "raster is {} bytes, expected {}",
                actual, expected
            ),
            EncodeError::OutputTooSmall => {
                f.write_str("output buffer is too small to fit the encoded image")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Errors constructing an [`crate::Image`] from caller-supplied parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageError {
    /// Channel count other than 3 or 4.
    InvalidChannels(u8),
    /// Raster length doesn't match `width * height * channels`.
    RasterLengthMismatch { expected: usize, actual: usize },
    /// `width * height * channels` overflows `usize` on this target.
    DimensionsOverflow,
}

impl Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidChannels(c) => {
                write!(f, "{} channels given, must be 3 or 4", c)
            }
            ImageError::RasterLengthMismatch { expected, actual } => write!(
                f,
                "raster is {} bytes, expected {}",
                actual, expected
            ),
            ImageError::DimensionsOverflow => {
                f.write_str("width * height * channels overflows usize")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ImageError {}

//! The container framer: the 14-byte header and 8-byte end marker that
//! bracket the opcode stream in a `.qoi` file.

use crate::error::DecodeError;

pub(crate) const MAGIC: [u8; 4] = *b"qoif";
pub(crate) const HEADER_SIZE: usize = 14;
pub(crate) const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Parsed container header. Immutable once built — a [`crate::Image`] keeps
/// a copy of these fields alongside its raster.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub colorspace: u8,
}

impl Header {
    #[inline(always)]
    pub fn channels_valid(&self) -> bool {
        self.channels == 3 || self.channels == 4
    }

    #[inline(always)]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Parses the 14-byte header from the start of `bytes`. Does not
    /// consume the remainder of `bytes`; callers slice past
    /// [`HEADER_SIZE`] themselves.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_SIZE {
            log::warn!("QOI header truncated: {} bytes available, {} required", bytes.len(), HEADER_SIZE);
            return Err(DecodeError::Truncated);
        }

        if bytes[0..4] != MAGIC {
            log::debug!("magic mismatch: {:?}", &bytes[0..4]);
            return Err(DecodeError::NotAQoiFile);
        }

        let width = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let height = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let channels = bytes[12];
        let colorspace = bytes[13];

        let header = Header { width, height, channels, colorspace };

        if !header.channels_valid() {
            return Err(DecodeError::InvalidChannels(channels));
        }

        log::trace!("parsed QOI header: {}x{}, {} channels", width, height, channels);
        Ok(header)
    }

    pub fn write(&self, out: &mut [u8; HEADER_SIZE]) {
        out[0..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.width.to_be_bytes());
        out[8..12].copy_from_slice(&self.height.to_be_bytes());
        out[12] = self.channels;
        out[13] = self.colorspace;
    }
}

//! The owning `Image` value: a raster bundled with its header fields.
//!
//! Re-architected from the original design's caller-supplied
//! free-function-pointer release protocol (see `DESIGN.md`): the raster is
//! just a `Vec<u8>` the `Image` owns outright, dropped the ordinary way
//! when the `Image` is dropped.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::ImageError;
use crate::header::Header;

/// A decoded (or to-be-encoded) raster together with its header fields.
///
/// The raster is owned by the `Image`: [`Image::raster`] borrows it,
/// [`Image::raster_clone`] hands back a detached copy for callers that need
/// mutable scratch space without taking ownership of the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: Header,
    raster: Vec<u8>,
}

impl Image {
    /// Allocates a zeroed raster of `width * height * channels` bytes.
    pub fn blank(width: u32, height: u32, channels: u8, colorspace: u8) -> Result<Self, ImageError> {
        if channels != 3 && channels != 4 {
            return Err(ImageError::InvalidChannels(channels));
        }
        let size = raster_size(width, height, channels)?;
        Ok(Image {
            header: Header { width, height, channels, colorspace },
            raster: vec![0u8; size],
        })
    }

    /// Takes ownership of a caller-provided raster. Its length must equal
    /// `width * height * channels` exactly.
    pub fn from_raster(
        width: u32,
        height: u32,
        channels: u8,
        colorspace: u8,
        raster: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if channels != 3 && channels != 4 {
            return Err(ImageError::InvalidChannels(channels));
        }
        let expected = raster_size(width, height, channels)?;
        if raster.len() != expected {
            return Err(ImageError::RasterLengthMismatch { expected, actual: raster.len() });
        }
        Ok(Image {
            header: Header { width, height, channels, colorspace },
            raster,
        })
    }

    pub(crate) fn from_parts(header: Header, raster: Vec<u8>) -> Self {
        debug_assert_eq!(raster.len(), header.width as usize * header.height as usize * header.channels as usize);
        Image { header, raster }
    }

    pub(crate) fn header(&self) -> Header {
        self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn channels(&self) -> u8 {
        self.header.channels
    }

    pub fn colorspace(&self) -> u8 {
        self.header.colorspace
    }

    pub fn has_alpha(&self) -> bool {
        self.header.has_alpha()
    }

    /// `width * channels`: the byte distance between the start of one row
    /// and the next.
    pub fn row_stride(&self) -> usize {
        self.header.width as usize * self.header.channels as usize
    }

    pub fn raster(&self) -> &[u8] {
        &self.raster
    }

    /// A detached copy of the raster, independent of this image's lifetime.
    pub fn raster_clone(&self) -> Vec<u8> {
        self.raster.clone()
    }

    pub(crate) fn into_raster(self) -> Vec<u8> {
        self.raster
    }
}

fn raster_size(width: u32, height: u32, channels: u8) -> Result<usize, ImageError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(channels as usize))
        .ok_or(ImageError::DimensionsOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_allocates_zeroed_raster_of_right_size() {
        let img = Image::blank(4, 3, 4, 0).unwrap();
        assert_eq!(img.raster().len(), 4 * 3 * 4);
        assert!(img.raster().iter().all(|&b| b == 0));
        assert_eq!(img.row_stride(), 16);
        assert!(img.has_alpha());
    }

    #[test]
    fn from_raster_rejects_wrong_length() {
        let err = Image::from_raster(2, 2, 3, 0, vec![0u8; 5]).unwrap_err();
        assert_eq!(err, ImageError::RasterLengthMismatch { expected: 12, actual: 5 });
    }

    #[test]
    fn from_raster_rejects_bad_channels() {
        let err = Image::from_raster(2, 2, 5, 0, vec![0u8; 20]).unwrap_err();
        assert_eq!(err, ImageError::InvalidChannels(5));
    }

    #[test]
    fn raster_clone_is_independent() {
        let img = Image::blank(1, 1, 3, 0).unwrap();
        let mut clone = img.raster_clone();
        clone[0] = 200;
        assert_eq!(img.raster()[0], 0);
    }
}

//! The file adapter: path-based `load`/`save`, built on top of
//! [`crate::encode_stream`]/[`crate::decode_stream`].
//!
//! This is the "external collaborator" the codec core explicitly does not
//! own — file I/O, not the opcode stream, is the only thing this module
//! adds. Errors map `std::io::ErrorKind` onto the five semantic kinds a
//! caller of the original C `qoi_new_from_file`/`qoi_save` would have read
//! out of the global `qoi_errno` register.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{DecodeError, EncodeError};
use crate::Image;

/// Errors from the file adapter. Unlike [`DecodeError`]/[`EncodeError`],
/// which report exactly what went wrong with the byte stream, this type
/// additionally carries the filesystem-level failures a path-based API can
/// hit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("insufficient file permissions, or file doesn't exist")]
    Permissions,
    #[error("insufficient memory")]
    Memory,
    #[error("file could not be read")]
    FileContent,
    #[error("file is not a valid QOI file")]
    NotAQoiFile,
    #[error("insufficient disk space to save file")]
    DiskSpace,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::PermissionDenied | ErrorKind::NotFound => Error::Permissions,
            ErrorKind::UnexpectedEof => Error::FileContent,
            ErrorKind::WriteZero => Error::DiskSpace,
            _ => Error::FileContent,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::NotAQoiFile => Error::NotAQoiFile,
            DecodeError::Truncated => Error::FileContent,
            DecodeError::MalformedOpcode(_) => Error::FileContent,
            DecodeError::InvalidChannels(_) => Error::NotAQoiFile,
            DecodeError::OutputLengthMismatch { .. } => Error::FileContent,
        }
    }
}

impl From<EncodeError> for Error {
    fn from(_: EncodeError) -> Self {
        Error::Memory
    }
}

/// Reads a QOI file from `path` and decodes it.
pub fn load(path: impl AsRef<Path>) -> Result<Image, Error> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    log::debug!("loaded {} bytes from {}", bytes.len(), path.display());
    let image = crate::decode_stream(&bytes)?;
    Ok(image)
}

/// Encodes `image` and writes it to `path`.
pub fn save(path: impl AsRef<Path>, image: &Image) -> Result<(), Error> {
    let path = path.as_ref();
    let bytes = crate::encode_stream(image)?;
    std::fs::write(path, &bytes)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

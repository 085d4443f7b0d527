//! Splitting a bitmap into header and pixel payload, and joining them back.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ContainerError, Result};

/// File signature of a Windows bitmap.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// BITMAPFILEHEADER plus BITMAPINFOHEADER.
pub const HEADER_LEN: usize = 54;

const FILE_HEADER_LEN: usize = 14;
const PIXEL_OFFSET_AT: usize = 10;
const INFO_HEADER_SIZE_AT: usize = 14;
const IMAGE_SIZE_AT: usize = 34;
// BITMAPCOREHEADER, the smallest info header.
const CORE_HEADER_LEN: usize = 12;
// BITMAPINFOHEADER and later carry the image size field.
const INFO_HEADER_LEN: usize = 40;

/// A bitmap split into its header bytes and its pixel payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    /// Every byte before the pixel array.
    pub header: Vec<u8>,
    /// The pixel array.
    pub payload: Vec<u8>,
}

impl Container {
    /// Parses a bitmap held in memory.
    ///
    /// The pixel array starts at the offset stored at byte 10, which must lie
    /// past the file header and the info header whose size is stored at byte
    /// 14. For info headers of 40 bytes or more the image size is stored at
    /// byte 34; a size of zero, or a 12-byte core header, means "to end of
    /// file". Bytes past the pixel array are dropped.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SIGNATURE.len() || bytes[..2] != SIGNATURE {
            return Err(ContainerError::InvalidContainer("missing BM signature"));
        }
        if bytes.len() < INFO_HEADER_SIZE_AT + 4 {
            return Err(ContainerError::InvalidContainer("truncated bitmap header"));
        }
        let info_len = read_u32_le(bytes, INFO_HEADER_SIZE_AT) as usize;
        if info_len < CORE_HEADER_LEN {
            return Err(ContainerError::InvalidContainer("unsupported info header"));
        }
        let header_end = FILE_HEADER_LEN.saturating_add(info_len);
        if bytes.len() < header_end {
            return Err(ContainerError::InvalidContainer("truncated bitmap header"));
        }

        let offset = read_u32_le(bytes, PIXEL_OFFSET_AT) as usize;
        if offset < header_end || offset > bytes.len() {
            return Err(ContainerError::InvalidContainer(
                "pixel data offset out of range",
            ));
        }
        let available = bytes.len() - offset;
        let size_field = if info_len >= INFO_HEADER_LEN {
            read_u32_le(bytes, IMAGE_SIZE_AT) as usize
        } else {
            0
        };
        let size = match size_field {
            0 => available,
            size if size > available => {
                return Err(ContainerError::InvalidContainer("pixel data truncated"))
            }
            size => size,
        };
        if size < available {
            warn!("ignoring {} bytes after pixel data", available - size);
        }

        debug!("bitmap: header {} bytes, payload {} bytes", offset, size);
        Ok(Self {
            header: bytes[..offset].to_vec(),
            payload: bytes[offset..offset + size].to_vec(),
        })
    }

    /// Concatenates header and payload into file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.len() + self.payload.len());
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Reads and parses the bitmap at `path`.
pub fn read_container(path: impl AsRef<Path>) -> Result<Container> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ContainerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Container::parse(&bytes)
}

/// Writes `header` followed by `payload` to `path`, replacing any existing file.
///
/// The bytes go to a sibling `<name>.tmp` that is synced and then renamed onto
/// `path`, so a failed write never leaves a truncated file at `path`.
pub fn write_container(path: impl AsRef<Path>, header: &[u8], payload: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source| ContainerError::Io {
        path: path.to_path_buf(),
        source,
    };
    let tmp = temp_sibling(path).map_err(io_error)?;

    let written = write_synced(&tmp, header, payload).and_then(|()| fs::rename(&tmp, path));
    if let Err(source) = written {
        if let Err(err) = fs::remove_file(&tmp) {
            debug!("could not remove {}: {}", tmp.display(), err);
        }
        return Err(io_error(source));
    }
    debug!("wrote {} bytes to {}", header.len() + payload.len(), path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn write_synced(path: &Path, header: &[u8], payload: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(header)?;
    file.write_all(payload)?;
    file.sync_all()
}

fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/*!
Bank loader: turns a `BankMapping` into a file offset and a byte range.

File layout: header, optional 512-byte trainer, all PRG pages, then all CHR
pages. Reads are bounds checked against the file buffer; a mapping that
would run past the end reports `OutOfRange` instead of reading short.
*/

use crate::error::{LoadError, Result};
use crate::header::{HEADER_SIZE, InesHeader};
use crate::layout::{PRG_PAGE_SIZE, TRAINER_SIZE};
use crate::mapper::{BankMapping, BankSource};

/// File offset of a 1-based page within a region that starts right after the
/// header (and trainer). Page 0 means "no source" and has no offset.
pub fn offset_of(
    page_index: u16,
    page_size: u32,
    header_size: u32,
    trainer_present: bool,
) -> Option<u32> {
    let trainer = if trainer_present { TRAINER_SIZE } else { 0 };
    let skipped = page_index.checked_sub(1)? as u32;
    Some(header_size + trainer + skipped * page_size)
}

/// Borrowed view over one ROM file and its (validated) header.
#[derive(Clone, Copy, Debug)]
pub struct BankLoader<'a> {
    file: &'a [u8],
    header: &'a InesHeader,
}

impl<'a> BankLoader<'a> {
    pub fn new(file: &'a [u8], header: &'a InesHeader) -> Self {
        Self { file, header }
    }

    /// Offset of the first byte of `mapping` in the file, `None` for page 0.
    /// CHR pages follow the whole PRG area.
    pub fn file_offset(&self, mapping: &BankMapping) -> Option<u32> {
        let base = offset_of(
            mapping.page,
            mapping.page_size,
            HEADER_SIZE as u32,
            self.header.has_trainer(),
        )?;
        Some(match mapping.source {
            BankSource::Prg => base,
            BankSource::Chr => base + self.header.prg_pages_16k() as u32 * PRG_PAGE_SIZE,
        })
    }

    /// Bytes backing `mapping`. A page 0 mapping has no source and yields
    /// `Ok(None)`; the destination is left as it is.
    pub fn load(&self, mapping: &BankMapping) -> Result<Option<&'a [u8]>> {
        match self.file_offset(mapping) {
            Some(offset) => self.range(offset, mapping.dest_size).map(Some),
            None => Ok(None),
        }
    }

    /// The 512-byte trainer, if the header declares one.
    pub fn trainer(&self) -> Result<Option<&'a [u8]>> {
        if !self.header.has_trainer() {
            return Ok(None);
        }
        self.range(HEADER_SIZE as u32, TRAINER_SIZE).map(Some)
    }

    fn range(&self, offset: u32, len: u32) -> Result<&'a [u8]> {
        let start = offset as usize;
        start
            .checked_add(len as usize)
            .and_then(|end| self.file.get(start..end))
            .ok_or(LoadError::OutOfRange {
                offset,
                len,
                file_len: self.file.len(),
            })
    }
}

/*!
In-memory image of the CPU address space and the PPU pattern table window,
populated from loaded banks.

Only bytes written by a bank (or the trainer) count as populated. Vectors are
read from the populated image and are unavailable when $FFFA-$FFFF was never
written, e.g. when the mapper is unsupported.
*/

use std::ops::Range;

use serde::Serialize;

use crate::layout::{CHR_PAGE_SIZE, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, TRAINER_START};
use crate::mapper::{BankMapping, BankSource};

const CPU_SPACE: usize = 0x10000;

/// The three 6502 interrupt vectors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vectors {
    pub nmi: u16,
    pub reset: u16,
    pub irq: u16,
}

pub struct MemoryImage {
    cpu: Vec<u8>,
    chr: Vec<u8>,
    populated: Vec<Range<u32>>,
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImage")
            .field("populated", &self.populated)
            .field("chr_len", &self.chr.len())
            .finish()
    }
}

impl MemoryImage {
    pub fn new() -> Self {
        Self {
            cpu: vec![0; CPU_SPACE],
            chr: vec![0; CHR_PAGE_SIZE as usize],
            populated: Vec::new(),
        }
    }

    /// Copy `data` into the destination of `mapping`. Later writes overwrite
    /// earlier ones, the way a loader would patch overlapping windows.
    pub fn apply(&mut self, mapping: &BankMapping, data: &[u8]) {
        match mapping.source {
            BankSource::Prg => self.write_cpu(mapping.dest, data),
            BankSource::Chr => {
                let start = mapping.dest as usize;
                let Some(dst) = self.chr.get_mut(start..) else {
                    return;
                };
                let n = dst.len().min(data.len());
                dst[..n].copy_from_slice(&data[..n]);
            }
        }
    }

    pub fn apply_trainer(&mut self, trainer: &[u8]) {
        self.write_cpu(TRAINER_START, trainer);
    }

    fn write_cpu(&mut self, dest: u16, data: &[u8]) {
        let start = dest as usize;
        let n = data.len().min(CPU_SPACE - start);
        self.cpu[start..start + n].copy_from_slice(&data[..n]);
        self.mark(start as u32..(start + n) as u32);
    }

    fn mark(&mut self, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        self.populated.push(range);
        self.populated.sort_by_key(|r| r.start);
        let mut merged: Vec<Range<u32>> = Vec::with_capacity(self.populated.len());
        for r in self.populated.drain(..) {
            match merged.last_mut() {
                Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
                _ => merged.push(r),
            }
        }
        self.populated = merged;
    }

    pub fn is_populated(&self, range: Range<u32>) -> bool {
        self.populated
            .iter()
            .any(|r| r.start <= range.start && range.end <= r.end)
    }

    pub fn populated(&self) -> &[Range<u32>] {
        &self.populated
    }

    pub fn cpu(&self) -> &[u8] {
        &self.cpu
    }

    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.cpu[addr as usize]
    }

    /// Little-endian word at `addr`; the high byte wraps to $0000 at $FFFF.
    pub fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub fn vectors(&self) -> Option<Vectors> {
        if !self.is_populated(NMI_VECTOR as u32..CPU_SPACE as u32) {
            return None;
        }
        Some(Vectors {
            nmi: self.read_word(NMI_VECTOR),
            reset: self.read_word(RESET_VECTOR),
            irq: self.read_word(IRQ_VECTOR),
        })
    }
}

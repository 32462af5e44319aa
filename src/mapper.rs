/*!
Boot-time bank resolver.

At power-on, before any bank register is written, each mapper chip exposes a
fixed view of PRG pages in $8000-$FFFF and of CHR pages in the PPU pattern
table window. Mappers are grouped into classes that share that initial view;
`resolve` turns a class plus the header's page counts into an ordered list of
`BankMapping`s. Runtime switching is not modelled.

Page indices are 1-based. A computed index of 0 means "no source" and is never
emitted; neither are PRG mappings when the image has no PRG pages, nor the
CHR mapping when it has no CHR pages.
*/

use serde::Serialize;

use crate::error::UnsupportedMapper;
use crate::layout::{
    CHR_BANK_ADDRESS, CHR_PAGE_SIZE, PRG_8K_PAGE_SIZE, PRG_BANK_8000, PRG_BANK_A000,
    PRG_BANK_C000, PRG_BANK_E000, PRG_BANK_HIGH, PRG_BANK_LOW, PRG_PAGE_SIZE,
};
use crate::mappers;

/// Which part of the file a page is taken from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BankSource {
    /// PRG ROM, mapped into CPU space.
    Prg,
    /// CHR ROM, mapped into PPU space.
    Chr,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BankMapping {
    pub source: BankSource,
    /// 1-based page index within `source`, in units of `page_size`.
    pub page: u16,
    pub page_size: u32,
    pub dest: u16,
    pub dest_size: u32,
}

impl BankMapping {
    fn prg_16k(page: u16, dest: u16) -> Self {
        Self {
            source: BankSource::Prg,
            page,
            page_size: PRG_PAGE_SIZE,
            dest,
            dest_size: PRG_PAGE_SIZE,
        }
    }

    fn prg_8k(page: u16, dest: u16) -> Self {
        Self {
            source: BankSource::Prg,
            page,
            page_size: PRG_8K_PAGE_SIZE,
            dest,
            dest_size: PRG_8K_PAGE_SIZE,
        }
    }

    fn chr_8k(page: u16) -> Self {
        Self {
            source: BankSource::Chr,
            page,
            page_size: CHR_PAGE_SIZE,
            dest: CHR_BANK_ADDRESS,
            dest_size: CHR_PAGE_SIZE,
        }
    }

    /// One past the last destination address.
    pub fn dest_end(&self) -> u32 {
        self.dest as u32 + self.dest_size
    }
}

/// Initial PRG view shared by a group of mappers. `N` below is the number of
/// 16 KiB PRG pages. Every class maps CHR page 1 at PPU $0000.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum MapperClass {
    /// $8000 = page 1, $C000 = page N.
    FirstLast,
    /// $8000 = page N, $C000 = page N.
    LastLast,
    /// $8000 = page 1, $C000 = page 2 (page 1 again on single-page images).
    FirstSecond,
    /// 8 KiB page 1 at $8000, 8 KiB page 2N-2 at $A000, 16 KiB page N at $C000.
    Mmc2,
    /// Last 8 KiB page at each of $8000, $A000, $C000 and $E000.
    AllLast8k,
}

impl MapperClass {
    fn prg_mappings(self, prg_pages_16k: u8) -> Vec<BankMapping> {
        let n = prg_pages_16k as u16;
        let last_8k = n * 2;
        let candidates = match self {
            MapperClass::FirstLast => vec![
                BankMapping::prg_16k(1, PRG_BANK_LOW),
                BankMapping::prg_16k(n, PRG_BANK_HIGH),
            ],
            MapperClass::LastLast => vec![
                BankMapping::prg_16k(n, PRG_BANK_LOW),
                BankMapping::prg_16k(n, PRG_BANK_HIGH),
            ],
            MapperClass::FirstSecond => vec![
                BankMapping::prg_16k(1, PRG_BANK_LOW),
                BankMapping::prg_16k(n.min(2), PRG_BANK_HIGH),
            ],
            MapperClass::Mmc2 => vec![
                BankMapping::prg_8k(1, PRG_BANK_8000),
                BankMapping::prg_8k(last_8k.saturating_sub(2), PRG_BANK_A000),
                BankMapping::prg_16k(n, PRG_BANK_C000),
            ],
            MapperClass::AllLast8k => [PRG_BANK_8000, PRG_BANK_A000, PRG_BANK_C000, PRG_BANK_E000]
                .into_iter()
                .map(|dest| BankMapping::prg_8k(last_8k, dest))
                .collect(),
        };
        candidates.into_iter().filter(|m| m.page != 0).collect()
    }
}

/// Resolve the boot-time bank plan for a mapper. PRG mappings come first in
/// ascending destination order, followed by the CHR mapping.
pub fn resolve(
    mapper_id: u8,
    prg_pages_16k: u8,
    chr_pages_8k: u8,
) -> Result<Vec<BankMapping>, UnsupportedMapper> {
    let class = mappers::class_of(mapper_id).ok_or(UnsupportedMapper(mapper_id))?;

    let mut plan = if prg_pages_16k == 0 {
        Vec::new()
    } else {
        class.prg_mappings(prg_pages_16k)
    };
    if chr_pages_8k != 0 {
        plan.push(BankMapping::chr_8k(1));
    }
    Ok(plan)
}

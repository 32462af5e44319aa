/*!
CPU address space layout and PPU layout constants.

CPU address map (cartridge independent):
- $0000-$1FFF: internal RAM (2 KiB, mirrored)
- $2000-$401F: memory-mapped PPU/APU/controller registers and their mirrors
- $4020-$5FFF: expansion ROM
- $6000-$7FFF: cartridge SRAM
- $7000-$71FF: trainer, only when the header declares one (aliases SRAM)
- $8000-$FFFF: PRG ROM window, two 16 KiB halves

The PRG window is always 32 KiB. Too many or too few PRG pages is a concern of
the mapper resolver, not of the layout.
*/

use serde::Serialize;

pub const RAM_START: u16 = 0x0000;
pub const RAM_SIZE: u32 = 0x2000;

pub const IOREGS_START: u16 = 0x2000;
pub const IOREGS_SIZE: u32 = 0x2020;

pub const EXPROM_START: u16 = 0x4020;
pub const EXPROM_SIZE: u32 = 0x1FE0;

pub const SRAM_START: u16 = 0x6000;
pub const SRAM_SIZE: u32 = 0x2000;

pub const TRAINER_START: u16 = 0x7000;
pub const TRAINER_SIZE: u32 = 0x0200;

pub const ROM_START: u16 = 0x8000;
pub const ROM_SIZE: u32 = 0x8000;

/// Size of a 16 KiB PRG page.
pub const PRG_PAGE_SIZE: u32 = 0x4000;
/// Size of an 8 KiB PRG sub-page used by mappers with 8 KiB windows.
pub const PRG_8K_PAGE_SIZE: u32 = 0x2000;
/// Size of an 8 KiB CHR page.
pub const CHR_PAGE_SIZE: u32 = 0x2000;

pub const PRG_BANK_LOW: u16 = ROM_START;
pub const PRG_BANK_HIGH: u16 = ROM_START + PRG_PAGE_SIZE as u16;

pub const PRG_BANK_8000: u16 = 0x8000;
pub const PRG_BANK_A000: u16 = 0xA000;
pub const PRG_BANK_C000: u16 = 0xC000;
pub const PRG_BANK_E000: u16 = 0xE000;

/// Pattern table window in PPU space.
pub const CHR_BANK_ADDRESS: u16 = 0x0000;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// PPU address space, bottom up. Documented only; nothing maps into it
/// except the CHR bank at $0000.
pub mod ppu {
    pub const PATTERN_TABLE_SIZE: u16 = 0x1000;
    pub const NAME_TABLE_SIZE: u16 = 0x3C0;
    pub const ATTRIBUTE_TABLE_SIZE: u16 = 0x40;
    pub const PALETTE_SIZE: u16 = 0x10;

    pub const PATTERN_TABLE_0: u16 = 0x0000;
    pub const PATTERN_TABLE_1: u16 = 0x1000;

    pub const NAME_TABLE_0: u16 = 0x2000;
    pub const ATTRIBUTE_TABLE_0: u16 = 0x23C0;
    pub const NAME_TABLE_1: u16 = 0x2400;
    pub const ATTRIBUTE_TABLE_1: u16 = 0x27C0;
    pub const NAME_TABLE_2: u16 = 0x2800;
    pub const ATTRIBUTE_TABLE_2: u16 = 0x2BC0;
    pub const NAME_TABLE_3: u16 = 0x2C00;
    pub const ATTRIBUTE_TABLE_3: u16 = 0x2FC0;

    /// $3000-$3EFF mirrors $2000-$2EFF.
    pub const MIRRORS_0: u16 = 0x3000;
    pub const MIRRORS_0_SIZE: u16 = 0xF00;

    pub const IMAGE_PALETTE: u16 = 0x3F00;
    pub const SPRITE_PALETTE: u16 = 0x3F10;

    /// $3F20-$3FFF mirrors the palettes.
    pub const MIRRORS_1: u16 = 0x3F20;
    pub const MIRRORS_1_SIZE: u16 = 0xE0;

    /// $4000-$FFFF mirrors $0000-$3FFF.
    pub const MIRRORS_2: u32 = 0x4000;
    pub const MIRRORS_2_SIZE: u32 = 0xC000;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    Code,
    Data,
    Io,
    Uninitialized,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemoryRegion {
    pub name: &'static str,
    pub start: u16,
    pub size: u32,
    pub kind: RegionKind,
}

impl MemoryRegion {
    const fn new(name: &'static str, start: u16, size: u32, kind: RegionKind) -> Self {
        Self {
            name,
            start,
            size,
            kind,
        }
    }

    /// One past the last address; may be 0x10000 for the ROM window.
    pub fn end(&self) -> u32 {
        self.start as u32 + self.size
    }

    pub fn contains(&self, addr: u32) -> bool {
        (self.start as u32..self.end()).contains(&addr)
    }
}

pub const RAM_REGION: MemoryRegion =
    MemoryRegion::new("RAM", RAM_START, RAM_SIZE, RegionKind::Data);
pub const IOREGS_REGION: MemoryRegion =
    MemoryRegion::new("IO_REGS", IOREGS_START, IOREGS_SIZE, RegionKind::Io);
pub const EXPROM_REGION: MemoryRegion = MemoryRegion::new(
    "EXP_ROM",
    EXPROM_START,
    EXPROM_SIZE,
    RegionKind::Uninitialized,
);
pub const SRAM_REGION: MemoryRegion =
    MemoryRegion::new("SRAM", SRAM_START, SRAM_SIZE, RegionKind::Data);
pub const TRAINER_REGION: MemoryRegion =
    MemoryRegion::new("TRAINER", TRAINER_START, TRAINER_SIZE, RegionKind::Code);
pub const ROM_REGION: MemoryRegion =
    MemoryRegion::new("ROM", ROM_START, ROM_SIZE, RegionKind::Code);

/// Regions in ascending start order. The trainer region, when present,
/// overlaps the upper half of SRAM; that mirrors the hardware aliasing.
pub fn regions(trainer_present: bool) -> Vec<MemoryRegion> {
    let mut out = vec![RAM_REGION, IOREGS_REGION, EXPROM_REGION, SRAM_REGION];
    if trainer_present {
        out.push(TRAINER_REGION);
    }
    out.push(ROM_REGION);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_without_trainer() {
        let r = regions(false);
        let names: Vec<_> = r.iter().map(|m| m.name).collect();
        assert_eq!(names, ["RAM", "IO_REGS", "EXP_ROM", "SRAM", "ROM"]);
        assert!(r.iter().all(|m| m.name != "TRAINER"));
    }

    #[test]
    fn regions_with_trainer() {
        let r = regions(true);
        assert_eq!(r.len(), 6);
        let trainer = r.iter().find(|m| m.name == "TRAINER").expect("trainer");
        assert_eq!(trainer.start, 0x7000);
        assert_eq!(trainer.end(), 0x7200);
        assert!(SRAM_REGION.contains(trainer.start as u32));
        assert_eq!(r.last(), Some(&ROM_REGION));
    }

    #[test]
    fn regions_are_ascending_and_tile_the_space() {
        let r = regions(false);
        for pair in r.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert_eq!(pair[0].end(), pair[1].start as u32);
        }
        assert_eq!(r[0].start, 0x0000);
        assert_eq!(r.last().map(|m| m.end()), Some(0x10000));
    }

    #[test]
    fn prg_windows_split_rom() {
        assert_eq!(PRG_BANK_LOW, 0x8000);
        assert_eq!(PRG_BANK_HIGH, 0xC000);
        assert!(ROM_REGION.contains(IRQ_VECTOR as u32 + 1));
    }
}

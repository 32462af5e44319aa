/*!
iNES (v1) header codec.

Layout (16 bytes, byte-packed):
- bytes[0..3]  = b"NES"
- byte 3       = 0x1A terminator
- byte 4       = PRG ROM size in 16 KiB pages
- byte 5       = CHR ROM size in 8 KiB pages
- byte 6       = control byte 0 (mirroring, battery, trainer, four-screen, mapper low nibble)
- byte 7       = control byte 1 (mapper high nibble in bits 4..7)
- byte 8       = PRG RAM size in 8 KiB banks
- bytes[9..16] = reserved, zero in a well-formed image

Parsing only requires 16 bytes. Magic/terminator checks belong to `is_ines`,
which callers run before handing bytes to the codec.
*/

use log::debug;
use serde::Serialize;

use crate::error::{LoadError, Result};

/// Size of the iNES header in bytes.
pub const HEADER_SIZE: usize = 16;
/// Format magic at offset 0.
pub const INES_MAGIC: [u8; 3] = *b"NES";
/// Terminator byte at offset 3.
pub const INES_TERMINATOR: u8 = 0x1A;
/// Number of reserved bytes at the end of the header.
pub const RESERVED_LEN: usize = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// The two packed control bytes (header bytes 6 and 7).
///
/// Every accessor masks and shifts explicitly; the bit position is noted on
/// each one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlFlags([u8; 2]);

impl ControlFlags {
    pub const fn new(byte0: u8, byte1: u8) -> Self {
        Self([byte0, byte1])
    }

    pub const fn byte0(&self) -> u8 {
        self.0[0]
    }

    pub const fn byte1(&self) -> u8 {
        self.0[1]
    }

    /// Byte 0, bit 0. Set means vertical mirroring; clear means horizontal.
    pub const fn vertical_mirroring(&self) -> bool {
        self.0[0] & 0b0000_0001 != 0
    }

    pub const fn horizontal_mirroring(&self) -> bool {
        !self.vertical_mirroring()
    }

    /// Byte 0, bit 1. Battery-backed SRAM at $6000-$7FFF.
    pub const fn battery_ram(&self) -> bool {
        (self.0[0] & 0b0000_0010) >> 1 != 0
    }

    /// Byte 0, bit 2. A 512-byte trainer follows the header.
    pub const fn trainer(&self) -> bool {
        (self.0[0] & 0b0000_0100) >> 2 != 0
    }

    /// Byte 0, bit 3. Four-screen VRAM layout.
    pub const fn four_screen(&self) -> bool {
        (self.0[0] & 0b0000_1000) >> 3 != 0
    }

    /// Low nibble from byte 0 bits 4..7, high nibble from byte 1 bits 4..7.
    pub const fn mapper_id(&self) -> u8 {
        ((self.0[0] & 0xF0) >> 4) | (self.0[1] & 0xF0)
    }

    /// Four-screen overrides the mirroring bit.
    pub const fn mirroring(&self) -> Mirroring {
        if self.four_screen() {
            Mirroring::FourScreen
        } else if self.vertical_mirroring() {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }
}

/// Parsed iNES header. Immutable once parsed; see `validate::repair` for the
/// only transformation that produces a modified copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InesHeader {
    magic: [u8; 3],
    terminator: u8,
    prg_pages_16k: u8,
    chr_pages_8k: u8,
    control: ControlFlags,
    ram_banks_8k: u8,
    reserved: [u8; RESERVED_LEN],
}

/// Format-sniffing predicate: long enough and carries the `NES<1A>` tag.
pub fn is_ines(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && data[0..3] == INES_MAGIC && data[3] == INES_TERMINATOR
}

impl InesHeader {
    /// Parse the first 16 bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let Some(bytes) = data.get(..HEADER_SIZE) else {
            return Err(LoadError::TruncatedInput {
                needed: HEADER_SIZE,
                found: data.len(),
            });
        };

        let mut reserved = [0u8; RESERVED_LEN];
        reserved.copy_from_slice(&bytes[9..HEADER_SIZE]);

        let header = Self {
            magic: [bytes[0], bytes[1], bytes[2]],
            terminator: bytes[3],
            prg_pages_16k: bytes[4],
            chr_pages_8k: bytes[5],
            control: ControlFlags::new(bytes[6], bytes[7]),
            ram_banks_8k: bytes[8],
            reserved,
        };
        debug!(
            "iNES header: prg={} chr={} cb0={:#04x} cb1={:#04x} ram={} reserved={:02x?}",
            header.prg_pages_16k,
            header.chr_pages_8k,
            header.control.byte0(),
            header.control.byte1(),
            header.ram_banks_8k,
            header.reserved
        );
        Ok(header)
    }

    /// Serialize back to the 16-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..3].copy_from_slice(&self.magic);
        out[3] = self.terminator;
        out[4] = self.prg_pages_16k;
        out[5] = self.chr_pages_8k;
        out[6] = self.control.byte0();
        out[7] = self.control.byte1();
        out[8] = self.ram_banks_8k;
        out[9..].copy_from_slice(&self.reserved);
        out
    }

    pub fn prg_pages_16k(&self) -> u8 {
        self.prg_pages_16k
    }

    pub fn chr_pages_8k(&self) -> u8 {
        self.chr_pages_8k
    }

    pub fn ram_banks_8k(&self) -> u8 {
        self.ram_banks_8k
    }

    pub fn control(&self) -> ControlFlags {
        self.control
    }

    pub fn reserved(&self) -> &[u8; RESERVED_LEN] {
        &self.reserved
    }

    pub fn mapper_id(&self) -> u8 {
        self.control.mapper_id()
    }

    pub fn has_trainer(&self) -> bool {
        self.control.trainer()
    }

    pub fn mirroring(&self) -> Mirroring {
        self.control.mirroring()
    }

    /// The nine bytes from control byte 1 through the end of the header.
    pub(crate) fn tail(&self) -> [u8; 9] {
        let mut tail = [0u8; 9];
        tail.copy_from_slice(&self.to_bytes()[7..]);
        tail
    }

    pub(crate) fn with_tail_cleared(&self) -> Self {
        Self {
            control: ControlFlags::new(self.control.byte0(), 0),
            ram_banks_8k: 0,
            reserved: [0; RESERVED_LEN],
            ..*self
        }
    }

    pub(crate) fn with_reserved_cleared(&self) -> Self {
        Self {
            reserved: [0; RESERVED_LEN],
            ..*self
        }
    }
}

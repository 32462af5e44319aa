//! Shared test utilities for building iNES (v1) images.
//!
//! These helpers de-duplicate image construction across the header, loader,
//! image and cartridge tests. They support just what the test suite needs.
//!
//! Notes on header fields:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units
//! - byte 6 = control byte 0 (mirroring, battery, trainer, four-screen, mapper low nibble)
//! - byte 7 = control byte 1 (mapper high nibble)
//! - byte 8 = PRG RAM size in 8 KiB units
//! - bytes 9..15 = reserved

#![allow(dead_code)]

pub const PRG_FILL: u8 = 0xAA;
pub const CHR_FILL: u8 = 0xCC;
pub const TRAINER_FILL: u8 = 0x7E;

/// Control bytes that encode `mapper` with no other flags set.
pub fn mapper_flags(mapper: u8) -> (u8, u8) {
    ((mapper & 0x0F) << 4, mapper & 0xF0)
}

/// A bare 16-byte header.
pub fn header_bytes(
    prg_16k: u8,
    chr_8k: u8,
    flags6: u8,
    flags7: u8,
    ram_8k: u8,
    reserved: [u8; 7],
) -> [u8; 16] {
    let mut h = [0u8; 16];
    h[0..4].copy_from_slice(b"NES\x1A");
    h[4] = prg_16k;
    h[5] = chr_8k;
    h[6] = flags6;
    h[7] = flags7;
    h[8] = ram_8k;
    h[9..].copy_from_slice(&reserved);
    h
}

/// Header, optional trainer, then PRG and CHR payloads built by the fill
/// closures (called with the 1-based page number).
fn build_with(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
    prg_fill: impl Fn(usize) -> u8,
    chr_fill: impl Fn(usize) -> u8,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );
    bytes.extend_from_slice(&header_bytes(
        prg_16k as u8,
        chr_8k as u8,
        flags6,
        flags7,
        0,
        [0; 7],
    ));
    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    for page in 1..=prg_16k {
        bytes.extend(std::iter::repeat_n(prg_fill(page), 16 * 1024));
    }
    for page in 1..=chr_8k {
        bytes.extend(std::iter::repeat_n(chr_fill(page), 8 * 1024));
    }
    bytes
}

/// Image with every PRG byte `PRG_FILL` and every CHR byte `CHR_FILL`.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    build_with(
        prg_16k,
        chr_8k,
        flags6,
        flags7,
        trainer,
        |_| PRG_FILL,
        |_| CHR_FILL,
    )
}

/// Image whose pages are distinguishable: PRG page k is filled with
/// `0x10 + k`, CHR page k with `0x80 + k`.
pub fn build_paged_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    build_with(
        prg_16k,
        chr_8k,
        flags6,
        flags7,
        trainer,
        |k| 0x10 + k as u8,
        |k| 0x80 + k as u8,
    )
}

/// Offset of PRG page `page` (1-based) in an image built by the helpers above.
pub fn prg_page_offset(page: usize, trainer: bool) -> usize {
    16 + if trainer { 512 } else { 0 } + (page - 1) * 16 * 1024
}

/// Write NMI/RESET/IRQ at the end of a 16 KiB PRG page of `rom`.
pub fn set_vectors_in_page(rom: &mut [u8], page: usize, trainer: bool, vectors: (u16, u16, u16)) {
    let base = prg_page_offset(page, trainer) + 0x3FFA;
    let (nmi, reset, irq) = vectors;
    write_le_u16(rom, base, nmi);
    write_le_u16(rom, base + 2, reset);
    write_le_u16(rom, base + 4, irq);
}

#[inline]
fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn paged_fill_is_per_page() {
        let rom = build_paged_ines(2, 2, 0, 0, None);
        assert_eq!(rom[prg_page_offset(1, false)], 0x11);
        assert_eq!(rom[prg_page_offset(2, false)], 0x12);
        assert_eq!(rom[16 + 2 * 16 * 1024 + 8 * 1024], 0x82);
    }

    #[test]
    fn mapper_flags_split_nibbles() {
        assert_eq!(mapper_flags(0x5B), (0xB0, 0x50));
    }

    #[test]
    fn writes_vectors_at_page_end() {
        let mut rom = build_ines(1, 0, 0, 0, None);
        set_vectors_in_page(&mut rom, 1, false, (0x8456, 0x8123, 0x8ABC));
        let base = 16 + 0x3FFA;
        assert_eq!(&rom[base..base + 6], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }
}

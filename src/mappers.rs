/*
Module: mappers

Table of known iNES mapper numbers. Each entry names the chip and, when the
loader knows its power-on PRG view, the class that describes it. Adding a
mapper is one line here.

Entries with `class: None` are recognised by name only (shown in reports) and
resolve as unsupported.
*/

use crate::mapper::MapperClass;
use crate::mapper::MapperClass::{AllLast8k, FirstLast, FirstSecond, LastLast, Mmc2};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapperInfo {
    pub id: u8,
    pub name: &'static str,
    pub class: Option<MapperClass>,
}

const fn entry(id: u8, name: &'static str, class: Option<MapperClass>) -> MapperInfo {
    MapperInfo { id, name, class }
}

/// Sorted by id.
///
/// MMC3 (4) and SunSoft FME-7 (69) are listed as `FirstLast`: both are assumed
/// to power up with the first page at $8000 and the last page at $C000.
pub static MAPPERS: &[MapperInfo] = &[
    entry(0, "No mapper", Some(FirstLast)),
    entry(1, "Nintendo MMC1", Some(FirstLast)),
    entry(2, "UNROM switch", Some(FirstLast)),
    entry(3, "CNROM switch", Some(FirstLast)),
    entry(4, "Nintendo MMC3", Some(FirstLast)),
    entry(5, "Nintendo MMC5", Some(FirstLast)),
    entry(6, "FFE F4xxx", Some(FirstLast)),
    entry(7, "AOROM switch", Some(FirstSecond)),
    entry(8, "FFE F3xxx", Some(FirstSecond)),
    entry(9, "Nintendo MMC2", Some(Mmc2)),
    entry(10, "Nintendo MMC4", Some(FirstLast)),
    entry(11, "Color Dreams chip", Some(FirstSecond)),
    entry(15, "100-in-1 switch", Some(FirstSecond)),
    entry(16, "Bandai chip", Some(FirstLast)),
    entry(17, "FFE F8xxx", Some(FirstLast)),
    entry(18, "Jaleco SS8806 chip", Some(FirstLast)),
    entry(19, "Namcot 106 chip", Some(FirstLast)),
    entry(20, "Nintendo Disk System", None),
    entry(21, "Konami VRC4", Some(FirstLast)),
    entry(22, "Konami VRC2 type A", Some(FirstLast)),
    entry(23, "Konami VRC2 type B", Some(FirstLast)),
    entry(24, "Konami VRC6", Some(FirstLast)),
    entry(25, "Konami VRC4 (alt)", None),
    entry(32, "Irem G-101 chip", Some(FirstLast)),
    entry(33, "Taito TC0190/TC0350", Some(FirstLast)),
    entry(34, "Nina-1 / 32 KB ROM switch", Some(FirstSecond)),
    entry(64, "Tengen RAMBO-1 chip", Some(AllLast8k)),
    entry(65, "Irem H-3001 chip", Some(FirstLast)),
    entry(66, "GNROM switch", Some(FirstLast)),
    entry(67, "SunSoft3 chip", None),
    entry(68, "SunSoft4 chip", Some(FirstLast)),
    entry(69, "SunSoft5 FME-7 chip", Some(FirstLast)),
    entry(71, "Camerica chip", Some(FirstLast)),
    entry(78, "Irem 74HC161/32-based", Some(FirstLast)),
    entry(91, "Pirate HK-SF3 chip", Some(LastLast)),
];

pub fn lookup(id: u8) -> Option<&'static MapperInfo> {
    MAPPERS
        .binary_search_by_key(&id, |m| m.id)
        .ok()
        .map(|i| &MAPPERS[i])
}

/// Boot-time class for `id`, if the loader supports it.
pub fn class_of(id: u8) -> Option<MapperClass> {
    lookup(id).and_then(|m| m.class)
}

pub fn mapper_name(id: u8) -> Option<&'static str> {
    lookup(id).map(|m| m.name)
}

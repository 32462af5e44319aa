/*!
Human readable ROM information, one `key : value` line per fact.
*/

use std::fmt;

use crate::header::InesHeader;
use crate::mappers::mapper_name;
use crate::validate;

/// Fallback name for ids missing from the mapper table.
pub const MAPPER_NOT_SUPPORTED: &str = "Unknown mapper";

pub struct RomInfo<'a> {
    header: &'a InesHeader,
}

impl<'a> RomInfo<'a> {
    pub fn new(header: &'a InesHeader) -> Self {
        Self { header }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl fmt::Display for RomInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.header;
        let flags = h.control();
        let mapper = h.mapper_id();
        // four-screen is reported on its own line
        let mirroring = if flags.horizontal_mirroring() {
            "horizontal"
        } else {
            "vertical"
        };

        writeln!(f, "ROM information")?;
        writeln!(f, "---------------")?;
        writeln!(
            f,
            "Valid image header      : {}",
            yes_no(!validate::is_corrupt(h))
        )?;
        writeln!(f, "16K PRG-ROM page count  : {}", h.prg_pages_16k())?;
        writeln!(f, "8K CHR-ROM page count   : {}", h.chr_pages_8k())?;
        writeln!(f, "Mirroring               : {mirroring}")?;
        writeln!(f, "SRAM enabled            : {}", yes_no(flags.battery_ram()))?;
        writeln!(f, "512-byte trainer        : {}", yes_no(flags.trainer()))?;
        writeln!(f, "Four screen VRAM layout : {}", yes_no(flags.four_screen()))?;
        write!(
            f,
            "Mapper                  : {} (Mapper #{mapper})",
            mapper_name(mapper).unwrap_or(MAPPER_NOT_SUPPORTED)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::header_bytes;

    #[test]
    fn describes_mmc1_with_battery() {
        let h = InesHeader::parse(&header_bytes(8, 0, 0x13, 0x00, 1, [0; 7])).expect("parse");
        let text = RomInfo::new(&h).to_string();
        assert!(text.contains("Valid image header      : yes"));
        assert!(text.contains("16K PRG-ROM page count  : 8"));
        assert!(text.contains("Mirroring               : vertical"));
        assert!(text.contains("SRAM enabled            : yes"));
        assert!(text.contains("512-byte trainer        : no"));
        assert!(text.ends_with("Mapper                  : Nintendo MMC1 (Mapper #1)"));
    }

    #[test]
    fn unknown_mapper_and_corrupt_header() {
        let h =
            InesHeader::parse(&header_bytes(1, 1, 0xC8, 0xC0, 0, [0, 0, 1, 0, 0, 0, 0])).expect("parse");
        let text = RomInfo::new(&h).to_string();
        assert!(text.contains("Valid image header      : no"));
        assert!(text.contains("Mirroring               : horizontal"));
        assert!(text.contains("Four screen VRAM layout : yes"));
        assert!(text.contains("Unknown mapper (Mapper #204)"));
    }
}

/*!
Header validation and repair.

A header is considered corrupt when any reserved byte is nonzero. Corruption
is advisory: callers may keep the raw header or ask for a repaired copy.

Some dump tools stamped their name over the tail of the header. The
`DiskDude!` stamp is the common one; it also clobbers control byte 1 and the
RAM bank count, which turns every mapper id into 0x4x. `repair` clears the
whole stamp before zeroing the reserved area.
*/

use crate::header::InesHeader;

/// Tool stamp found from control byte 1 through the end of the header.
pub const DISKDUDE_SIGNATURE: [u8; 9] = *b"DiskDude\0";

pub fn is_corrupt(header: &InesHeader) -> bool {
    header.reserved().iter().any(|&b| b != 0)
}

pub fn has_diskdude_signature(header: &InesHeader) -> bool {
    header.tail() == DISKDUDE_SIGNATURE
}

/// Return a repaired copy of `header`. Idempotent.
pub fn repair(header: &InesHeader) -> InesHeader {
    let base = if has_diskdude_signature(header) {
        header.with_tail_cleared()
    } else {
        *header
    };
    base.with_reserved_cleared()
}

#![doc = r#"
cartmap library crate.

Plans how an iNES cartridge image is laid into the 6502 address space at
power-on: which file ranges are copied to which addresses, given the mapper
the header declares.

Modules:
- header: iNES header codec and control flag accessors
- validate: corrupt header detection and repair
- layout: fixed CPU address space regions and PPU layout constants
- mapper: boot-time bank resolver and `BankMapping`
- mappers: table of known mapper ids, names and classes
- loader: file offset arithmetic and bounds-checked bank reads
- image: populated CPU/pattern-table image and interrupt vectors
- cartridge: the load pipeline tying the above together
- describe: human readable ROM information
- config: loader options, loadable from TOML

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod cartridge;
pub mod config;
pub mod describe;
pub mod error;
pub mod header;
pub mod image;
pub mod layout;
pub mod loader;
pub mod mapper;
pub mod mappers;
pub mod validate;

// Re-export commonly used types at the crate root for convenience.
pub use cartridge::{Cartridge, LoadPlan, LoadedBank};
pub use config::LoaderConfig;
pub use error::{LoadError, UnsupportedMapper};
pub use header::{InesHeader, is_ines};
pub use mapper::{BankMapping, BankSource, MapperClass, resolve};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;

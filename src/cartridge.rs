/*!
Cartridge load pipeline.

Sniff -> parse header -> validate (and optionally repair) -> lay out the CPU
address space -> resolve the boot-time bank plan -> load every bank -> build
the memory image and read the vectors.

Fatal errors (`LoadError`) return no partial result. A corrupt header and an
unsupported mapper are recorded on the returned `Cartridge` and logged; an
unsupported mapper leaves the bank plan empty and the ROM window unpopulated.
*/

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::LoaderConfig;
use crate::error::{LoadError, Result, UnsupportedMapper};
use crate::header::{HEADER_SIZE, InesHeader, is_ines};
use crate::image::{MemoryImage, Vectors};
use crate::layout::{self, MemoryRegion, TRAINER_SIZE, TRAINER_START};
use crate::loader::BankLoader;
use crate::mapper::{self, BankMapping, BankSource};
use crate::validate;

/// A resolved bank together with the file range that backs it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoadedBank {
    pub mapping: BankMapping,
    pub file_offset: u32,
    #[serde(skip)]
    pub data: Vec<u8>,
}

pub struct Cartridge {
    raw_header: InesHeader,
    header: InesHeader,
    header_was_corrupt: bool,
    regions: Vec<MemoryRegion>,
    banks: Vec<LoadedBank>,
    trainer: Option<Vec<u8>>,
    unsupported_mapper: Option<UnsupportedMapper>,
    image: MemoryImage,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("header", &self.header)
            .field("header_was_corrupt", &self.header_was_corrupt)
            .field("regions", &self.regions.len())
            .field("banks", &self.banks.len())
            .field("trainer", &self.trainer.is_some())
            .field("unsupported_mapper", &self.unsupported_mapper)
            .finish()
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Load from raw iNES bytes.
    pub fn from_ines_bytes(data: &[u8], config: &LoaderConfig) -> Result<Self> {
        if !is_ines(data) {
            if data.len() < HEADER_SIZE {
                return Err(LoadError::TruncatedInput {
                    needed: HEADER_SIZE,
                    found: data.len(),
                });
            }
            return Err(LoadError::NotInes);
        }

        let raw_header = InesHeader::parse(data)?;
        let header_was_corrupt = validate::is_corrupt(&raw_header);
        let header = if header_was_corrupt && config.repair_header {
            let fixed = validate::repair(&raw_header);
            warn!(
                "the iNES header seems to be corrupt; using repaired header (mapper {} -> {})",
                raw_header.mapper_id(),
                fixed.mapper_id()
            );
            fixed
        } else {
            if header_was_corrupt {
                warn!("the iNES header seems to be corrupt; results may be inaccurate");
            }
            raw_header
        };

        let regions = layout::regions(header.has_trainer());
        for r in &regions {
            info!(
                "creating {} segment {:04x}-{:05x} ({:?})",
                r.name,
                r.start,
                r.end(),
                r.kind
            );
        }

        let loader = BankLoader::new(data, &header);
        let mut image = MemoryImage::new();

        let trainer = if header.has_trainer() && config.load_trainer {
            warn!(
                "image has a trainer; assuming it is mapped to {:04x}-{:04x}",
                TRAINER_START,
                TRAINER_START as u32 + TRAINER_SIZE
            );
            loader.trainer()?.map(|t| {
                image.apply_trainer(t);
                t.to_vec()
            })
        } else {
            None
        };

        let (plan, unsupported_mapper) = match mapper::resolve(
            header.mapper_id(),
            header.prg_pages_16k(),
            header.chr_pages_8k(),
        ) {
            Ok(plan) => (plan, None),
            Err(unsupported) => {
                warn!("{unsupported}; no PRG-ROM banks will be mapped (corrupt ROM image?)");
                (Vec::new(), Some(unsupported))
            }
        };

        let mut banks = Vec::with_capacity(plan.len());
        for mapping in plan {
            if mapping.source == BankSource::Chr && !config.map_chr {
                continue;
            }
            let (Some(file_offset), Some(bytes)) =
                (loader.file_offset(&mapping), loader.load(&mapping)?)
            else {
                debug!("skipping {:?} mapping at {:04x}: page 0", mapping.source, mapping.dest);
                continue;
            };
            info!(
                "mapping {} page {:02} to {:04x}-{:05x} (file offset {:08x})",
                match mapping.source {
                    BankSource::Prg => "PRG-ROM",
                    BankSource::Chr => "CHR-ROM",
                },
                mapping.page,
                mapping.dest,
                mapping.dest_end(),
                file_offset
            );
            image.apply(&mapping, bytes);
            banks.push(LoadedBank {
                mapping,
                file_offset,
                data: bytes.to_vec(),
            });
        }

        Ok(Self {
            raw_header,
            header,
            header_was_corrupt,
            regions,
            banks,
            trainer,
            unsupported_mapper,
            image,
        })
    }

    /// Load from an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|err| LoadError::io(err, format!("failed to read rom {path:?}")))?;
        Self::from_ines_bytes(&bytes, config)
    }

    // -------------- Accessors --------------

    /// Header used for the load (repaired when configured and needed).
    pub fn header(&self) -> &InesHeader {
        &self.header
    }

    /// Header exactly as found in the file.
    pub fn raw_header(&self) -> &InesHeader {
        &self.raw_header
    }

    pub fn header_was_corrupt(&self) -> bool {
        self.header_was_corrupt
    }

    pub fn header_was_repaired(&self) -> bool {
        self.header != self.raw_header
    }

    pub fn mapper_id(&self) -> u8 {
        self.header.mapper_id()
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    pub fn banks(&self) -> &[LoadedBank] {
        &self.banks
    }

    pub fn trainer(&self) -> Option<&[u8]> {
        self.trainer.as_deref()
    }

    pub fn unsupported_mapper(&self) -> Option<UnsupportedMapper> {
        self.unsupported_mapper
    }

    pub fn image(&self) -> &MemoryImage {
        &self.image
    }

    pub fn vectors(&self) -> Option<Vectors> {
        self.image.vectors()
    }

    /// Serializable summary for downstream tools.
    pub fn plan(&self) -> LoadPlan {
        LoadPlan {
            mapper_id: self.mapper_id(),
            header_was_corrupt: self.header_was_corrupt,
            header: self.header.to_bytes(),
            regions: self.regions.clone(),
            banks: self.banks.clone(),
            unsupported_mapper: self.unsupported_mapper.map(|u| u.mapper_id()),
            vectors: self.vectors(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoadPlan {
    pub mapper_id: u8,
    pub header_was_corrupt: bool,
    pub header: [u8; HEADER_SIZE],
    pub regions: Vec<MemoryRegion>,
    pub banks: Vec<LoadedBank>,
    pub unsupported_mapper: Option<u8>,
    pub vectors: Option<Vectors>,
}

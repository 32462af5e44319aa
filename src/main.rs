use std::path::PathBuf;
use std::process::ExitCode;

use cartmap::describe::RomInfo;
use cartmap::{BankSource, Cartridge, LoaderConfig};
use clap::Parser;
use log::error;

/// Show how an iNES ROM is mapped into the NES address space at power-on.
#[derive(Parser, Debug)]
#[command(name = "cartmap", version)]
struct Args {
    /// The .nes file to inspect
    rom: PathBuf,
    /// TOML file with loader options
    #[arg(long)]
    config: Option<PathBuf>,
    /// Repair a corrupt header before resolving banks
    #[arg(long)]
    repair: bool,
    /// Leave the CHR page out of the plan
    #[arg(long)]
    no_chr: bool,
    /// Print the load plan as TOML instead of a report
    #[arg(long)]
    plan: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = match &args.config {
        Some(path) => match LoaderConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => LoaderConfig::default(),
    };
    if args.repair {
        config = config.with_repair_header(true);
    }
    if args.no_chr {
        config = config.with_map_chr(false);
    }

    let cart = match Cartridge::from_ines_file(&args.rom, &config) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if args.plan {
        match toml::to_string(&cart.plan()) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                error!("failed to serialize plan: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("File Name   : {}", args.rom.display());
    println!("Format      : Nintendo Entertainment System ROM");
    println!();
    println!("{}", RomInfo::new(cart.header()));
    if cart.header_was_repaired() {
        println!("(header repaired in memory; the file is unchanged)");
    }

    println!();
    println!("Segments:");
    for r in cart.regions() {
        println!(
            "  {:<8} {:04X}-{:05X} {:?}",
            r.name,
            r.start,
            r.end(),
            r.kind
        );
    }

    println!();
    println!("Banks:");
    if let Some(unsupported) = cart.unsupported_mapper() {
        println!("  none ({unsupported})");
    }
    for b in cart.banks() {
        let m = &b.mapping;
        let (medium, space) = match m.source {
            BankSource::Prg => ("PRG", "CPU"),
            BankSource::Chr => ("CHR", "PPU"),
        };
        println!(
            "  {medium} page {:02} ({:>5} bytes) -> {space} {:04X}-{:05X}  file offset {:08X}",
            m.page,
            m.page_size,
            m.dest,
            m.dest_end(),
            b.file_offset
        );
    }

    println!();
    match cart.vectors() {
        Some(v) => {
            println!("NMI_vector   : {:04X}", v.nmi);
            println!("RESET_vector : {:04X}", v.reset);
            println!("IRQ_vector   : {:04X}", v.irq);
        }
        None => println!("Vectors      : unavailable (ROM window not populated)"),
    }

    ExitCode::SUCCESS
}

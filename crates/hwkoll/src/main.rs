//! Implements the CLI for hwkoll

use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use eyre::Context;
use eyre::OptionExt;
use hwkoll::cli::Cli;
use hwkoll::cli::Commands;
use hwkoll::cli::Format;
use hwkoll::lookup;
use hwkoll::lookup::Row;
use hwkoll::probe;
use hwkoll::render;
use hwkoll_cpuid::NativeCpuid;
use hwkoll_ids::IdDatabase;
use hwkoll_ids::SharedDb;
use hwkoll_ids::pci::PciIdDb;
use hwkoll_ids::usb::UsbIdDb;
use hwkoll_types::PartitionType;
use hwkoll_types::PartitionTypeId;
use hwkoll_types::ProcessorInfo;
use proc_exit::Code;
use proc_exit::Exit;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> eyre::Result<Exit> {
    color_eyre::install()?;
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    let cli = Cli::parse();

    let mut out = BufWriter::new(std::io::stdout().lock());
    let code = run(&cli, &mut out)?;
    out.flush()?;
    Ok(Exit::new(code))
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> eyre::Result<Code> {
    match cli.command {
        Commands::Pci { query } => {
            let ids = load_pci(cli.pci_ids_path())?;
            let db = ids.get().wrap_err("Failed to parse pci.ids")?;
            report_rows(out, cli.format, lookup::pci(db, query))
        }
        Commands::Usb { query } => {
            let ids = load_usb(cli.usb_ids_path())?;
            let db = ids.get().wrap_err("Failed to parse usb.ids")?;
            report_rows(out, cli.format, lookup::usb(db, query))
        }
        Commands::Cpu => {
            let cpuid = NativeCpuid::new()
                .ok_or_eyre("CPUID is only available on x86 and x86-64 processors")?;
            render::processor(out, cli.format, &ProcessorInfo::from_cpuid(&cpuid))?;
            Ok(Code::SUCCESS)
        }
        Commands::PartitionType { ref id } => {
            let parsed = PartitionTypeId::from_lsblk(id).ok_or_else(|| {
                eyre::eyre!("{id:?} is neither a GUID nor a hexadecimal byte such as 0x83")
            })?;
            let partition_type = hwkoll_types::map_partition_type(parsed);
            render::partition_type(out, cli.format, partition_type)?;
            Ok(if partition_type == PartitionType::UNKNOWN {
                Code::FAILURE
            } else {
                Code::SUCCESS
            })
        }
        Commands::Devices => {
            let pci_ids = load_pci(cli.pci_ids_path())
                .inspect_err(|err| tracing::warn!("PCI device names unavailable: {err:#}"))
                .ok();
            let usb_ids = load_usb(cli.usb_ids_path())
                .inspect_err(|err| tracing::warn!("USB device names unavailable: {err:#}"))
                .ok();
            let pci_db = optional_db(pci_ids.as_ref(), "PCI device names unavailable");
            let usb_db = optional_db(usb_ids.as_ref(), "USB device names unavailable");
            let pci = hwkoll_ids::pci::load_pci_devices().wrap_err("Failed to list PCI devices")?;
            let usb = hwkoll_ids::usb::load_usb_devices().wrap_err("Failed to list USB devices")?;
            let report = render::DeviceReport::new(&pci, pci_db, &usb, usb_db);
            render::devices(out, cli.format, &report)?;
            Ok(Code::SUCCESS)
        }
        Commands::Snapshot => {
            let pci_ids = load_pci(cli.pci_ids_path())
                .inspect_err(|err| tracing::warn!("Video adapter names unavailable: {err:#}"))
                .ok();
            let pci_db = optional_db(pci_ids.as_ref(), "Video adapter names unavailable");
            let snapshot = probe::snapshot(&probe::Roots::default(), pci_db);
            render::snapshot(out, cli.format, &snapshot)?;
            Ok(Code::SUCCESS)
        }
    }
}

/// Print query results, a lookup miss is reported and exits with failure
fn report_rows<W: Write>(
    out: &mut W,
    format: Format,
    result: hwkoll_ids::Result<Vec<Row>>,
) -> eyre::Result<Code> {
    match result {
        Ok(rows) => {
            render::rows(out, format, &rows)?;
            Ok(Code::SUCCESS)
        }
        Err(err) if err.is_not_found() => {
            eprintln!("{err}");
            Ok(Code::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn read_ids(path: Option<PathBuf>, file: &str, flag: &str) -> eyre::Result<String> {
    let path = path.ok_or_else(|| {
        eyre::eyre!("Could not find {file}, pass its location with --{flag}")
    })?;
    tracing::debug!("Reading {}", path.display());
    std::fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

fn load_pci(path: Option<PathBuf>) -> eyre::Result<SharedDb<PciIdDb>> {
    Ok(SharedDb::new(read_ids(path, "pci.ids", "pci-ids")?))
}

fn load_usb(path: Option<PathBuf>) -> eyre::Result<SharedDb<UsbIdDb>> {
    Ok(SharedDb::new(read_ids(path, "usb.ids", "usb-ids")?))
}

/// Parse a database that only adds names, a failure is logged and skipped
fn optional_db<'a, D: IdDatabase>(ids: Option<&'a SharedDb<D>>, what: &str) -> Option<&'a D> {
    ids?.get()
        .inspect_err(|err| tracing::warn!("{what}: {err}"))
        .ok()
}

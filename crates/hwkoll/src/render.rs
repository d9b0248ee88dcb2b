//! Output in the formats the command line offers

use std::io::Write;

use hwkoll_ids::ClassLookup;
use hwkoll_ids::VendorLookup;
use hwkoll_ids::pci::PciDevice;
use hwkoll_ids::pci::PciIdDb;
use hwkoll_ids::usb::UsbDevice;
use hwkoll_ids::usb::UsbIdDb;
use hwkoll_types::HardwareSnapshot;
use hwkoll_types::MemoryInfo;
use hwkoll_types::PartitionType;
use hwkoll_types::ProcessorInfo;
use itertools::Itertools;

use crate::cli::Format;
use crate::lookup::Row;

/// Format a byte count with binary units, such as `15.7 GiB`
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(feature = "json")]
fn json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Result of a database query
pub fn rows<W: Write>(out: &mut W, format: Format, rows: &[Row]) -> eyre::Result<()> {
    match format {
        Format::Human => {
            for row in rows {
                writeln!(out, "{}  {}", row.id, row.name)?;
            }
        }
        #[cfg(feature = "json")]
        Format::Json => json(out, rows)?,
    }
    Ok(())
}

/// A partition type and the name it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionTypeReport {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub partition_type: PartitionType,
    pub name: Option<&'static str>,
}

impl From<PartitionType> for PartitionTypeReport {
    fn from(partition_type: PartitionType) -> Self {
        Self {
            partition_type,
            name: partition_type.name(),
        }
    }
}

pub fn partition_type<W: Write>(
    out: &mut W,
    format: Format,
    partition_type: PartitionType,
) -> eyre::Result<()> {
    match format {
        Format::Human => writeln!(out, "{partition_type}")?,
        #[cfg(feature = "json")]
        Format::Json => json(out, &PartitionTypeReport::from(partition_type))?,
    }
    Ok(())
}

fn write_processor<W: Write>(out: &mut W, info: &ProcessorInfo) -> std::io::Result<()> {
    writeln!(out, "Processor:  {}", info.name)?;
    writeln!(out, "  Vendor:   {} ({})", info.vendor(), info.cpuid_vendor)?;
    if info.logical_cores > 0 {
        writeln!(
            out,
            "  Cores:    {} package(s) x {} core(s), {} logical",
            info.packages, info.cores_per_package, info.logical_cores
        )?;
    }
    if info.speed_mhz > 0.0 {
        writeln!(out, "  Speed:    {:.0} MHz", info.speed_mhz)?;
    }
    let caches = [
        ("L1", info.l1_cache),
        ("L2", info.l2_cache),
        ("L3", info.l3_cache),
    ]
    .into_iter()
    .filter(|(_, size)| *size > 0)
    .map(|(level, size)| format!("{level} {}", human_bytes(u64::from(size))))
    .join(", ");
    if !caches.is_empty() {
        writeln!(out, "  Caches:   {caches}")?;
    }
    if let Some(hypervisor) = info.hypervisor_vendor() {
        writeln!(out, "  Hypervisor: {hypervisor}")?;
    } else if info.hypervisor {
        writeln!(out, "  Hypervisor: present")?;
    }
    if !info.features.is_empty() {
        writeln!(out, "  Features: {}", info.features.iter().join(" "))?;
    }
    Ok(())
}

fn write_memory<W: Write>(out: &mut W, info: &MemoryInfo) -> std::io::Result<()> {
    write!(out, "Memory:     {} usable", human_bytes(info.total))?;
    if info.total_physical > 0 {
        write!(
            out,
            ", {} installed, {} reserved",
            human_bytes(info.total_physical),
            human_bytes(info.reserved())
        )?;
    }
    writeln!(out)
}

/// Processor report from the `cpu` command
pub fn processor<W: Write>(out: &mut W, format: Format, info: &ProcessorInfo) -> eyre::Result<()> {
    match format {
        Format::Human => write_processor(out, info)?,
        #[cfg(feature = "json")]
        Format::Json => json(out, info)?,
    }
    Ok(())
}

/// Everything from the `snapshot` command
pub fn snapshot<W: Write>(
    out: &mut W,
    format: Format,
    snapshot: &HardwareSnapshot,
) -> eyre::Result<()> {
    match format {
        Format::Human => write_snapshot(out, snapshot)?,
        #[cfg(feature = "json")]
        Format::Json => json(out, snapshot)?,
    }
    Ok(())
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &HardwareSnapshot) -> std::io::Result<()> {
    if let Some(ref info) = snapshot.processor {
        write_processor(out, info)?;
    }
    if let Some(ref info) = snapshot.memory {
        write_memory(out, info)?;
    }
    for disk in &snapshot.disks {
        writeln!(
            out,
            "Disk {}:     {} {} ({}), {} partition(s)",
            disk.number,
            disk.name,
            human_bytes(disk.size),
            disk.table_type,
            disk.partition_count()
        )?;
        for part in &disk.partitions {
            writeln!(
                out,
                "  {:>3}  {:>10}  at {:<10}  {}{}",
                part.number,
                human_bytes(part.size),
                part.offset,
                part.partition_type,
                if part.bootable { "  [boot]" } else { "" }
            )?;
        }
    }
    for video in &snapshot.video {
        writeln!(
            out,
            "Video:      {} [{:04x}:{:04x}]",
            video.name, video.vendor_id, video.model_id
        )?;
    }
    Ok(())
}

/// A device with the names resolved from the ID database
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Named<'a, D> {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub device: &'a D,
    pub names: VendorLookup<&'a str>,
    pub classes: ClassLookup<&'a str>,
}

/// Devices found on the buses, for the `devices` command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeviceReport<'a> {
    pub pci: Vec<Named<'a, PciDevice>>,
    pub usb: Vec<Named<'a, UsbDevice>>,
}

impl<'a> DeviceReport<'a> {
    /// Resolve names, devices are kept without names if there is no database
    pub fn new(
        pci: &'a [PciDevice],
        pci_db: Option<&'a PciIdDb>,
        usb: &'a [UsbDevice],
        usb_db: Option<&'a UsbIdDb>,
    ) -> Self {
        Self {
            pci: pci
                .iter()
                .map(|device| Named {
                    device,
                    names: pci_db.map(|db| device.vendor_names(db)).unwrap_or_default(),
                    classes: pci_db.map(|db| device.class_names(db)).unwrap_or_default(),
                })
                .collect(),
            usb: usb
                .iter()
                .map(|device| Named {
                    device,
                    names: usb_db.map(|db| device.vendor_names(db)).unwrap_or_default(),
                    classes: usb_db.map(|db| device.class_names(db)).unwrap_or_default(),
                })
                .collect(),
        }
    }
}

fn name_or_unknown(name: Option<&str>) -> &str {
    name.unwrap_or("Unknown")
}

pub fn devices<W: Write>(
    out: &mut W,
    format: Format,
    report: &DeviceReport<'_>,
) -> eyre::Result<()> {
    match format {
        Format::Human => {
            for dev in &report.pci {
                writeln!(
                    out,
                    "{} {:04x}:{:04x} {}: {} {}",
                    dev.device.address,
                    dev.device.vendor,
                    dev.device.device,
                    name_or_unknown(dev.classes.subclass.or(dev.classes.class)),
                    name_or_unknown(dev.names.vendor),
                    name_or_unknown(dev.names.device),
                )?;
            }
            for dev in &report.usb {
                writeln!(
                    out,
                    "usb {} {:04x}:{:04x} {} {}",
                    dev.device.address,
                    dev.device.vendor,
                    dev.device.product,
                    name_or_unknown(dev.names.vendor),
                    name_or_unknown(dev.names.device),
                )?;
            }
        }
        #[cfg(feature = "json")]
        Format::Json => json(out, report)?,
    }
    Ok(())
}

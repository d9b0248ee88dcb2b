//! Collect hardware information on Linux from procfs, sysfs and `lsblk`

use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use compact_str::CompactString;
use eyre::Context;
use eyre::OptionExt;
use hwkoll_cpuid::NativeCpuid;
use hwkoll_ids::pci::PciDevice;
use hwkoll_ids::pci::PciIdDb;
use hwkoll_types::DiskInfo;
use hwkoll_types::HardwareSnapshot;
use hwkoll_types::MemoryInfo;
use hwkoll_types::PartitionInfo;
use hwkoll_types::PartitionTableType;
use hwkoll_types::PartitionType;
use hwkoll_types::PartitionTypeId;
use hwkoll_types::ProcessorInfo;
use hwkoll_types::VideoInfo;
use hwkoll_types::map_partition_type;

/// Sizes in sysfs block attributes are in units of 512 bytes
const SECTOR_SIZE: u64 = 512;

/// PCI base class of display controllers
const DISPLAY_CLASS: u8 = 0x03;

/// Where procfs and sysfs are mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub proc: PathBuf,
    pub sys: PathBuf,
}

impl Default for Roots {
    fn default() -> Self {
        Self {
            proc: PathBuf::from("/proc"),
            sys: PathBuf::from("/sys"),
        }
    }
}

fn read(path: &Path) -> eyre::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_number(path: &Path) -> eyre::Result<u64> {
    let text = read(path)?;
    text.trim()
        .parse()
        .with_context(|| format!("Invalid number {:?} in {}", text.trim(), path.display()))
}

/// Processor information from CPUID (on x86), `/proc/cpuinfo` and the
/// cache directories of the first CPU
pub fn processor(roots: &Roots) -> eyre::Result<ProcessorInfo> {
    let mut info = match NativeCpuid::new() {
        Some(cpuid) => ProcessorInfo::from_cpuid(&cpuid),
        None => ProcessorInfo::default(),
    };
    apply_cpuinfo(&mut info, &read(&roots.proc.join("cpuinfo"))?);

    let cache = roots.sys.join("devices/system/cpu/cpu0/cache");
    info.l1_cache = cache_size(&cache.join("index1/size")).unwrap_or(0);
    info.l2_cache = cache_size(&cache.join("index2/size")).unwrap_or(0);
    info.l3_cache = cache_size(&cache.join("index3/size")).unwrap_or(0);
    Ok(info)
}

/// Fill in what `/proc/cpuinfo` says
///
/// Values CPUID already provided (name and vendor) are kept.
pub(crate) fn apply_cpuinfo(info: &mut ProcessorInfo, cpuinfo: &str) {
    let mut arm_implementer = None;
    let mut arm_part = None;
    for line in cpuinfo.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "processor" => {
                if let Ok(index) = value.parse::<u32>() {
                    info.logical_cores = info.logical_cores.max(index.saturating_add(1));
                }
            }
            "physical id" => {
                if let Ok(index) = value.parse::<u32>() {
                    info.packages = info.packages.max(index.saturating_add(1));
                }
            }
            "cpu cores" => {
                if let Ok(cores) = value.parse() {
                    info.cores_per_package = cores;
                }
            }
            "cpu MHz" => {
                if let Ok(mhz) = value.parse::<f64>() {
                    info.speed_mhz = info.speed_mhz.max(mhz);
                }
            }
            "model name" if info.name.is_empty() => info.name = value.into(),
            "vendor_id" if info.cpuid_vendor.is_empty() => info.cpuid_vendor = value.into(),
            "CPU implementer" => {
                arm_implementer = hwkoll_cpuid::arm::parse_cpuinfo_hex(value)
                    .and_then(|id| u8::try_from(id).ok());
            }
            "CPU part" => arm_part = hwkoll_cpuid::arm::parse_cpuinfo_hex(value),
            _ => (),
        }
    }

    if let Some(implementer) = arm_implementer {
        let vendor = hwkoll_cpuid::arm::implementer_name(implementer).unwrap_or("Unknown");
        if info.cpuid_vendor.is_empty() {
            info.cpuid_vendor = vendor.into();
        }
        if info.name.is_empty() {
            let part = arm_part.and_then(|part| hwkoll_cpuid::arm::part_name(implementer, part));
            info.name = match part {
                Some(part) => compact_str::format_compact!("{vendor} {part}"),
                None => compact_str::format_compact!("{vendor} Processor"),
            };
        }
    }
    // ARM kernels do not list packages
    if info.packages == 0 && info.logical_cores > 0 {
        info.packages = 1;
        info.cores_per_package = info.logical_cores;
    }
}

/// Parse a cache size file such as `32K`
fn cache_size(path: &Path) -> Option<u32> {
    let text = std::fs::read_to_string(path).ok()?;
    parse_cache_size(text.trim())
}

pub(crate) fn parse_cache_size(text: &str) -> Option<u32> {
    let (digits, multiplier) = match text.as_bytes().last()? {
        b'K' => (&text[..text.len() - 1], 1024),
        b'M' => (&text[..text.len() - 1], 1024 * 1024),
        _ => (text, 1),
    };
    digits.parse::<u32>().ok()?.checked_mul(multiplier)
}

/// Total memory from `/proc/meminfo` and installed memory from the online
/// memory blocks in sysfs
pub fn memory(roots: &Roots) -> eyre::Result<MemoryInfo> {
    let total = parse_meminfo(&read(&roots.proc.join("meminfo"))?)
        .ok_or_eyre("No MemTotal in meminfo")?;
    let total_physical = match physical_memory(&roots.sys.join("devices/system/memory")) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!("Failed to read memory blocks, installed memory unknown: {err:#}");
            0
        }
    };
    Ok(MemoryInfo {
        total,
        total_physical,
    })
}

/// `MemTotal` in bytes
pub(crate) fn parse_meminfo(meminfo: &str) -> Option<u64> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let kib: u64 = line
        .trim_start_matches("MemTotal:")
        .trim()
        .trim_end_matches("kB")
        .trim()
        .parse()
        .ok()?;
    kib.checked_mul(1024)
}

/// Sum of the online memory blocks
pub(crate) fn physical_memory(dir: &Path) -> eyre::Result<u64> {
    let block_size_path = dir.join("block_size_bytes");
    let block_size_text = read(&block_size_path)?;
    let block_size = u64::from_str_radix(block_size_text.trim(), 16).with_context(|| {
        format!(
            "Invalid block size {:?} in {}",
            block_size_text.trim(),
            block_size_path.display()
        )
    })?;
    let mut online = 0;
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?
    {
        let entry = entry?;
        let is_block = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with("memory"));
        if is_block && read_number(&entry.path().join("online"))? == 1 {
            online += 1;
        }
    }
    Ok(online * block_size)
}

/// The `PARTTYPE` and `PTTYPE` columns of `lsblk` for a partition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionColumns {
    pub part_type: String,
    pub table_type: String,
}

/// Ask `lsblk` about a partition device such as `sda1`
pub fn lsblk(partition: &str) -> eyre::Result<PartitionColumns> {
    let column = |name: &str| -> eyre::Result<String> {
        let output = Command::new("lsblk")
            .args(["-n", "-o", name, &format!("/dev/{partition}")])
            .output()
            .wrap_err("Failed to run lsblk")?;
        if !output.status.success() {
            eyre::bail!(
                "lsblk failed for {partition}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        // Holders (LVM, dm-crypt) are listed below the partition itself
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned())
    };
    Ok(PartitionColumns {
        part_type: column("PARTTYPE")?,
        table_type: column("PTTYPE")?,
    })
}

/// Fixed disks from `/sys/block` with their partitions
///
/// `columns` provides partition and table types, normally [`lsblk`].
/// Removable and empty devices are skipped. A partition is bootable if it is
/// an EFI system partition.
pub fn disks<F>(roots: &Roots, columns: F) -> eyre::Result<Vec<DiskInfo>>
where
    F: Fn(&str) -> eyre::Result<PartitionColumns>,
{
    let block = roots.sys.join("block");
    let mut devices = std::fs::read_dir(&block)
        .with_context(|| format!("Failed to list {}", block.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    devices.sort();

    let mut disks = vec![];
    for device in devices {
        if read_number(&device.join("removable"))? != 0 {
            continue;
        }
        let size = read_number(&device.join("size"))? * SECTOR_SIZE;
        if size == 0 {
            continue;
        }
        let name: CompactString = device
            .file_name()
            .map(|n| n.to_string_lossy().as_ref().into())
            .unwrap_or_default();
        let (table_type, partitions) = partitions(&device, &columns)?;
        disks.push(DiskInfo {
            name,
            number: u32::try_from(disks.len())?,
            size,
            table_type,
            partitions,
        });
    }
    Ok(disks)
}

fn partitions<F>(
    device: &Path,
    columns: &F,
) -> eyre::Result<(PartitionTableType, Vec<PartitionInfo>)>
where
    F: Fn(&str) -> eyre::Result<PartitionColumns>,
{
    let mut table_type = PartitionTableType::Unknown;
    let mut partitions = vec![];
    for entry in std::fs::read_dir(device)? {
        let path = entry?.path();
        if !path.join("partition").is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let found = columns(name)?;
        let partition_type = PartitionTypeId::from_lsblk(&found.part_type)
            .map_or(PartitionType::UNKNOWN, map_partition_type);
        table_type = PartitionTableType::from_lsblk(&found.table_type);
        partitions.push(PartitionInfo {
            number: u32::try_from(read_number(&path.join("partition"))?)?,
            size: read_number(&path.join("size"))? * SECTOR_SIZE,
            offset: read_number(&path.join("start"))? * SECTOR_SIZE,
            partition_type,
            bootable: partition_type == PartitionType::EFI_SYSTEM,
        });
    }
    partitions.sort_by_key(|p| p.number);
    Ok((table_type, partitions))
}

/// Display controllers among the PCI devices
pub fn video(devices: &[PciDevice], db: Option<&PciIdDb>) -> Vec<VideoInfo> {
    devices
        .iter()
        .filter(|dev| dev.class_triple().0 == DISPLAY_CLASS)
        .map(|dev| {
            let names = db.map(|db| dev.vendor_names(db)).unwrap_or_default();
            let name = match (names.vendor, names.device) {
                (Some(vendor), Some(device)) => compact_str::format_compact!("{vendor} {device}"),
                (_, Some(device)) => device.into(),
                _ => compact_str::format_compact!("{:04x}:{:04x}", dev.vendor, dev.device),
            };
            VideoInfo {
                name,
                vendor_id: u32::from(dev.vendor),
                model_id: u32::from(dev.device),
            }
        })
        .collect()
}

/// Probe everything, parts that fail are logged and left out
pub fn snapshot(roots: &Roots, db: Option<&PciIdDb>) -> HardwareSnapshot {
    let processor = processor(roots)
        .inspect_err(|err| tracing::warn!("Failed to probe processor: {err:#}"))
        .ok();
    let memory = memory(roots)
        .inspect_err(|err| tracing::warn!("Failed to probe memory: {err:#}"))
        .ok();
    let disks = disks(roots, lsblk)
        .inspect_err(|err| tracing::warn!("Failed to probe disks: {err:#}"))
        .unwrap_or_default();
    let video = match hwkoll_ids::pci::load_pci_devices_from(&roots.sys.join("bus/pci/devices")) {
        Ok(devices) => video(&devices, db),
        Err(err) => {
            tracing::warn!("Failed to probe video adapters: {err}");
            vec![]
        }
    };
    HardwareSnapshot {
        processor,
        memory,
        disks,
        video,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_cpuinfo_x86() {
        let cpuinfo = indoc! {"
            processor\t: 0
            vendor_id\t: GenuineIntel
            model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz
            cpu MHz\t\t: 1800.000
            physical id\t: 0
            cpu cores\t: 4

            processor\t: 1
            vendor_id\t: GenuineIntel
            model name\t: Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz
            cpu MHz\t\t: 3400.000
            physical id\t: 0
            cpu cores\t: 4
        "};
        let mut info = ProcessorInfo::default();
        apply_cpuinfo(&mut info, cpuinfo);
        assert_eq!(info.name, "Intel(R) Core(TM) i5-8250U CPU @ 1.60GHz");
        assert_eq!(info.cpuid_vendor, "GenuineIntel");
        assert_eq!(info.vendor(), "Intel");
        assert_eq!(info.logical_cores, 2);
        assert_eq!(info.packages, 1);
        assert_eq!(info.cores_per_package, 4);
        assert_eq!(info.speed_mhz, 3400.0);
    }

    #[test]
    fn test_cpuinfo_keeps_cpuid_values() {
        let mut info = ProcessorInfo {
            name: "From CPUID".into(),
            ..Default::default()
        };
        apply_cpuinfo(&mut info, "model name\t: From cpuinfo\n");
        assert_eq!(info.name, "From CPUID");
    }

    #[test]
    fn test_cpuinfo_arm() {
        let cpuinfo = indoc! {"
            processor\t: 0
            BogoMIPS\t: 108.00
            CPU implementer\t: 0x41
            CPU part\t: 0xd08

            processor\t: 3
            CPU implementer\t: 0x41
            CPU part\t: 0xd08
        "};
        let mut info = ProcessorInfo::default();
        apply_cpuinfo(&mut info, cpuinfo);
        assert_eq!(info.cpuid_vendor, "ARM");
        assert_eq!(info.name, "ARM Cortex-A72");
        assert_eq!(info.vendor(), "ARM");
        assert_eq!(info.logical_cores, 4);
        assert_eq!(info.packages, 1);
        assert_eq!(info.cores_per_package, 4);
    }

    #[test]
    fn test_cpuinfo_huge_index() {
        let cpuinfo = indoc! {"
            processor\t: 4294967295
            physical id\t: 4294967295
        "};
        let mut info = ProcessorInfo::default();
        apply_cpuinfo(&mut info, cpuinfo);
        assert_eq!(info.logical_cores, u32::MAX);
        assert_eq!(info.packages, u32::MAX);
    }

    #[test]
    fn test_parse_cache_size() {
        assert_eq!(parse_cache_size("32K"), Some(32 * 1024));
        assert_eq!(parse_cache_size("8M"), Some(8 * 1024 * 1024));
        assert_eq!(parse_cache_size("512"), Some(512));
        assert_eq!(parse_cache_size(""), None);
        assert_eq!(parse_cache_size("K"), None);
    }

    #[test]
    fn test_memory() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots {
            proc: dir.path().join("proc"),
            sys: dir.path().join("sys"),
        };
        write(
            &roots.proc.join("meminfo"),
            indoc! {"
                MemTotal:       16514092 kB
                MemFree:         1234567 kB
            "},
        );
        let memory_dir = roots.sys.join("devices/system/memory");
        write(&memory_dir.join("block_size_bytes"), "8000000\n");
        for (block, online) in [("memory0", "1"), ("memory1", "1"), ("memory2", "0")] {
            write(&memory_dir.join(block).join("online"), online);
        }
        std::fs::create_dir_all(memory_dir.join("power")).unwrap();

        let info = memory(&roots).unwrap();
        assert_eq!(info.total, 16514092 * 1024);
        assert_eq!(info.total_physical, 2 * 0x800_0000);
    }

    #[test]
    fn test_meminfo_without_total() {
        assert_eq!(parse_meminfo("MemFree: 12 kB\n"), None);
    }

    #[test]
    fn test_disks() {
        let dir = tempfile::tempdir().unwrap();
        let roots = Roots {
            proc: dir.path().join("proc"),
            sys: dir.path().join("sys"),
        };
        let sda = roots.sys.join("block/sda");
        write(&sda.join("removable"), "0\n");
        write(&sda.join("size"), "500118192\n");
        for (name, number, start, size) in [
            ("sda2", "2", "1050624", "499065856"),
            ("sda1", "1", "2048", "1048576"),
        ] {
            write(&sda.join(name).join("partition"), number);
            write(&sda.join(name).join("start"), start);
            write(&sda.join(name).join("size"), size);
        }
        let sr0 = roots.sys.join("block/sr0");
        write(&sr0.join("removable"), "1\n");
        write(&sr0.join("size"), "2097151\n");
        let loop0 = roots.sys.join("block/loop0");
        write(&loop0.join("removable"), "0\n");
        write(&loop0.join("size"), "0\n");

        let columns = |name: &str| -> eyre::Result<PartitionColumns> {
            Ok(PartitionColumns {
                part_type: match name {
                    "sda1" => "c12a7328-f81f-11d2-ba4b-00a0c93ec93b".into(),
                    _ => "0fc63daf-8483-4772-8e79-3d69d8477de4".into(),
                },
                table_type: "gpt".into(),
            })
        };
        let disks = disks(&roots, columns).unwrap();
        assert_eq!(disks.len(), 1);
        let disk = &disks[0];
        assert_eq!(disk.name, "sda");
        assert_eq!(disk.size, 500118192 * 512);
        assert_eq!(disk.table_type, PartitionTableType::Gpt);
        assert_eq!(
            disk.partitions,
            vec![
                PartitionInfo {
                    number: 1,
                    size: 1048576 * 512,
                    offset: 2048 * 512,
                    partition_type: PartitionType::EFI_SYSTEM,
                    bootable: true,
                },
                PartitionInfo {
                    number: 2,
                    size: 499065856 * 512,
                    offset: 1050624 * 512,
                    partition_type: PartitionType::LINUX,
                    bootable: false,
                },
            ]
        );
    }

    #[test]
    fn test_video() {
        let db = PciIdDb::parse(indoc! {"
            1234  Technical Corp.
            \t1111  Bochs/QEMU Standard VGA
            C 00  Unclassified device
        "})
        .unwrap();
        let device = |class, vendor, device| PciDevice {
            address: "0000:00:02.0".into(),
            class,
            vendor,
            device,
            revision: 2,
            subsystem_vendor: 0x1af4,
            subsystem_device: 0x1100,
        };
        let devices = [
            device(0x03_00_00, 0x1234, 0x1111),
            device(0x06_00_00, 0x8086, 0x1237),
            device(0x03_80_00, 0x10de, 0x2204),
        ];
        let found = video(&devices, Some(&db));
        assert_eq!(
            found,
            vec![
                VideoInfo {
                    name: "Technical Corp. Bochs/QEMU Standard VGA".into(),
                    vendor_id: 0x1234,
                    model_id: 0x1111,
                },
                VideoInfo {
                    name: "10de:2204".into(),
                    vendor_id: 0x10de,
                    model_id: 0x2204,
                },
            ]
        );
    }
}

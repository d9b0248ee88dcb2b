//! Memory, disk and video descriptions

use compact_str::CompactString;

use crate::PartitionTableType;
use crate::PartitionType;

/// Amount of memory in the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MemoryInfo {
    /// Memory usable by the OS, in bytes
    pub total: u64,
    /// Memory installed in the machine, in bytes (0 if not known)
    pub total_physical: u64,
}

impl MemoryInfo {
    /// Memory held back by firmware and the kernel
    ///
    /// Zero when the installed amount is not known.
    #[must_use]
    pub const fn reserved(&self) -> u64 {
        self.total_physical.saturating_sub(self.total)
    }
}

/// A fixed disk and its partitions
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiskInfo {
    /// Device name, such as `sda` or `nvme0n1`
    pub name: CompactString,
    pub number: u32,
    /// Size in bytes
    pub size: u64,
    pub table_type: PartitionTableType,
    /// Partitions in table order
    pub partitions: Vec<PartitionInfo>,
}

impl DiskInfo {
    #[must_use]
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartitionInfo {
    /// 1-based partition number
    pub number: u32,
    /// Size in bytes
    pub size: u64,
    /// Start of the partition in bytes from the start of the disk
    pub offset: u64,
    pub partition_type: PartitionType,
    pub bootable: bool,
}

/// A display adapter
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VideoInfo {
    pub name: CompactString,
    pub vendor_id: u32,
    pub model_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reserved_memory() {
        let memory = MemoryInfo {
            total_physical: 17179869184,
            total: 16911433728,
        };
        assert_eq!(memory.reserved(), 268435456);

        let unknown = MemoryInfo {
            total_physical: 0,
            total: 16911433728,
        };
        assert_eq!(unknown.reserved(), 0);
    }

    #[test]
    fn test_partition_count() {
        let partition = PartitionInfo {
            number: 1,
            size: 512 * 1024 * 1024,
            offset: 1024 * 1024,
            partition_type: PartitionType::EFI_SYSTEM,
            bootable: true,
        };
        let disk = DiskInfo {
            name: "sda".into(),
            number: 0,
            size: 256_060_514_304,
            table_type: PartitionTableType::Gpt,
            partitions: vec![
                partition,
                PartitionInfo {
                    number: 2,
                    offset: partition.offset + partition.size,
                    partition_type: PartitionType::LINUX,
                    bootable: false,
                    ..partition
                },
            ],
        };
        assert_eq!(disk.partition_count(), 2);
    }
}

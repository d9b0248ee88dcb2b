//! Types describing the hardware of a machine
//!
//! A [`HardwareSnapshot`] is produced fresh by each probe. Nothing here reads
//! from the system, collectors live in the command line front end.

mod parts;
mod partition;
mod processor;

pub use partition::PartitionTableType;
pub use partition::PartitionType;
pub use partition::PartitionTypeId;
pub use partition::map_partition_type;
pub use parts::DiskInfo;
pub use parts::MemoryInfo;
pub use parts::PartitionInfo;
pub use parts::VideoInfo;
pub use processor::ProcessorInfo;

/// Everything that was found out about a machine
///
/// Parts that could not be probed are `None` or empty.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HardwareSnapshot {
    pub processor: Option<ProcessorInfo>,
    pub memory: Option<MemoryInfo>,
    pub disks: Vec<DiskInfo>,
    pub video: Vec<VideoInfo>,
}

//! Decoding of x86 CPUID results into feature flags
//!
//! The decoder never executes CPUID itself. It asks a [`CpuidSource`] for the
//! registers of each (leaf, sub-leaf) pair, which keeps it independent of the
//! host and lets tests feed it canned register dumps. [`NativeCpuid`] is the
//! source backed by the actual instruction.
//!
//! Leaves beyond the maximum the CPU reports are skipped, never queried.

pub mod arm;

mod decode;
mod source;
mod tables;
mod vendor;

pub use decode::decode_features;
pub use decode::hypervisor_signature;
pub use source::CpuidSource;
pub use source::EXTENDED_BASE;
pub use source::HYPERVISOR_LEAF;
pub use source::NativeCpuid;
pub use source::Register;
pub use source::Registers;
pub use tables::LAYOUTS;
pub use tables::LeafLayout;
pub use vendor::cpu_vendor_name;
pub use vendor::hypervisor_vendor_name;

//! Parsing and querying of the `pci.ids` and `usb.ids` hardware databases
//!
//! Both files are maintained by the pci-ids and linux-usb projects and ship
//! with most Linux distributions (usually in `/usr/share/hwdata`). They map
//! numeric vendor, device and class IDs to human readable names.
//!
//! The databases are parsed once into immutable trees. Lookups never mutate
//! and either return the entry or a [`NotFound`] error describing which level
//! of the hierarchy failed.
//!
//! Reading the devices that are currently attached (from `/sys`) is Linux only
//! and works without root access.

pub mod pci;
pub mod usb;

mod error;
mod lookup;
mod parser;
mod shared;
mod sysfs;
mod tree;

pub use error::EntryKind;
pub use error::Error;
pub use error::NotFound;
pub use error::ParseError;
pub use lookup::ClassLookup;
pub use lookup::VendorLookup;
pub use shared::IdDatabase;
pub use shared::SharedDb;
pub use sysfs::SysfsError;
pub use tree::Branch;
pub use tree::Entry;
pub use tree::Groups;
pub use tree::Identified;
pub use tree::Leaf;
pub use tree::Root;
pub use tree::SubEntry;
pub use tree::SubsystemId;
pub use tree::Table;
pub use tree::Tree;

/// Result type used by all lookups and parsers in this crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

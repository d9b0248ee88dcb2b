//! Utilities similar to pciutils to look up PCI IDs and read PCI devices on
//! Linux

use std::path::Path;

use crate::ClassLookup;
use crate::EntryKind;
use crate::IdDatabase;
use crate::Result;
use crate::SysfsError;
use crate::VendorLookup;
use crate::parser;
use crate::parser::TreeFormat;
use crate::sysfs;
use crate::tree::Branch;
use crate::tree::Leaf;
use crate::tree::Levels;
use crate::tree::Root;
use crate::tree::SubsystemId;
use crate::tree::Tree;

pub type Vendor = Root<u16, u16, SubsystemId>;
pub type Device = Branch<u16, u16, SubsystemId>;
pub type SubDevice = Leaf<SubsystemId>;
pub type Class = Root<u8, u8, u8>;
pub type Subclass = Branch<u8, u8, u8>;
pub type ProgrammingInterface = Leaf<u8>;

/// Sentinel that ends the vendor section and starts the class section
const CLASSES: &str = "C 00";

const VENDOR_LEVELS: Levels = Levels {
    root: EntryKind::Vendor,
    child: EntryKind::Device,
    leaf: EntryKind::SubDevice,
};

const CLASS_LEVELS: Levels = Levels {
    root: EntryKind::Class,
    child: EntryKind::Subclass,
    leaf: EntryKind::ProgrammingInterface,
};

const VENDOR_FORMAT: TreeFormat<u16, u16, SubsystemId> = TreeFormat {
    root: parser::vendor_line,
    child: parser::device_line,
    leaf: parser::subsystem_line,
    levels: VENDOR_LEVELS,
};

const CLASS_FORMAT: TreeFormat<u8, u8, u8> = TreeFormat {
    root: parser::class_line,
    child: parser::subclass_line,
    leaf: parser::interface_line,
    levels: CLASS_LEVELS,
};

/// A database of PCI device IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PciIdDb {
    vendors: Tree<u16, u16, SubsystemId>,
    classes: Tree<u8, u8, u8>,
}

impl IdDatabase for PciIdDb {
    fn parse(input: &str) -> Result<Self> {
        let lines = parser::significant_lines(input);
        let vendors = parser::build_tree(
            parser::section(&lines, None, Some(CLASSES)),
            &VENDOR_FORMAT,
        )?;
        let classes =
            parser::build_tree(parser::section(&lines, Some(CLASSES), None), &CLASS_FORMAT)?;
        let db = Self {
            vendors: Tree::new(vendors, VENDOR_LEVELS),
            classes: Tree::new(classes, CLASS_LEVELS),
        };
        tracing::debug!(
            vendors = db.vendors.len(),
            vendor_descendants = db.vendors.descendant_count(),
            classes = db.classes.len(),
            class_descendants = db.classes.descendant_count(),
            "Parsed pci.ids"
        );
        Ok(db)
    }
}

impl PciIdDb {
    /// Create from a string containing `pci.ids`
    pub fn parse(input: &str) -> Result<Self> {
        <Self as IdDatabase>::parse(input)
    }

    /// The vendor hierarchy as a generic tree
    pub fn vendors(&self) -> &Tree<u16, u16, SubsystemId> {
        &self.vendors
    }

    /// The class hierarchy as a generic tree
    pub fn classes(&self) -> &Tree<u8, u8, u8> {
        &self.classes
    }

    pub fn list_vendors(&self) -> &[Vendor] {
        self.vendors.roots()
    }

    pub fn get_vendor(&self, vendor: u16) -> Result<&Vendor> {
        self.vendors.root(vendor)
    }

    pub fn is_vendor_registered(&self, vendor: u16) -> bool {
        self.get_vendor(vendor).is_ok()
    }

    /// Devices of a vendor, possibly empty
    pub fn list_devices(&self, vendor: u16) -> Result<&[Device]> {
        self.vendors.children(vendor)
    }

    pub fn get_device(&self, vendor: u16, device: u16) -> Result<&Device> {
        self.vendors.child(vendor, device)
    }

    pub fn is_device_registered(&self, vendor: u16, device: u16) -> bool {
        self.get_device(vendor, device).is_ok()
    }

    pub fn list_sub_devices(&self, vendor: u16, device: u16) -> Result<&[SubDevice]> {
        self.vendors.leaves(vendor, device)
    }

    /// Look up a subsystem by the pair of subsystem vendor and subsystem
    /// device
    pub fn get_sub_device(
        &self,
        vendor: u16,
        device: u16,
        sub_vendor: u16,
        sub_device: u16,
    ) -> Result<&SubDevice> {
        self.vendors.leaf(
            vendor,
            device,
            SubsystemId {
                vendor: sub_vendor,
                device: sub_device,
            },
        )
    }

    pub fn is_sub_device_registered(
        &self,
        vendor: u16,
        device: u16,
        sub_vendor: u16,
        sub_device: u16,
    ) -> bool {
        self.get_sub_device(vendor, device, sub_vendor, sub_device)
            .is_ok()
    }

    pub fn list_classes(&self) -> &[Class] {
        self.classes.roots()
    }

    pub fn get_class(&self, class: u8) -> Result<&Class> {
        self.classes.root(class)
    }

    pub fn is_class_registered(&self, class: u8) -> bool {
        self.get_class(class).is_ok()
    }

    pub fn list_subclasses(&self, class: u8) -> Result<&[Subclass]> {
        self.classes.children(class)
    }

    pub fn get_subclass(&self, class: u8, subclass: u8) -> Result<&Subclass> {
        self.classes.child(class, subclass)
    }

    pub fn is_subclass_registered(&self, class: u8, subclass: u8) -> bool {
        self.get_subclass(class, subclass).is_ok()
    }

    pub fn list_programming_interfaces(
        &self,
        class: u8,
        subclass: u8,
    ) -> Result<&[ProgrammingInterface]> {
        self.classes.leaves(class, subclass)
    }

    pub fn get_programming_interface(
        &self,
        class: u8,
        subclass: u8,
        interface: u8,
    ) -> Result<&ProgrammingInterface> {
        self.classes.leaf(class, subclass, interface)
    }

    pub fn is_programming_interface_registered(
        &self,
        class: u8,
        subclass: u8,
        interface: u8,
    ) -> bool {
        self.get_programming_interface(class, subclass, interface)
            .is_ok()
    }
}

/// Data about a PCI device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PciDevice {
    /// Bus address (directory name in sysfs), e.g. `0000:00:02.0`
    pub address: String,
    /// Class code as `0xccsspp`
    pub class: u32,
    pub vendor: u16,
    pub device: u16,
    pub revision: u8,
    pub subsystem_vendor: u16,
    pub subsystem_device: u16,
}

impl PciDevice {
    /// Load data from a device directory in `/sys`
    fn from_directory(path: &Path) -> std::result::Result<Self, SysfsError> {
        Ok(Self {
            address: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            class: sysfs::read_hex(path, "class")?,
            vendor: sysfs::read_hex(path, "vendor")?,
            device: sysfs::read_hex(path, "device")?,
            revision: sysfs::read_hex(path, "revision")?,
            subsystem_vendor: sysfs::read_hex(path, "subsystem_vendor")?,
            subsystem_device: sysfs::read_hex(path, "subsystem_device")?,
        })
    }

    /// Class, subclass and programming interface from the class code
    pub fn class_triple(&self) -> (u8, u8, u8) {
        let [_, class, subclass, interface] = self.class.to_be_bytes();
        (class, subclass, interface)
    }

    /// Get the vendor, device and possibly subsystem names
    pub fn vendor_names<'db>(&self, db: &'db PciIdDb) -> VendorLookup<&'db str> {
        let vendor = db.get_vendor(self.vendor).ok();
        let device = db.get_device(self.vendor, self.device).ok();
        let subdevice = db
            .get_sub_device(
                self.vendor,
                self.device,
                self.subsystem_vendor,
                self.subsystem_device,
            )
            .ok();
        // The subvendor can be different from the main vendor
        // See https://admin.pci-ids.ucw.cz/mods/PC/?action=help?help=pci
        let subvendor = db.get_vendor(self.subsystem_vendor).ok();

        VendorLookup {
            vendor: vendor.map(|v| v.name.as_str()),
            device: device.map(|d| d.name.as_str()),
            subvendor: subvendor.map(|v| v.name.as_str()),
            subdevice: subdevice.map(|s| s.name.as_str()),
        }
    }

    /// Get the class, subclass and programming interface names
    pub fn class_names<'db>(&self, db: &'db PciIdDb) -> ClassLookup<&'db str> {
        let (class, subclass, interface) = self.class_triple();
        ClassLookup {
            class: db.get_class(class).ok().map(|c| c.name.as_str()),
            subclass: db
                .get_subclass(class, subclass)
                .ok()
                .map(|s| s.name.as_str()),
            interface: db
                .get_programming_interface(class, subclass, interface)
                .ok()
                .map(|p| p.name.as_str()),
        }
    }
}

/// Read PCI device info from `/sys`
pub fn load_pci_devices() -> std::result::Result<Vec<PciDevice>, SysfsError> {
    load_pci_devices_from(Path::new("/sys/bus/pci/devices"))
}

/// Read PCI device info from a directory laid out like `/sys/bus/pci/devices`
pub fn load_pci_devices_from(root: &Path) -> std::result::Result<Vec<PciDevice>, SysfsError> {
    sysfs::device_dirs(root)?
        .iter()
        .map(|dir| PciDevice::from_directory(dir))
        .collect()
}

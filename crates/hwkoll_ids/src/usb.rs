//! Look up USB IDs and read USB devices on Linux
//!
//! Besides vendors and classes, `usb.ids` carries a series of smaller tables
//! that follow each other in a fixed order, each introduced by its first line:
//!
//! | Table                | First line |
//! |----------------------|------------|
//! | Classes              | `C 00`     |
//! | Audio terminals      | `AT 0100`  |
//! | HID descriptors      | `HID 21`   |
//! | HID items            | `R 04`     |
//! | Physical biases      | `BIAS 0`   |
//! | Physical descriptors | `PHY 00`   |
//! | HID usage pages      | `HUT 00`   |
//! | Languages            | `L 0001`   |
//! | Country codes        | `HCC 00`   |
//! | Video terminals      | `VT 0100`  |

use std::path::Path;

use crate::ClassLookup;
use crate::EntryKind;
use crate::IdDatabase;
use crate::Result;
use crate::SysfsError;
use crate::VendorLookup;
use crate::parser::TreeFormat;
use crate::sysfs;
use crate::tree::Branch;
use crate::tree::Entry;
use crate::tree::Groups;
use crate::tree::Leaf;
use crate::tree::Levels;
use crate::tree::Root;
use crate::tree::SubsystemId;
use crate::tree::Table;
use crate::tree::Tree;

mod parser;

pub type Vendor = Root<u16, u16, SubsystemId>;
pub type Device = Branch<u16, u16, SubsystemId>;
pub type SubDevice = Leaf<SubsystemId>;
pub type Class = Root<u8, u8, u8>;
pub type Subclass = Branch<u8, u8, u8>;
pub type Protocol = Leaf<u8>;
pub type AudioTerminal = Leaf<u16>;
pub type Hid = Leaf<u8>;
pub type HidItem = Leaf<u8>;
pub type PhysicalBias = Leaf<u8>;
pub type PhysicalDescriptor = Leaf<u8>;
pub type HidUsagePage = Entry<u8, HidUsage>;
pub type HidUsage = Leaf<u16>;
pub type Language = Entry<u16, Dialect>;
pub type Dialect = Leaf<u8>;
pub type CountryCode = Leaf<u8>;
pub type VideoTerminal = Leaf<u16>;

const CLASSES: &str = "C 00";
const AUDIO_TERMINALS: &str = "AT 0100";
const HIDS: &str = "HID 21";
const HID_ITEMS: &str = "R 04";
const PHYSICAL_BIASES: &str = "BIAS 0";
const PHYSICAL_DESCRIPTORS: &str = "PHY 00";
const HID_USAGE_PAGES: &str = "HUT 00";
const LANGUAGES: &str = "L 0001";
const COUNTRY_CODES: &str = "HCC 00";
const VIDEO_TERMINALS: &str = "VT 0100";

const VENDOR_LEVELS: Levels = Levels {
    root: EntryKind::Vendor,
    child: EntryKind::Device,
    leaf: EntryKind::SubDevice,
};

const CLASS_LEVELS: Levels = Levels {
    root: EntryKind::Class,
    child: EntryKind::Subclass,
    leaf: EntryKind::Protocol,
};

const VENDOR_FORMAT: TreeFormat<u16, u16, SubsystemId> = TreeFormat {
    root: crate::parser::vendor_line,
    child: crate::parser::device_line,
    leaf: crate::parser::subsystem_line,
    levels: VENDOR_LEVELS,
};

const CLASS_FORMAT: TreeFormat<u8, u8, u8> = TreeFormat {
    root: crate::parser::class_line,
    child: crate::parser::subclass_line,
    leaf: crate::parser::interface_line,
    levels: CLASS_LEVELS,
};

/// A database of USB IDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbIdDb {
    vendors: Tree<u16, u16, SubsystemId>,
    classes: Tree<u8, u8, u8>,
    audio_terminals: Table<u16>,
    hids: Table<u8>,
    hid_items: Table<u8>,
    physical_biases: Table<u8>,
    physical_descriptors: Table<u8>,
    hid_usage_pages: Groups<u8, u16>,
    languages: Groups<u16, u8>,
    country_codes: Table<u8>,
    video_terminals: Table<u16>,
}

impl IdDatabase for UsbIdDb {
    fn parse(input: &str) -> Result<Self> {
        use crate::parser::build_groups;
        use crate::parser::build_table;
        use crate::parser::build_tree;
        use crate::parser::section;

        let lines = crate::parser::significant_lines(input);
        let window = |start: &str, end: Option<&str>| section(&lines, Some(start), end);

        let vendors = build_tree(section(&lines, None, Some(CLASSES)), &VENDOR_FORMAT)?;
        let classes = build_tree(window(CLASSES, Some(AUDIO_TERMINALS)), &CLASS_FORMAT)?;
        let audio_terminals = build_table(
            window(AUDIO_TERMINALS, Some(HIDS)),
            parser::audio_terminal_line,
        )?;
        let hids = build_table(window(HIDS, Some(HID_ITEMS)), parser::hid_line)?;
        let hid_items = build_table(
            window(HID_ITEMS, Some(PHYSICAL_BIASES)),
            parser::hid_item_line,
        )?;
        let physical_biases = build_table(
            window(PHYSICAL_BIASES, Some(PHYSICAL_DESCRIPTORS)),
            parser::physical_bias_line,
        )?;
        let physical_descriptors = build_table(
            window(PHYSICAL_DESCRIPTORS, Some(HID_USAGE_PAGES)),
            parser::physical_descriptor_line,
        )?;
        let hid_usage_pages = build_groups(
            window(HID_USAGE_PAGES, Some(LANGUAGES)),
            parser::hid_usage_page_line,
            parser::hid_usage_line,
            (EntryKind::HidUsagePage, EntryKind::HidUsage),
        )?;
        let languages = build_groups(
            window(LANGUAGES, Some(COUNTRY_CODES)),
            parser::language_line,
            parser::dialect_line,
            (EntryKind::Language, EntryKind::Dialect),
        )?;
        let country_codes = build_table(
            window(COUNTRY_CODES, Some(VIDEO_TERMINALS)),
            parser::country_code_line,
        )?;
        let video_terminals =
            build_table(window(VIDEO_TERMINALS, None), parser::video_terminal_line)?;

        let db = Self {
            vendors: Tree::new(vendors, VENDOR_LEVELS),
            classes: Tree::new(classes, CLASS_LEVELS),
            audio_terminals: Table::new(audio_terminals, EntryKind::AudioTerminal),
            hids: Table::new(hids, EntryKind::Hid),
            hid_items: Table::new(hid_items, EntryKind::HidItem),
            physical_biases: Table::new(physical_biases, EntryKind::PhysicalBias),
            physical_descriptors: Table::new(
                physical_descriptors,
                EntryKind::PhysicalDescriptor,
            ),
            hid_usage_pages: Groups::new(
                hid_usage_pages,
                EntryKind::HidUsagePage,
                EntryKind::HidUsage,
            ),
            languages: Groups::new(languages, EntryKind::Language, EntryKind::Dialect),
            country_codes: Table::new(country_codes, EntryKind::CountryCode),
            video_terminals: Table::new(video_terminals, EntryKind::VideoTerminal),
        };
        tracing::debug!(
            vendors = db.vendors.len(),
            vendor_descendants = db.vendors.descendant_count(),
            classes = db.classes.len(),
            audio_terminals = db.audio_terminals.len(),
            hids = db.hids.len(),
            hid_items = db.hid_items.len(),
            physical_biases = db.physical_biases.len(),
            physical_descriptors = db.physical_descriptors.len(),
            hid_usage_pages = db.hid_usage_pages.len(),
            languages = db.languages.len(),
            country_codes = db.country_codes.len(),
            video_terminals = db.video_terminals.len(),
            "Parsed usb.ids"
        );
        Ok(db)
    }
}

impl UsbIdDb {
    /// Create from a string containing `usb.ids`
    pub fn parse(input: &str) -> Result<Self> {
        <Self as IdDatabase>::parse(input)
    }

    pub fn vendors(&self) -> &Tree<u16, u16, SubsystemId> {
        &self.vendors
    }

    pub fn classes(&self) -> &Tree<u8, u8, u8> {
        &self.classes
    }

    // Vendors

    pub fn list_vendors(&self) -> &[Vendor] {
        self.vendors.roots()
    }

    pub fn get_vendor(&self, vendor: u16) -> Result<&Vendor> {
        self.vendors.root(vendor)
    }

    pub fn is_vendor_registered(&self, vendor: u16) -> bool {
        self.get_vendor(vendor).is_ok()
    }

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

    // Classes

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

    pub fn list_protocols(&self, class: u8, subclass: u8) -> Result<&[Protocol]> {
        self.classes.leaves(class, subclass)
    }

    pub fn get_protocol(&self, class: u8, subclass: u8, protocol: u8) -> Result<&Protocol> {
        self.classes.leaf(class, subclass, protocol)
    }

    pub fn is_protocol_registered(&self, class: u8, subclass: u8, protocol: u8) -> bool {
        self.get_protocol(class, subclass, protocol).is_ok()
    }

    // Flat tables

    pub fn list_audio_terminals(&self) -> &[AudioTerminal] {
        self.audio_terminals.entries()
    }

    pub fn get_audio_terminal(&self, id: u16) -> Result<&AudioTerminal> {
        self.audio_terminals.get(id)
    }

    pub fn is_audio_terminal_registered(&self, id: u16) -> bool {
        self.get_audio_terminal(id).is_ok()
    }

    pub fn list_hids(&self) -> &[Hid] {
        self.hids.entries()
    }

    pub fn get_hid(&self, id: u8) -> Result<&Hid> {
        self.hids.get(id)
    }

    pub fn is_hid_registered(&self, id: u8) -> bool {
        self.get_hid(id).is_ok()
    }

    pub fn list_hid_items(&self) -> &[HidItem] {
        self.hid_items.entries()
    }

    pub fn get_hid_item(&self, id: u8) -> Result<&HidItem> {
        self.hid_items.get(id)
    }

    pub fn is_hid_item_registered(&self, id: u8) -> bool {
        self.get_hid_item(id).is_ok()
    }

    pub fn list_physical_biases(&self) -> &[PhysicalBias] {
        self.physical_biases.entries()
    }

    pub fn get_physical_bias(&self, id: u8) -> Result<&PhysicalBias> {
        self.physical_biases.get(id)
    }

    pub fn is_physical_bias_registered(&self, id: u8) -> bool {
        self.get_physical_bias(id).is_ok()
    }

    pub fn list_physical_descriptors(&self) -> &[PhysicalDescriptor] {
        self.physical_descriptors.entries()
    }

    pub fn get_physical_descriptor(&self, id: u8) -> Result<&PhysicalDescriptor> {
        self.physical_descriptors.get(id)
    }

    pub fn is_physical_descriptor_registered(&self, id: u8) -> bool {
        self.get_physical_descriptor(id).is_ok()
    }

    pub fn list_country_codes(&self) -> &[CountryCode] {
        self.country_codes.entries()
    }

    pub fn get_country_code(&self, id: u8) -> Result<&CountryCode> {
        self.country_codes.get(id)
    }

    pub fn is_country_code_registered(&self, id: u8) -> bool {
        self.get_country_code(id).is_ok()
    }

    pub fn list_video_terminals(&self) -> &[VideoTerminal] {
        self.video_terminals.entries()
    }

    pub fn get_video_terminal(&self, id: u16) -> Result<&VideoTerminal> {
        self.video_terminals.get(id)
    }

    pub fn is_video_terminal_registered(&self, id: u16) -> bool {
        self.get_video_terminal(id).is_ok()
    }

    // Two level tables

    pub fn list_hid_usage_pages(&self) -> &[HidUsagePage] {
        self.hid_usage_pages.groups()
    }

    pub fn get_hid_usage_page(&self, page: u8) -> Result<&HidUsagePage> {
        self.hid_usage_pages.group(page)
    }

    pub fn is_hid_usage_page_registered(&self, page: u8) -> bool {
        self.get_hid_usage_page(page).is_ok()
    }

    pub fn list_hid_usages(&self, page: u8) -> Result<&[HidUsage]> {
        self.hid_usage_pages.members(page)
    }

    pub fn get_hid_usage(&self, page: u8, usage: u16) -> Result<&HidUsage> {
        self.hid_usage_pages.member(page, usage)
    }

    pub fn is_hid_usage_registered(&self, page: u8, usage: u16) -> bool {
        self.get_hid_usage(page, usage).is_ok()
    }

    pub fn list_languages(&self) -> &[Language] {
        self.languages.groups()
    }

    pub fn get_language(&self, language: u16) -> Result<&Language> {
        self.languages.group(language)
    }

    pub fn is_language_registered(&self, language: u16) -> bool {
        self.get_language(language).is_ok()
    }

    pub fn list_dialects(&self, language: u16) -> Result<&[Dialect]> {
        self.languages.members(language)
    }

    pub fn get_dialect(&self, language: u16, dialect: u8) -> Result<&Dialect> {
        self.languages.member(language, dialect)
    }

    pub fn is_dialect_registered(&self, language: u16, dialect: u8) -> bool {
        self.get_dialect(language, dialect).is_ok()
    }
}

/// Data about a USB device
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UsbDevice {
    /// Bus path (directory name in sysfs), e.g. `1-4.2`
    pub address: String,
    pub vendor: u16,
    pub product: u16,
    pub class: u8,
    pub subclass: u8,
    pub protocol: u8,
}

impl UsbDevice {
    /// Load data from a device directory in `/sys`
    fn from_directory(path: &Path) -> std::result::Result<Self, SysfsError> {
        Ok(Self {
            address: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            vendor: sysfs::read_hex(path, "idVendor")?,
            product: sysfs::read_hex(path, "idProduct")?,
            class: sysfs::read_hex(path, "bDeviceClass")?,
            subclass: sysfs::read_hex(path, "bDeviceSubClass")?,
            protocol: sysfs::read_hex(path, "bDeviceProtocol")?,
        })
    }

    /// Get the vendor and product names
    pub fn vendor_names<'db>(&self, db: &'db UsbIdDb) -> VendorLookup<&'db str> {
        VendorLookup {
            vendor: db.get_vendor(self.vendor).ok().map(|v| v.name.as_str()),
            device: db
                .get_device(self.vendor, self.product)
                .ok()
                .map(|d| d.name.as_str()),
            subvendor: None,
            subdevice: None,
        }
    }

    /// Get the class, subclass and protocol names
    pub fn class_names<'db>(&self, db: &'db UsbIdDb) -> ClassLookup<&'db str> {
        ClassLookup {
            class: db.get_class(self.class).ok().map(|c| c.name.as_str()),
            subclass: db
                .get_subclass(self.class, self.subclass)
                .ok()
                .map(|s| s.name.as_str()),
            interface: db
                .get_protocol(self.class, self.subclass, self.protocol)
                .ok()
                .map(|p| p.name.as_str()),
        }
    }
}

/// Read USB device info from `/sys`
pub fn load_usb_devices() -> std::result::Result<Vec<UsbDevice>, SysfsError> {
    load_usb_devices_from(Path::new("/sys/bus/usb/devices"))
}

/// Read USB device info from a directory laid out like `/sys/bus/usb/devices`
///
/// Interface directories (those without `idVendor`) are skipped.
pub fn load_usb_devices_from(root: &Path) -> std::result::Result<Vec<UsbDevice>, SysfsError> {
    sysfs::device_dirs(root)?
        .iter()
        .filter(|dir| sysfs::has_attribute(dir, "idVendor"))
        .map(|dir| UsbDevice::from_directory(dir))
        .collect()
}

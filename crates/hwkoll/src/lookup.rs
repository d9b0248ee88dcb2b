//! Running queries against the ID databases

use hwkoll_ids::Entry;
use hwkoll_ids::Leaf;
use hwkoll_ids::SubEntry;
use hwkoll_ids::SubsystemId;
use hwkoll_ids::pci::PciIdDb;
use hwkoll_ids::usb::UsbIdDb;

use crate::cli::PciQuery;
use crate::cli::UsbQuery;

/// One line of query output
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    /// ID formatted the way the database file writes it
    pub id: String,
    pub name: String,
}

/// Hexadecimal formatting matching the ID files
pub trait HexId {
    fn to_hex(&self) -> String;
}

impl HexId for u8 {
    fn to_hex(&self) -> String {
        format!("{self:02x}")
    }
}

impl HexId for u16 {
    fn to_hex(&self) -> String {
        format!("{self:04x}")
    }
}

impl HexId for SubsystemId {
    fn to_hex(&self) -> String {
        format!("{:04x} {:04x}", self.vendor, self.device)
    }
}

trait Named {
    fn row(&self) -> Row;
}

impl<Id: HexId, Child> Named for Entry<Id, Child> {
    fn row(&self) -> Row {
        Row {
            id: self.id.to_hex(),
            name: self.name.clone(),
        }
    }
}

impl<Id: HexId, ParentId, Child> Named for SubEntry<Id, ParentId, Child> {
    fn row(&self) -> Row {
        Row {
            id: self.id.to_hex(),
            name: self.name.clone(),
        }
    }
}

impl<Id: HexId> Named for Leaf<Id> {
    fn row(&self) -> Row {
        Row {
            id: self.id.to_hex(),
            name: self.name.clone(),
        }
    }
}

fn all<T: Named>(items: &[T]) -> Vec<Row> {
    items.iter().map(Named::row).collect()
}

fn one<T: Named>(item: &T) -> Vec<Row> {
    vec![item.row()]
}

/// Run a query against `pci.ids`
pub fn pci(db: &PciIdDb, query: PciQuery) -> hwkoll_ids::Result<Vec<Row>> {
    Ok(match query {
        PciQuery::Vendors => all(db.list_vendors()),
        PciQuery::Vendor { vendor } => one(db.get_vendor(vendor)?),
        PciQuery::Devices { vendor } => all(db.list_devices(vendor)?),
        PciQuery::Device { vendor, device } => one(db.get_device(vendor, device)?),
        PciQuery::SubDevice {
            vendor,
            device,
            subvendor,
            subdevice,
        } => one(db.get_sub_device(vendor, device, subvendor, subdevice)?),
        PciQuery::Classes => all(db.list_classes()),
        PciQuery::Class { class } => all(db.list_subclasses(class)?),
        PciQuery::Subclass { class, subclass } => {
            all(db.list_programming_interfaces(class, subclass)?)
        }
        PciQuery::ProgIf {
            class,
            subclass,
            prog_if,
        } => one(db.get_programming_interface(class, subclass, prog_if)?),
    })
}

/// Run a query against `usb.ids`
pub fn usb(db: &UsbIdDb, query: UsbQuery) -> hwkoll_ids::Result<Vec<Row>> {
    Ok(match query {
        UsbQuery::Vendors => all(db.list_vendors()),
        UsbQuery::Vendor { vendor } => one(db.get_vendor(vendor)?),
        UsbQuery::Devices { vendor } => all(db.list_devices(vendor)?),
        UsbQuery::Device { vendor, device } => one(db.get_device(vendor, device)?),
        UsbQuery::SubDevice {
            vendor,
            device,
            subvendor,
            subdevice,
        } => one(db.get_sub_device(vendor, device, subvendor, subdevice)?),
        UsbQuery::Classes => all(db.list_classes()),
        UsbQuery::Class { class } => all(db.list_subclasses(class)?),
        UsbQuery::Subclass { class, subclass } => all(db.list_protocols(class, subclass)?),
        UsbQuery::Protocol {
            class,
            subclass,
            protocol,
        } => one(db.get_protocol(class, subclass, protocol)?),
        UsbQuery::AudioTerminal { id: None } => all(db.list_audio_terminals()),
        UsbQuery::AudioTerminal { id: Some(id) } => one(db.get_audio_terminal(id)?),
        UsbQuery::Hid { id: None } => all(db.list_hids()),
        UsbQuery::Hid { id: Some(id) } => one(db.get_hid(id)?),
        UsbQuery::HidItem { id: None } => all(db.list_hid_items()),
        UsbQuery::HidItem { id: Some(id) } => one(db.get_hid_item(id)?),
        UsbQuery::Bias { id: None } => all(db.list_physical_biases()),
        UsbQuery::Bias { id: Some(id) } => one(db.get_physical_bias(id)?),
        UsbQuery::Physical { id: None } => all(db.list_physical_descriptors()),
        UsbQuery::Physical { id: Some(id) } => one(db.get_physical_descriptor(id)?),
        UsbQuery::HidUsagePage { page: None } => all(db.list_hid_usage_pages()),
        UsbQuery::HidUsagePage { page: Some(page) } => one(db.get_hid_usage_page(page)?),
        UsbQuery::HidUsage { page, usage: None } => all(db.list_hid_usages(page)?),
        UsbQuery::HidUsage {
            page,
            usage: Some(usage),
        } => one(db.get_hid_usage(page, usage)?),
        UsbQuery::Language { language: None } => all(db.list_languages()),
        UsbQuery::Language {
            language: Some(language),
        } => one(db.get_language(language)?),
        UsbQuery::Dialect {
            language,
            dialect: None,
        } => all(db.list_dialects(language)?),
        UsbQuery::Dialect {
            language,
            dialect: Some(dialect),
        } => one(db.get_dialect(language, dialect)?),
        UsbQuery::Country { id: None } => all(db.list_country_codes()),
        UsbQuery::Country { id: Some(id) } => one(db.get_country_code(id)?),
        UsbQuery::VideoTerminal { id: None } => all(db.list_video_terminals()),
        UsbQuery::VideoTerminal { id: Some(id) } => one(db.get_video_terminal(id)?),
    })
}

use std::env;

use hwkoll_ids::EntryKind;
use hwkoll_ids::Error;
use hwkoll_ids::NotFound;
use hwkoll_ids::usb::UsbIdDb;
use pretty_assertions::assert_eq;

fn fixture() -> String {
    let path = env::current_dir().unwrap().join("tests/data/usb.ids");
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn vendors_and_classes() {
    let db = UsbIdDb::parse(&fixture()).unwrap();
    assert_eq!(db.list_vendors().len(), 2);
    assert_eq!(db.list_devices(0x1d6b).unwrap().len(), 4);
    assert_eq!(
        db.get_device(0x046d, 0xc52b).unwrap().name,
        "Unifying Receiver"
    );
    assert_eq!(db.list_classes().len(), 4);
    assert_eq!(db.list_protocols(0x03, 0x01).unwrap().len(), 3);
    assert_eq!(db.get_protocol(0x09, 0x00, 0x02).unwrap().name, "TT per port");
    assert!(db.list_subclasses(0x00).unwrap().is_empty());
    assert_eq!(
        db.get_subclass(0x00, 0x00).unwrap_err(),
        Error::NotFound(NotFound::NoChildren {
            parent_kind: EntryKind::Class,
            parent_id: 0x00,
            kind: EntryKind::Subclass,
        })
    );
}

#[test]
fn auxiliary_tables() {
    let db = UsbIdDb::parse(&fixture()).unwrap();
    assert_eq!(db.list_audio_terminals().len(), 4);
    assert_eq!(db.get_audio_terminal(0x01ff).unwrap().name, "USB vendor specific");
    assert_eq!(db.list_hids().len(), 3);
    assert_eq!(db.get_hid(0x23).unwrap().name, "Physical");
    assert_eq!(db.list_hid_items().len(), 3);
    assert_eq!(db.get_hid_item(0x14).unwrap().name, "Logical Minimum");
    assert_eq!(db.list_physical_biases().len(), 3);
    assert_eq!(db.get_physical_bias(2).unwrap().name, "Left Hand");
    assert_eq!(db.list_physical_descriptors().len(), 3);
    assert_eq!(db.get_physical_descriptor(0x02).unwrap().name, "Eyeball");
    assert_eq!(db.list_country_codes().len(), 3);
    assert_eq!(db.get_country_code(0x21).unwrap().name, "US");
    assert_eq!(db.list_video_terminals().len(), 3);
    assert_eq!(
        db.get_video_terminal(0x0401).unwrap().name,
        "Composite connector"
    );
}

#[test]
fn nested_auxiliary_tables() {
    let db = UsbIdDb::parse(&fixture()).unwrap();
    let pages: Vec<_> = db.list_hid_usage_pages().iter().map(|p| p.id).collect();
    assert_eq!(pages, vec![0x00, 0x01, 0x07]);
    assert_eq!(db.list_hid_usages(0x01).unwrap().len(), 4);
    // The last page of the section keeps its usages
    assert_eq!(db.get_hid_usage(0x07, 0x004).unwrap().name, "Keyboard a and A");
    assert!(!db.is_hid_usage_registered(0x07, 0x005));

    assert_eq!(db.list_languages().len(), 3);
    assert_eq!(db.get_language(0x0007).unwrap().name, "German");
    assert_eq!(db.list_dialects(0x0009).unwrap().len(), 2);
    assert_eq!(db.get_dialect(0x0007, 0x02).unwrap().name, "Swiss");
    assert!(!db.is_dialect_registered(0x0009, 0x03));
    assert!(!db.is_language_registered(0x0010));
}

#[test]
fn missing_section_is_empty() {
    let text = fixture();
    let cut = text.find("# List of Video Class Terminal Types").unwrap();
    let db = UsbIdDb::parse(&text[..cut]).unwrap();
    assert!(db.list_video_terminals().is_empty());
    assert!(!db.is_video_terminal_registered(0x0100));
    assert_eq!(db.list_country_codes().len(), 3);
}

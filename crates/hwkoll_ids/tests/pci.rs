use std::env;

use hwkoll_ids::Error;
use hwkoll_ids::SharedDb;
use hwkoll_ids::pci::PciIdDb;
use pretty_assertions::assert_eq;

fn fixture() -> String {
    let path = env::current_dir().unwrap().join("tests/data/pci.ids");
    std::fs::read_to_string(path).unwrap()
}

/// Count root lines and the child lines below each, straight from the text
fn expected_vendors(text: &str) -> Vec<(u16, String, usize)> {
    let mut expected: Vec<(u16, String, usize)> = vec![];
    for line in text.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        if line.starts_with("C 00") {
            break;
        }
        if line.starts_with("\t\t") {
            continue;
        }
        if line.starts_with('\t') {
            expected.last_mut().unwrap().2 += 1;
        } else {
            let id = u16::from_str_radix(&line[..4], 16).unwrap();
            expected.push((id, line[6..].to_owned(), 0));
        }
    }
    expected
}

#[test]
fn every_vendor_and_device_is_listed() {
    let text = fixture();
    let db = PciIdDb::parse(&text).unwrap();
    let actual: Vec<_> = db
        .list_vendors()
        .iter()
        .map(|v| (v.id, v.name.clone(), v.children.len()))
        .collect();
    assert_eq!(actual, expected_vendors(&text));
}

#[test]
fn last_entries_keep_their_children() {
    let db = PciIdDb::parse(&fixture()).unwrap();
    // Last vendor before the class section has no devices
    assert!(db.list_devices(0xffff).unwrap().is_empty());
    assert_eq!(db.list_programming_interfaces(0x0c, 0x03).unwrap().len(), 5);

    // Input that ends right after a grandchild
    let db = PciIdDb::parse("8086  Intel\n\t1237  PMC\n\t\t1af4 1100  Qemu").unwrap();
    assert_eq!(db.list_sub_devices(0x8086, 0x1237).unwrap().len(), 1);

    // Input that ends right after a child
    let db = PciIdDb::parse("8086  Intel\n\t1237  PMC\n").unwrap();
    assert_eq!(db.list_devices(0x8086).unwrap().len(), 1);
}

#[test]
fn sub_devices_are_keyed_by_subvendor() {
    let db = PciIdDb::parse(&fixture()).unwrap();
    assert_eq!(
        db.get_sub_device(0x8086, 0x1237, 0x1af4, 0x1100)
            .unwrap()
            .name,
        "Qemu virtual machine"
    );
    assert_eq!(
        db.get_sub_device(0x8086, 0x7020, 0x1af4, 0x1100)
            .unwrap()
            .name,
        "QEMU Virtual Machine"
    );
    assert_eq!(
        db.get_sub_device(0x1002, 0x73bf, 0x1458, 0x2329)
            .unwrap()
            .name,
        "Radeon RX 6800 XT Gaming OC"
    );
    assert!(!db.is_sub_device_registered(0x1002, 0x73bf, 0x1002, 0x2329));
    assert!(!db.is_sub_device_registered(0x1002, 0x1478, 0x1002, 0x0e3a));
}

#[test]
fn classes() {
    let db = PciIdDb::parse(&fixture()).unwrap();
    let names: Vec<_> = db.list_classes().iter().map(|c| c.id).collect();
    assert_eq!(names, vec![0x00, 0x01, 0x03, 0x0c, 0xff]);
    assert_eq!(
        db.get_programming_interface(0x01, 0x08, 0x02)
            .unwrap()
            .name,
        "NVM Express"
    );
    assert_eq!(db.get_subclass(0x03, 0x02).unwrap().parent, 0x03);
    assert!(db.list_subclasses(0xff).unwrap().is_empty());
}

#[test]
fn parsing_twice_gives_the_same_database() {
    let text = fixture();
    let shared = SharedDb::<PciIdDb>::new(text.clone());
    let first = shared.get().unwrap().list_vendors().to_vec();
    let second = shared.get().unwrap().list_vendors().to_vec();
    assert_eq!(first, second);
    assert_eq!(PciIdDb::parse(&text).unwrap(), PciIdDb::parse(&text).unwrap());
}

#[test]
fn malformed_id_aborts_the_parse() {
    let text = fixture().replace("\t1041  Virtio", "\t10G1  Virtio");
    let err = PciIdDb::parse(&text).unwrap_err();
    let Error::MalformedInput(err) = err else {
        panic!("Expected a parse error, got {err:?}");
    };
    let line = text
        .lines()
        .position(|l| l.starts_with("\t10G1"))
        .unwrap()
        + 1;
    assert_eq!(err.line_number(), line);
    assert_eq!(err.column(), 1);
}

//! Command line definition

use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

/// Where distributions install `pci.ids`, in search order
pub const PCI_IDS_PATHS: &[&str] = &[
    "/usr/share/hwdata/pci.ids",
    "/usr/share/misc/pci.ids",
    "/usr/share/pci.ids",
];

/// Where distributions install `usb.ids`, in search order
pub const USB_IDS_PATHS: &[&str] = &[
    "/usr/share/hwdata/usb.ids",
    "/usr/share/misc/usb.ids",
    "/var/lib/usbutils/usb.ids",
];

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[clap(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to pci.ids (default: first of the usual locations that exists)
    #[arg(long, env = "HWKOLL_PCI_IDS", global = true)]
    pub pci_ids: Option<PathBuf>,
    /// Path to usb.ids (default: first of the usual locations that exists)
    #[arg(long, env = "HWKOLL_USB_IDS", global = true)]
    pub usb_ids: Option<PathBuf>,
    /// Output format to use
    #[arg(short, long, default_value_t = Format::Human, global = true)]
    pub format: Format,
    /// Operation to perform
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The `pci.ids` file to use
    pub fn pci_ids_path(&self) -> Option<PathBuf> {
        resolve(self.pci_ids.as_deref(), PCI_IDS_PATHS)
    }

    /// The `usb.ids` file to use
    pub fn usb_ids_path(&self) -> Option<PathBuf> {
        resolve(self.usb_ids.as_deref(), USB_IDS_PATHS)
    }
}

fn resolve(explicit: Option<&Path>, defaults: &[&str]) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_owned()),
        None => defaults
            .iter()
            .map(PathBuf::from)
            .find(|path| path.is_file()),
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Query the PCI ID database
    Pci {
        #[command(subcommand)]
        query: PciQuery,
    },
    /// Query the USB ID database
    Usb {
        #[command(subcommand)]
        query: UsbQuery,
    },
    /// Decode the CPUID feature flags of this machine (x86 only)
    Cpu,
    /// Map a GPT type GUID or an MBR type byte (`0x83`) to a partition type
    PartitionType {
        /// GUID or hexadecimal byte
        id: String,
    },
    /// List PCI and USB devices with their names
    Devices,
    /// Collect processor, memory, disk and video information (Linux only)
    Snapshot,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum PciQuery {
    /// List all vendors
    Vendors,
    /// Show a vendor
    Vendor {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
    },
    /// List the devices of a vendor
    Devices {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
    },
    /// Show a device
    Device {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        device: u16,
    },
    /// Show a subsystem of a device
    SubDevice {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        device: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        subvendor: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        subdevice: u16,
    },
    /// List all device classes
    Classes,
    /// List the subclasses of a class
    Class {
        #[arg(value_parser = parse_hex::<u8>)]
        class: u8,
    },
    /// List the programming interfaces of a subclass
    Subclass {
        #[arg(value_parser = parse_hex::<u8>)]
        class: u8,
        #[arg(value_parser = parse_hex::<u8>)]
        subclass: u8,
    },
    /// Show a programming interface
    ProgIf {
        #[arg(value_parser = parse_hex::<u8>)]
        class: u8,
        #[arg(value_parser = parse_hex::<u8>)]
        subclass: u8,
        #[arg(value_parser = parse_hex::<u8>)]
        prog_if: u8,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum UsbQuery {
    /// List all vendors
    Vendors,
    /// Show a vendor
    Vendor {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
    },
    /// List the devices of a vendor
    Devices {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
    },
    /// Show a device
    Device {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        device: u16,
    },
    /// Show a subsystem of a device
    SubDevice {
        #[arg(value_parser = parse_hex::<u16>)]
        vendor: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        device: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        subvendor: u16,
        #[arg(value_parser = parse_hex::<u16>)]
        subdevice: u16,
    },
    /// List all device classes
    Classes,
    /// List the subclasses of a class
    Class {
        #[arg(value_parser = parse_hex::<u8>)]
        class: u8,
    },
    /// List the protocols of a subclass
    Subclass {
        #[arg(value_parser = parse_hex::<u8>)]
        class: u8,
        #[arg(value_parser = parse_hex::<u8>)]
        subclass: u8,
    },
    /// Show a protocol
    Protocol {
        #[arg(value_parser = parse_hex::<u8>)]
        class: u8,
        #[arg(value_parser = parse_hex::<u8>)]
        subclass: u8,
        #[arg(value_parser = parse_hex::<u8>)]
        protocol: u8,
    },
    /// Show an audio terminal type (all of them if no ID is given)
    AudioTerminal {
        #[arg(value_parser = parse_hex::<u16>)]
        id: Option<u16>,
    },
    /// Show a HID descriptor type (all of them if no ID is given)
    Hid {
        #[arg(value_parser = parse_hex::<u8>)]
        id: Option<u8>,
    },
    /// Show a HID descriptor item type (all of them if no ID is given)
    HidItem {
        #[arg(value_parser = parse_hex::<u8>)]
        id: Option<u8>,
    },
    /// Show a physical descriptor bias type (all of them if no ID is given)
    Bias {
        #[arg(value_parser = parse_hex::<u8>)]
        id: Option<u8>,
    },
    /// Show a physical descriptor item type (all of them if no ID is given)
    Physical {
        #[arg(value_parser = parse_hex::<u8>)]
        id: Option<u8>,
    },
    /// Show a HID usage page (all of them if no ID is given)
    HidUsagePage {
        #[arg(value_parser = parse_hex::<u8>)]
        page: Option<u8>,
    },
    /// List the usages of a HID usage page, or show one of them
    HidUsage {
        #[arg(value_parser = parse_hex::<u8>)]
        page: u8,
        #[arg(value_parser = parse_hex::<u16>)]
        usage: Option<u16>,
    },
    /// Show a language (all of them if no ID is given)
    Language {
        #[arg(value_parser = parse_hex::<u16>)]
        language: Option<u16>,
    },
    /// List the dialects of a language, or show one of them
    Dialect {
        #[arg(value_parser = parse_hex::<u16>)]
        language: u16,
        #[arg(value_parser = parse_hex::<u8>)]
        dialect: Option<u8>,
    },
    /// Show a HID country code (all of them if no ID is given)
    Country {
        #[arg(value_parser = parse_hex::<u8>)]
        id: Option<u8>,
    },
    /// Show a video class terminal type (all of them if no ID is given)
    VideoTerminal {
        #[arg(value_parser = parse_hex::<u16>)]
        id: Option<u16>,
    },
}

/// Output format to use
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, clap::ValueEnum)]
pub enum Format {
    /// Human-readable output
    Human,
    /// JSON formatted output
    #[cfg(feature = "json")]
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            #[cfg(feature = "json")]
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parse a hexadecimal ID, with or without `0x`
pub fn parse_hex<T: TryFrom<u32>>(value: &str) -> Result<T, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| format!("{value:?} is not a valid hexadecimal ID of this width"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex::<u16>("8086"), Ok(0x8086));
        assert_eq!(parse_hex::<u16>("0x8086"), Ok(0x8086));
        assert_eq!(parse_hex::<u8>("0X0c"), Ok(0x0c));
        assert!(parse_hex::<u8>("100").is_err());
        assert!(parse_hex::<u16>("xyz").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "hwkoll",
            "--pci-ids",
            "/tmp/pci.ids",
            "pci",
            "device",
            "0x8086",
            "1234",
        ])
        .unwrap();
        assert_eq!(cli.pci_ids_path(), Some(PathBuf::from("/tmp/pci.ids")));
        assert!(matches!(
            cli.command,
            Commands::Pci {
                query: PciQuery::Device {
                    vendor: 0x8086,
                    device: 0x1234
                }
            }
        ));

        let cli = Cli::try_parse_from(["hwkoll", "usb", "hid-usage", "01"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Usb {
                query: UsbQuery::HidUsage {
                    page: 0x01,
                    usage: None
                }
            }
        ));
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

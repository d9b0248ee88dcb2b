//! Name resolution results for devices found on the system

/// Result from [`crate::pci::PciDevice::vendor_names`] and
/// [`crate::usb::UsbDevice::vendor_names`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VendorLookup<S> {
    pub vendor: Option<S>,
    pub device: Option<S>,
    pub subvendor: Option<S>,
    pub subdevice: Option<S>,
}

impl<S: AsRef<str>> VendorLookup<S> {
    /// Copy the names so the result outlives the database
    pub fn into_owned(&self) -> VendorLookup<String> {
        VendorLookup {
            vendor: owned(self.vendor.as_ref()),
            device: owned(self.device.as_ref()),
            subvendor: owned(self.subvendor.as_ref()),
            subdevice: owned(self.subdevice.as_ref()),
        }
    }
}

/// Result from [`crate::pci::PciDevice::class_names`] and
/// [`crate::usb::UsbDevice::class_names`]
///
/// For USB devices `interface` holds the protocol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassLookup<S> {
    pub class: Option<S>,
    pub subclass: Option<S>,
    pub interface: Option<S>,
}

impl<S: AsRef<str>> ClassLookup<S> {
    /// Copy the names so the result outlives the database
    pub fn into_owned(&self) -> ClassLookup<String> {
        ClassLookup {
            class: owned(self.class.as_ref()),
            subclass: owned(self.subclass.as_ref()),
            interface: owned(self.interface.as_ref()),
        }
    }
}

fn owned<S: AsRef<str>>(name: Option<&S>) -> Option<String> {
    name.map(|n| n.as_ref().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_into_owned() {
        let names = VendorLookup {
            vendor: Some("Intel Corporation"),
            device: None,
            subvendor: Some("Dell"),
            subdevice: None,
        };
        let owned: VendorLookup<String> = names.into_owned();
        assert_eq!(owned.vendor.as_deref(), Some("Intel Corporation"));
        assert_eq!(owned.device, None);
        assert_eq!(owned.subvendor.as_deref(), Some("Dell"));

        let classes = ClassLookup {
            class: Some("Display controller"),
            subclass: None,
            interface: None,
        };
        assert_eq!(
            classes.into_owned(),
            ClassLookup {
                class: Some("Display controller".to_owned()),
                subclass: None,
                interface: None,
            }
        );
    }
}

//! Processor description

use compact_str::CompactString;
use hwkoll_cpuid::CpuidSource;

/// Information about the processor(s) of a machine
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessorInfo {
    /// Brand string, such as `AMD Ryzen 9 5950X 16-Core Processor`
    pub name: CompactString,
    /// Vendor as reported by CPUID, such as `AuthenticAMD`
    pub cpuid_vendor: CompactString,
    /// Number of physical processor packages
    pub packages: u32,
    /// Cores in each package
    pub cores_per_package: u32,
    /// Hardware threads over all packages
    pub logical_cores: u32,
    /// Cache sizes in bytes, 0 if not known
    pub l1_cache: u32,
    pub l2_cache: u32,
    pub l3_cache: u32,
    /// Clock speed in MHz
    pub speed_mhz: f64,
    pub features: Vec<&'static str>,
    /// Running under a hypervisor
    pub hypervisor: bool,
    /// Raw 12 character signature from CPUID leaf `0x4000_0000`
    pub hypervisor_signature: Option<CompactString>,
}

impl ProcessorInfo {
    /// Fill in what CPUID can tell
    ///
    /// Core counts, cache sizes and speed are left at zero.
    pub fn from_cpuid<S: CpuidSource + ?Sized>(source: &S) -> Self {
        let features = hwkoll_cpuid::decode_features(source);
        let hypervisor_signature =
            hwkoll_cpuid::hypervisor_signature(source, &features).map(CompactString::from);
        Self {
            name: source.brand_string().unwrap_or_default().into(),
            cpuid_vendor: source.vendor_string().into(),
            hypervisor: features.contains(&"hypervisor"),
            hypervisor_signature,
            features,
            ..Default::default()
        }
    }

    /// Name of the company that made the processor
    ///
    /// An unrecognised CPUID vendor string is returned as is. Without one this
    /// falls back to the first word of the brand string, then to `Unknown`.
    pub fn vendor(&self) -> &str {
        if let Some(name) = hwkoll_cpuid::cpu_vendor_name(&self.cpuid_vendor) {
            return name;
        }
        if !self.cpuid_vendor.is_empty() {
            return &self.cpuid_vendor;
        }
        match self.name.trim().split_once(' ') {
            Some((first, _)) => first,
            None => "Unknown",
        }
    }

    /// Display name of the hypervisor, if running under one
    pub fn hypervisor_vendor(&self) -> Option<&str> {
        self.hypervisor_signature
            .as_deref()
            .map(hwkoll_cpuid::hypervisor_vendor_name)
    }

    /// True if the named feature flag was decoded
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|known| *known == feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwkoll_cpuid::Registers;
    use pretty_assertions::assert_eq;

    struct VBoxGuest;

    impl CpuidSource for VBoxGuest {
        fn query(&self, leaf: u32, _subleaf: u32) -> Registers {
            let le = |text: &[u8; 4]| u32::from_le_bytes(*text);
            match leaf {
                0 => Registers::new(1, le(b"Genu"), le(b"ntel"), le(b"ineI")),
                1 => Registers::new(0, 0, 1 << 31 | 1 << 28, 1),
                0x4000_0000 => Registers::new(0, le(b"VBox"), le(b"VBox"), le(b"VBox")),
                _ => Registers::default(),
            }
        }
    }

    #[test]
    fn test_from_cpuid() {
        let info = ProcessorInfo::from_cpuid(&VBoxGuest);
        assert_eq!(info.cpuid_vendor, "GenuineIntel");
        assert_eq!(info.vendor(), "Intel");
        assert_eq!(info.name, "");
        assert_eq!(info.features, vec!["fpu", "avx", "hypervisor"]);
        assert!(info.hypervisor);
        assert!(info.has_feature("avx"));
        assert_eq!(info.hypervisor_signature.as_deref(), Some("VBoxVBoxVBox"));
        assert_eq!(info.hypervisor_vendor(), Some("VBoxVBoxVBox"));
    }

    #[test]
    fn test_vendor_fallback() {
        let mut info = ProcessorInfo {
            name: "Ampere Altra Q80-30".into(),
            ..Default::default()
        };
        assert_eq!(info.vendor(), "Ampere");
        info.name = "Cortex-A72".into();
        assert_eq!(info.vendor(), "Unknown");
        info.cpuid_vendor = "AuthenticAMD".into();
        assert_eq!(info.vendor(), "AMD");
    }

    #[test]
    fn test_unmapped_vendor_kept() {
        let mut info = ProcessorInfo {
            cpuid_vendor: "E2K MACHINE".into(),
            name: "Elbrus 8C".into(),
            ..Default::default()
        };
        assert_eq!(info.vendor(), "E2K MACHINE");
        info.cpuid_vendor = "ARM".into();
        info.name = "Cortex-A72".into();
        assert_eq!(info.vendor(), "ARM");
    }
}

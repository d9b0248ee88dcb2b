//! Decoding register dumps captured from real machines

use std::collections::BTreeMap;

use hwkoll_cpuid::CpuidSource;
use hwkoll_cpuid::Registers;
use hwkoll_cpuid::cpu_vendor_name;
use hwkoll_cpuid::decode_features;
use hwkoll_cpuid::hypervisor_signature;
use hwkoll_cpuid::hypervisor_vendor_name;
use pretty_assertions::assert_eq;

/// CPUID answers from a table, zeros for anything else
#[derive(Debug, Default)]
struct FakeCpuid {
    leaves: BTreeMap<(u32, u32), Registers>,
}

impl FakeCpuid {
    fn with(mut self, leaf: u32, subleaf: u32, regs: (u32, u32, u32, u32)) -> Self {
        self.leaves.insert((leaf, subleaf), regs.into());
        self
    }
}

impl CpuidSource for FakeCpuid {
    fn query(&self, leaf: u32, subleaf: u32) -> Registers {
        self.leaves
            .get(&(leaf, subleaf))
            .copied()
            .unwrap_or_default()
    }
}

fn le(text: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*text)
}

/// A KVM guest on an AMD Zen 2 host, reduced to the leaves the decoder reads
fn kvm_guest() -> FakeCpuid {
    FakeCpuid::default()
        .with(0, 0, (0x10, le(b"Auth"), le(b"cAMD"), le(b"enti")))
        .with(1, 0, (0x0083_0f10, 0, 0xfed8_3203, 0x178b_fbff))
        .with(7, 0, (0, 0x219c_91a9, 0x0000_0004, 0))
        .with(0x8000_0000, 0, (0x8000_0004, 0, 0, 0))
        .with(0x8000_0001, 0, (0, 0, 0x0000_0003, 0x2fd3_fbff))
        .with(0x8000_0002, 0, (le(b"AMD "), le(b"EPYC"), le(b" 7B1"), le(b"2\0\0\0")))
        .with(0x4000_0000, 0, (0x4000_0001, le(b"KVMK"), le(b"VMKV"), le(b"M\0\0\0")))
}

#[test]
fn identification() {
    let cpu = kvm_guest();
    assert_eq!(cpu.vendor_string(), "AuthenticAMD");
    assert_eq!(cpu_vendor_name(&cpu.vendor_string()), Some("AMD"));
    assert_eq!(cpu.brand_string().as_deref(), Some("AMD EPYC 7B12"));
}

#[test]
fn features() {
    let cpu = kvm_guest();
    let features = decode_features(&cpu);

    for expected in ["fpu", "sse2", "avx", "hypervisor", "avx2", "sha", "umip", "lm"] {
        assert!(features.contains(&expected), "{expected} missing");
    }
    assert!(!features.contains(&"avx-vnni"));
    // leaf 1 and 0x8000_0001 overlap
    let mut sorted = features.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), features.len());
    assert!(!features.iter().any(|f| f.contains("reserved")));
}

#[test]
fn hypervisor() {
    let cpu = kvm_guest();
    let features = decode_features(&cpu);
    let signature = hypervisor_signature(&cpu, &features).unwrap();
    assert_eq!(signature, "KVMKVMKVM\0\0\0");
    assert_eq!(hypervisor_vendor_name(&signature), "KVM");
}

#[test]
fn bare_metal_has_no_hypervisor() {
    let cpu = FakeCpuid::default()
        .with(0, 0, (0x1b, le(b"Genu"), le(b"ntel"), le(b"ineI")))
        .with(1, 0, (0x0009_06ea, 0, 0x7ffa_fbff, 0xbfeb_fbff));
    let features = decode_features(&cpu);
    assert!(features.contains(&"sse4.2"));
    assert!(!features.contains(&"hypervisor"));
    assert_eq!(hypervisor_signature(&cpu, &features), None);
    assert_eq!(cpu.brand_string(), None);
}

#[test]
fn unknown_hypervisor_passes_through() {
    let cpu = FakeCpuid::default()
        .with(0, 0, (1, 0, 0, 0))
        .with(1, 0, (0, 0, 1 << 31, 0))
        .with(0x4000_0000, 0, (0, le(b"Some"), le(b"Fake"), le(b"Hype")));
    let features = decode_features(&cpu);
    let signature = hypervisor_signature(&cpu, &features).unwrap();
    assert_eq!(hypervisor_vendor_name(&signature), "SomeFakeHype");
}

//! Where CPUID register values come from

/// First extended leaf, its EAX holds the highest extended leaf
pub const EXTENDED_BASE: u32 = 0x8000_0000;

/// Leaf that holds the hypervisor vendor signature
pub const HYPERVISOR_LEAF: u32 = 0x4000_0000;

/// The result of a CPUID invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Registers {
    pub eax: u32,
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
}

impl Registers {
    pub const fn new(eax: u32, ebx: u32, ecx: u32, edx: u32) -> Self {
        Self { eax, ebx, ecx, edx }
    }

    /// Retrieve one register
    pub fn get(&self, register: Register) -> u32 {
        match register {
            Register::Eax => self.eax,
            Register::Ebx => self.ebx,
            Register::Ecx => self.ecx,
            Register::Edx => self.edx,
        }
    }
}

impl From<(u32, u32, u32, u32)> for Registers {
    fn from((eax, ebx, ecx, edx): (u32, u32, u32, u32)) -> Self {
        Self { eax, ebx, ecx, edx }
    }
}

/// One of the four output registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Register {
    Eax,
    Ebx,
    Ecx,
    Edx,
}

/// Registers as text, four little endian bytes per register
///
/// Every byte becomes one `char`, NUL bytes included.
pub(crate) fn registers_to_string(registers: &[u32]) -> String {
    registers
        .iter()
        .flat_map(|reg| reg.to_le_bytes())
        .map(char::from)
        .collect()
}

/// Something that can answer CPUID queries
pub trait CpuidSource {
    /// Return the registers for a (leaf, sub-leaf) query
    fn query(&self, leaf: u32, subleaf: u32) -> Registers;

    /// The maximum supported standard (`0x0000_xxxx`) leaf
    fn max_standard_leaf(&self) -> u32 {
        self.query(0, 0).eax
    }

    /// The maximum supported extended (`0x8000_xxxx`) leaf
    fn max_extended_leaf(&self) -> u32 {
        self.query(EXTENDED_BASE, 0).eax
    }

    /// Vendor identification, such as `GenuineIntel`
    fn vendor_string(&self) -> String {
        let regs = self.query(0, 0);
        registers_to_string(&[regs.ebx, regs.edx, regs.ecx])
            .trim_end_matches('\0')
            .to_owned()
    }

    /// The processor brand string, if the CPU has one
    fn brand_string(&self) -> Option<String> {
        if self.max_extended_leaf() < EXTENDED_BASE + 4 {
            return None;
        }
        let registers: Vec<u32> = (2..=4)
            .map(|n| self.query(EXTENDED_BASE + n, 0))
            .flat_map(|r| [r.eax, r.ebx, r.ecx, r.edx])
            .collect();
        let brand = registers_to_string(&registers);
        Some(brand.trim_matches(|c: char| c == '\0' || c.is_whitespace()).to_owned())
    }
}

impl<S: CpuidSource + ?Sized> CpuidSource for &S {
    fn query(&self, leaf: u32, subleaf: u32) -> Registers {
        (**self).query(leaf, subleaf)
    }
}

/// CPUID source backed by the CPUID instruction of the running CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCpuid {
    _private: (),
}

impl NativeCpuid {
    /// Returns `None` on architectures without CPUID
    pub fn new() -> Option<Self> {
        if cfg!(any(target_arch = "x86", target_arch = "x86_64")) {
            Some(Self { _private: () })
        } else {
            None
        }
    }
}

impl CpuidSource for NativeCpuid {
    fn query(&self, leaf: u32, subleaf: u32) -> Registers {
        native::cpuid_count(leaf, subleaf)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod native {
    #[cfg(target_arch = "x86")]
    use std::arch::x86::__cpuid_count;
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::__cpuid_count;

    use super::Registers;

    #[allow(unused_unsafe)]
    pub(super) fn cpuid_count(leaf: u32, subleaf: u32) -> Registers {
        // SAFETY: CPUID is available on every CPU Rust supports for these
        // targets and has no side effects.
        let result = unsafe { __cpuid_count(leaf, subleaf) };
        Registers::new(result.eax, result.ebx, result.ecx, result.edx)
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
mod native {
    use super::Registers;

    pub(super) fn cpuid_count(_leaf: u32, _subleaf: u32) -> Registers {
        Registers::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixed;

    impl CpuidSource for Fixed {
        fn query(&self, leaf: u32, _subleaf: u32) -> Registers {
            match leaf {
                // "GenuineIntel"
                0 => Registers::new(0x20, 0x756e_6547, 0x6c65_746e, 0x4965_6e69),
                EXTENDED_BASE => Registers::new(0x8000_0004, 0, 0, 0),
                0x8000_0002 => Registers::new(
                    u32::from_le_bytes(*b"  In"),
                    u32::from_le_bytes(*b"tel("),
                    u32::from_le_bytes(*b"R) C"),
                    u32::from_le_bytes(*b"ore("),
                ),
                0x8000_0003 => Registers::new(
                    u32::from_le_bytes(*b"TM) "),
                    u32::from_le_bytes(*b"i7\0\0"),
                    0,
                    0,
                ),
                _ => Registers::default(),
            }
        }
    }

    #[test]
    fn test_identification() {
        assert_eq!(Fixed.max_standard_leaf(), 0x20);
        assert_eq!(Fixed.vendor_string(), "GenuineIntel");
        assert_eq!(
            Fixed.brand_string().as_deref(),
            Some("Intel(R) Core(TM) i7")
        );
    }

    #[test]
    fn test_registers_to_string_keeps_nul() {
        let text = registers_to_string(&[u32::from_le_bytes(*b"Jail"), 0x0000_0000]);
        assert_eq!(text, "Jail\0\0\0\0");
    }

    #[test]
    fn test_register_display() {
        assert_eq!(Register::Ecx.to_string(), "ECX");
        assert_eq!(Registers::from((1, 2, 3, 4)).get(Register::Edx), 4);
    }
}

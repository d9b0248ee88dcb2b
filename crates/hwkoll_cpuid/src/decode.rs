//! Turning register dumps into feature names

use crate::source::CpuidSource;
use crate::source::EXTENDED_BASE;
use crate::source::HYPERVISOR_LEAF;
use crate::source::registers_to_string;
use crate::tables::COMPOSITE;
use crate::tables::COMPOSITE_WIDTH;
use crate::tables::LAYOUTS;
use crate::tables::LeafLayout;
use crate::tables::RESERVED;

/// Append the features set in `value` to `out`
///
/// Names already in `out` are not added again.
pub(crate) fn decode_register(value: u32, names: &[&'static str], out: &mut Vec<&'static str>) {
    let mut bit = 0;
    while bit < 32 {
        let Some(&name) = names.get(bit) else {
            break;
        };
        if name == COMPOSITE {
            let mask = (1u32 << COMPOSITE_WIDTH) - 1;
            let field = (value >> bit) & mask;
            if field != 0 && !out.contains(&name) {
                out.push(name);
            }
            bit += COMPOSITE_WIDTH;
            continue;
        }
        if value & (1 << bit) != 0 && !name.contains(RESERVED) && !out.contains(&name) {
            out.push(name);
        }
        bit += 1;
    }
}

fn is_available(leaf: u32, max_standard: u32, max_extended: u32) -> bool {
    if leaf >= EXTENDED_BASE {
        leaf <= max_extended
    } else {
        leaf >= 1 && leaf <= max_standard
    }
}

/// Decode using an explicit set of layouts
pub(crate) fn decode_with_layouts<S: CpuidSource + ?Sized>(
    source: &S,
    layouts: &[LeafLayout],
) -> Vec<&'static str> {
    let max_standard = source.max_standard_leaf();
    let max_extended = source.max_extended_leaf();
    let mut features = vec![];
    for layout in layouts {
        if !is_available(layout.leaf, max_standard, max_extended) {
            tracing::trace!(
                leaf = layout.leaf,
                subleaf = layout.subleaf,
                "Leaf not supported, skipping"
            );
            continue;
        }
        let registers = source.query(layout.leaf, layout.subleaf);
        for (register, names) in layout.registers {
            decode_register(registers.get(*register), names, &mut features);
        }
    }
    features
}

/// Decode all known feature flags
///
/// The result is in table order (leaf 1, `0x8000_0001`, leaf 7 sub-leaves 0
/// to 2) and contains each name at most once.
pub fn decode_features<S: CpuidSource + ?Sized>(source: &S) -> Vec<&'static str> {
    decode_with_layouts(source, LAYOUTS)
}

/// Raw 12 character hypervisor signature
///
/// Only read when `features` contains `hypervisor`, otherwise `None`.
pub fn hypervisor_signature<S: CpuidSource + ?Sized>(
    source: &S,
    features: &[&str],
) -> Option<String> {
    if !features.contains(&"hypervisor") {
        return None;
    }
    let regs = source.query(HYPERVISOR_LEAF, 0);
    Some(registers_to_string(&[regs.ebx, regs.ecx, regs.edx]))
}

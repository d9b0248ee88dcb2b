//! Bit position to feature name tables
//!
//! Each table is indexed by bit position. Names containing `reserved` mark
//! bits that are never reported.

use crate::source::Register;

/// Name of the one feature that spans several bits
pub(crate) const COMPOSITE: &str = "mawau";

/// Width in bits of [`COMPOSITE`]
pub(crate) const COMPOSITE_WIDTH: usize = 5;

/// Marker for bits that are never reported
pub(crate) const RESERVED: &str = "reserved";

/// Feature names of the registers of one (leaf, sub-leaf) query
#[derive(Debug, Clone, Copy)]
pub struct LeafLayout {
    pub leaf: u32,
    pub subleaf: u32,
    pub registers: &'static [(Register, &'static [&'static str])],
}

/// All layouts, in decoding order
pub const LAYOUTS: &[LeafLayout] = &[
    LeafLayout {
        leaf: 0x0000_0001,
        subleaf: 0,
        registers: &[(Register::Edx, LEAF1_EDX), (Register::Ecx, LEAF1_ECX)],
    },
    LeafLayout {
        leaf: 0x8000_0001,
        subleaf: 0,
        registers: &[(Register::Edx, EXT1_EDX), (Register::Ecx, EXT1_ECX)],
    },
    LeafLayout {
        leaf: 0x0000_0007,
        subleaf: 0,
        registers: &[
            (Register::Ebx, LEAF7_0_EBX),
            (Register::Ecx, LEAF7_0_ECX),
            (Register::Edx, LEAF7_0_EDX),
        ],
    },
    LeafLayout {
        leaf: 0x0000_0007,
        subleaf: 1,
        registers: &[
            (Register::Eax, LEAF7_1_EAX),
            (Register::Ebx, LEAF7_1_EBX),
            (Register::Ecx, LEAF7_1_ECX),
            (Register::Edx, LEAF7_1_EDX),
        ],
    },
    LeafLayout {
        leaf: 0x0000_0007,
        subleaf: 2,
        registers: &[(Register::Edx, LEAF7_2_EDX)],
    },
];

const LEAF1_EDX: &[&str] = &[
    "fpu",
    "vme",
    "de",
    "pse",
    "tsc",
    "msr",
    "pae",
    "mce",
    "cx8",
    "apic",
    "mtrr_reserved",
    "sep",
    "mtrr",
    "pge",
    "mca",
    "cmov",
    "pat",
    "pse-36",
    "psn",
    "clfsh",
    "nx",
    "ds",
    "acpi",
    "mmx",
    "fxsr",
    "sse",
    "sse2",
    "ss",
    "htt",
    "tm",
    "ia64",
    "pbe",
];

const LEAF1_ECX: &[&str] = &[
    "sse3",
    "pclmulqdq",
    "dtes64",
    "monitor",
    "ds-cpl",
    "vmx",
    "smx",
    "est",
    "tm2",
    "ssse3",
    "cnxt-id",
    "sdbg",
    "fma",
    "cx16",
    "xtpr",
    "pdcm",
    "pchnl",
    "pcid",
    "dca",
    "sse4.1",
    "sse4.2",
    "x2apic",
    "movbe",
    "popcnt",
    "tsc-deadline",
    "aes-ni",
    "xsave",
    "osxsave",
    "avx",
    "f16c",
    "rdrnd",
    "hypervisor",
];

const EXT1_EDX: &[&str] = &[
    "fpu",
    "vme",
    "de",
    "pse",
    "tsc",
    "msr",
    "pae",
    "mce",
    "cx8",
    "apic",
    "syscall_k6",
    "syscall",
    "mtrr",
    "pge",
    "mca",
    "cmov",
    "pat",
    "pse-36",
    "a1d_reserved18",
    "ecc",
    "nx",
    "a1d_reserved21",
    "mmxext",
    "mmx",
    "fxsr",
    "fxsr_opt",
    "pdpe1gb",
    "rdtscp",
    "a1d_reserved28",
    "lm",
    "3dnowext",
    "3dnow",
];

const EXT1_ECX: &[&str] = &[
    "lahf_lm",
    "cmp_legacy",
    "svm",
    "extapic",
    "cr8_legacy",
    "abm/lzcnt",
    "sse4a",
    "misalignsse",
    "3dnowprefetch",
    "osvw",
    "ibs",
    "xop",
    "skinit",
    "wdt",
    "a1c_reserved14",
    "lwp",
    "fma4",
    "tce",
    "a1c_reserved18",
    "nodeid_msr",
    "a1c_reserved20",
    "tbm",
    "topoext",
    "perfctr_core",
    "perfctr_nb",
    "streamperfmon",
    "dbx",
    "perftsc",
    "pcx_l2i",
    "monitorx",
    "addr_mask_ext",
    "a1c_reserved31",
];

const LEAF7_0_EBX: &[&str] = &[
    "fsgsbase",
    "ia32_tsc_adjust_msr",
    "sgx",
    "bmi1",
    "hle",
    "avx2",
    "fdp-excptn-only",
    "smep",
    "bmi2",
    "erms",
    "invpcid",
    "rtm",
    "rdt-m/pqm",
    "fpucsds",
    "mpx",
    "rdt-a/pqe",
    "avx512-f",
    "avx512-dq",
    "rdseed",
    "adx",
    "smap",
    "avx512-ifma",
    "pcommit",
    "clflushopt",
    "clwb",
    "pt",
    "avx512-pf",
    "avx512-er",
    "avx512-cd",
    "sha",
    "avx512-bw",
    "avx512-vl",
];

const LEAF7_0_ECX: &[&str] = &[
    "prefetchwt1",
    "avx512-vbmi",
    "umip",
    "pku",
    "ospke",
    "waitpkg",
    "avx512-vbmi2",
    "cet_ss/shstk",
    "gfni",
    "vaes",
    "vpclmulqdq",
    "avx512-vnni",
    "avx512-bitalg",
    "tme_en",
    "avx512-vpopcntdq",
    "fzm",
    "la57",
    COMPOSITE,
    "a7c0c_reserved18",
    "a7c0c_reserved19",
    "a7c0c_reserved20",
    "a7c0c_reserved21",
    "rdpid",
    "kl",
    "bus-lock-detect",
    "cldemote",
    "mprr",
    "movdiri",
    "movdir64b",
    "enqcmd",
    "sgx-lc",
    "pks",
];

const LEAF7_0_EDX: &[&str] = &[
    "sgx-tem",
    "sgx-keys",
    "avx512-4vnniw",
    "avx512-4fmaps",
    "fsrm",
    "uintr",
    "a7c0d_reserved6",
    "a7c0d_reserved7",
    "avx512-vp2intersect",
    "srbds-ctrl",
    "md-clear",
    "rtm-always-abort",
    "a7c0d_reserved12",
    "rtm-force-abort",
    "serialize",
    "hybrid",
    "tsxldtrk",
    "a7c0d_reserved17",
    "pconfig",
    "lbr",
    "cet-ibt",
    "a7c0d_reserved21",
    "amx-bf16",
    "avx512-fp16",
    "amx-tile",
    "amx-int8",
    "ibrs/spec_ctrl",
    "stibp",
    "l1d_flush",
    "ia32_arch_capabilities_msr",
    "ia32_core_capabilities_msr",
    "ssbd",
];

const LEAF7_1_EAX: &[&str] = &[
    "sha512",
    "sm3",
    "sm4",
    "rao-int",
    "avx-vnni",
    "avx512-bf16",
    "lass",
    "cmpccxadd",
    "archperfmonext",
    "dedup",
    "fzrm",
    "fsrs",
    "rsrcs",
    "a7c1a_reserved13",
    "a7c1a_reserved14",
    "a7c1a_reserved15",
    "a7c1a_reserved16",
    "fred",
    "lkgs",
    "wrmsrns",
    "nmi_src",
    "amx-fp16",
    "hreset",
    "avx-ifma",
    "a7c1a_reserved24",
    "a7c1a_reserved25",
    "lam",
    "msrlist",
    "a7c1a_reserved28",
    "a7c1a_reserved29",
    "invd_disable_post_bios_done",
    "a7c1a_reserved31",
];

const LEAF7_1_EBX: &[&str] = &["pbn", "pbndkb"];

const LEAF7_1_ECX: &[&str] = &[
    "a7c1c_reserved0",
    "a7c1c_reserved1",
    "legacy_reduced_isa",
    "a7c1c_reserved3",
    "sipi64",
];

const LEAF7_1_EDX: &[&str] = &[
    "a7c1d_reserved0",
    "a7c1d_reserved1",
    "a7c1d_reserved2",
    "a7c1d_reserved3",
    "avx-vnni-int8",
    "avx-ne-convert",
    "a7c1d_reserved6",
    "a7c1d_reserved7",
    "amx-complex",
    "a7c1d_reserved9",
    "avx-vnni-int16",
    "a7c1d_reserved11",
    "a7c1d_reserved12",
    "utmr",
    "prefetchi",
    "user_msr",
    "a7c1d_reserved16",
    "uiret-uif-from-rflags",
    "cet-sss",
    "avx10",
    "a7c1d_reserved20",
    "apx_f",
    "a7c1d_reserved22",
    "mwait",
];

const LEAF7_2_EDX: &[&str] = &[
    "psfd",
    "ipred_ctrl",
    "rrsba_ctrl",
    "ddpd_u",
    "bhi_ctrl",
    "mcdt_no",
    "uc_lock_no",
    "monitor_mitg_no",
];

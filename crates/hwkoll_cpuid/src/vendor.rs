//! Display names for CPU and hypervisor vendor signatures

/// CPUID vendor strings and the company they belong to
const CPU_VENDORS: &[(&str, &str)] = &[
    ("AuthenticAMD", "AMD"),
    ("AMDisbetter!", "AMD"),
    ("GenuineIntel", "Intel"),
    ("HygonGenuine", "Hygon"),
    ("CentaurHauls", "Centaur"),
    ("  Shanghai  ", "Zhaoxin"),
    ("GenuineTMx86", "Transmeta"),
    ("TransmetaCPU", "Transmeta"),
    ("CyrixInstead", "Cyrix"),
    ("NexGenDriven", "NexGen"),
    ("UMC UMC UMC ", "UMC"),
    ("SiS SiS SiS ", "SiS"),
    ("RiseRiseRise", "Rise"),
    ("Vortex86 SoC", "DM&P"),
    ("Geode by NSC", "National Semiconductor"),
    ("VIA VIA VIA ", "VIA"),
];

/// Hypervisor signatures from leaf `0x4000_0000`
///
/// VirtualBox has no nicer name than its own signature.
const HYPERVISORS: &[(&str, &str)] = &[
    ("Microsoft Hv", "Microsoft Hyper-V"),
    ("KVMKVMKVM\0\0\0", "KVM"),
    (" KVMKVMKVM  ", "KVM"),
    ("Linux KVM Hv", "Linux KVM Hyper-V emulation"),
    ("bhyve bhyve ", "bhyve"),
    ("BHyVE BHyVE ", "bhyve"),
    ("XenVMMXenVMM", "Xen"),
    ("TCGTCGTCGTCG", "QEMU TCG"),
    (" lrpepyh  vr", "Parallels"),
    (" prl hyperv ", "Parallels"),
    (" lrpepyh vr ", "Parallels"),
    (" QNXQVMBSQG ", "QNX"),
    ("QXNQSBMV", "QNX"),
    ("VMwareVMware", "VMware"),
    ("ACRNACRNACRN", "ACRN"),
    ("VBoxVBoxVBox", "VBoxVBoxVBox"),
    ("___ NVMM ___", "NetBSD NVMM"),
    ("OpenBSDVMM58", "OpenBSD VMM"),
    ("Jailhouse\0\0\0", "Jailhouse"),
    ("HAXMHAXMHAXM", "Intel HAXM"),
    ("EVMMEVMMEVMM", "Intel KGT"),
    ("UnisysSpar64", "Unisys s-Par"),
    ("SRESRESRESRE", "Lockheed Martin LMHS"),
];

/// Company name for a CPUID vendor string such as `GenuineIntel`
///
/// Returns `None` for vendor strings not in the table.
pub fn cpu_vendor_name(cpuid_vendor: &str) -> Option<&'static str> {
    CPU_VENDORS
        .iter()
        .find(|(signature, _)| *signature == cpuid_vendor)
        .map(|(_, name)| *name)
}

/// Display name for a raw hypervisor signature
///
/// Unknown signatures are returned unchanged.
pub fn hypervisor_vendor_name(signature: &str) -> &str {
    HYPERVISORS
        .iter()
        .find(|(known, _)| *known == signature)
        .map_or(signature, |(_, name)| *name)
}

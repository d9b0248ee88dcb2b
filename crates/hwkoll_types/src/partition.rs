//! Partition types and partition table types

use uuid::Uuid;

/// Type of a partition, for both MBR and GPT partition tables
///
/// Values `0x00..=0xff` are MBR type bytes. GPT types that have no MBR
/// equivalent get values from `0x1000_0000` and up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[repr(transparent)]
pub struct PartitionType(u32);

impl PartitionType {
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// True for the MBR type bytes
    #[must_use]
    pub const fn is_mbr(&self) -> bool {
        self.0 <= 0xff
    }
}

macro_rules! partition_types {
    ($($(#[$meta:meta])* $name:ident = $value:literal, $display:literal;)*) => {
        impl PartitionType {
            $(
                $(#[$meta])*
                pub const $name: Self = Self($value);
            )*

            /// Display name, `None` for values without one
            #[must_use]
            pub const fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($display),)*
                    _ => None,
                }
            }
        }
    };
}

partition_types! {
    /// Empty table slot, also the all zero GPT type
    UNALLOCATED = 0x00, "Unallocated";
    FAT12 = 0x01, "FAT12";
    XENIX_ROOT = 0x02, "XENIX root";
    XENIX_USR = 0x03, "XENIX usr";
    FAT16 = 0x04, "FAT16 (<32M)";
    EXTENDED = 0x05, "Extended";
    FAT16B = 0x06, "FAT16";
    /// NTFS, exFAT or HPFS, also Microsoft basic data on GPT
    NTFS = 0x07, "HPFS/NTFS/exFAT";
    AIX = 0x08, "AIX";
    AIX_BOOTABLE = 0x09, "AIX bootable";
    OS2_BOOT_MANAGER = 0x0a, "OS/2 Boot Manager";
    FAT32 = 0x0b, "W95 FAT32";
    FAT32_LBA = 0x0c, "W95 FAT32 (LBA)";
    FAT16_LBA = 0x0e, "W95 FAT16 (LBA)";
    EXTENDED_LBA = 0x0f, "W95 Extended (LBA)";
    OPUS = 0x10, "OPUS";
    HIDDEN_FAT12 = 0x11, "Hidden FAT12";
    COMPAQ_DIAGNOSTICS = 0x12, "Compaq diagnostics";
    HIDDEN_FAT16 = 0x14, "Hidden FAT16 <32M";
    HIDDEN_FAT16B = 0x16, "Hidden FAT16";
    HIDDEN_NTFS = 0x17, "Hidden HPFS/NTFS";
    AST_SMART_SLEEP = 0x18, "AST SmartSleep";
    HIDDEN_FAT32 = 0x1b, "Hidden W95 FAT32";
    HIDDEN_FAT32_LBA = 0x1c, "Hidden W95 FAT32 (LBA)";
    HIDDEN_FAT16_LBA = 0x1e, "Hidden W95 FAT16 (LBA)";
    NEC_DOS = 0x24, "NEC DOS";
    WINDOWS_RECOVERY = 0x27, "Hidden NTFS WinRE";
    PLAN9 = 0x39, "Plan 9";
    PARTITION_MAGIC = 0x3c, "PartitionMagic recovery";
    VENIX = 0x40, "Venix 80286";
    PPC_PREP_BOOT = 0x41, "PPC PReP Boot";
    /// Secure file system, also Windows LDM on GPT
    SFS = 0x42, "SFS";
    QNX4 = 0x4d, "QNX4.x";
    QNX4_SECOND = 0x4e, "QNX4.x 2nd part";
    QNX4_THIRD = 0x4f, "QNX4.x 3rd part";
    ONTRACK_DM = 0x50, "OnTrack DM";
    ONTRACK_DM6_AUX1 = 0x51, "OnTrack DM6 Aux1";
    CPM = 0x52, "CP/M";
    ONTRACK_DM6_AUX3 = 0x53, "OnTrack DM6 Aux3";
    ONTRACK_DM6 = 0x54, "OnTrackDM6";
    EZ_DRIVE = 0x55, "EZ-Drive";
    GOLDEN_BOW = 0x56, "Golden Bow";
    PRIAM_EDISK = 0x5c, "Priam Edisk";
    SPEEDSTOR = 0x61, "SpeedStor";
    GNU_HURD = 0x63, "GNU HURD or SysV";
    NOVELL_NETWARE_286 = 0x64, "Novell Netware 286";
    NOVELL_NETWARE_386 = 0x65, "Novell Netware 386";
    DISK_SECURE = 0x70, "DiskSecure Multi-Boot";
    PC_IX = 0x75, "PC/IX";
    OLD_MINIX = 0x80, "Old Minix";
    MINIX = 0x81, "Minix / old Linux";
    /// Linux swap, also Solaris
    SWAP_OR_SOLARIS = 0x82, "Linux swap / Solaris";
    LINUX = 0x83, "Linux";
    OS2_HIDDEN = 0x84, "OS/2 hidden or Intel hibernation";
    LINUX_EXTENDED = 0x85, "Linux extended";
    NTFS_VOLUME_SET = 0x86, "NTFS volume set";
    NTFS_VOLUME_SET_2 = 0x87, "NTFS volume set";
    LINUX_PLAINTEXT = 0x88, "Linux plaintext";
    LINUX_LVM = 0x8e, "Linux LVM";
    AMOEBA = 0x93, "Amoeba";
    AMOEBA_BBT = 0x94, "Amoeba BBT";
    BSD_OS = 0x9f, "BSD/OS";
    THINKPAD_HIBERNATION = 0xa0, "IBM Thinkpad hibernation";
    /// FreeBSD, also FreeBSD data on GPT
    BSD386 = 0xa5, "FreeBSD";
    OPENBSD = 0xa6, "OpenBSD";
    NEXTSTEP = 0xa7, "NeXTSTEP";
    MACOSX = 0xa8, "Darwin UFS";
    NETBSD = 0xa9, "NetBSD";
    MACOSX_BOOT = 0xab, "Darwin boot";
    HFS = 0xaf, "HFS / HFS+";
    BSDI_FS = 0xb7, "BSDI fs";
    BSDI_SWAP = 0xb8, "BSDI swap";
    BOOT_WIZARD_HIDDEN = 0xbb, "Boot Wizard hidden";
    ACRONIS_FAT32_LBA = 0xbc, "Acronis FAT32 LBA";
    SOLARIS8_BOOT = 0xbe, "Solaris boot";
    SOLARIS_NEW = 0xbf, "Solaris";
    NTFT = 0xc0, "NTFT";
    DRDOS_FAT12 = 0xc1, "DRDOS/sec (FAT-12)";
    DRDOS_FAT16 = 0xc4, "DRDOS/sec (FAT-16 < 32M)";
    DRDOS_FAT16B = 0xc6, "DRDOS/sec (FAT-16)";
    SYRINX = 0xc7, "Syrinx";
    NON_FS_DATA = 0xda, "Non-FS data";
    CPM_CONCURRENT = 0xdb, "CP/M / CTOS / ...";
    DELL_UTILITY = 0xde, "Dell Utility";
    BOOTIT = 0xdf, "BootIt";
    DOS_ACCESS = 0xe1, "DOS access";
    DOS_READ_ONLY = 0xe3, "DOS R/O";
    SPEEDSTOR_E4 = 0xe4, "SpeedStor";
    /// LUKS, also on GPT
    LUKS = 0xe8, "Linux LUKS";
    BEOS = 0xeb, "BeOS fs";
    GPT_PROTECTIVE = 0xee, "GPT";
    EFI_SYSTEM = 0xef, "EFI (FAT-12/16/32)";
    LINUX_PA_RISC_BOOT = 0xf0, "Linux/PA-RISC boot";
    SPEEDSTOR_F1 = 0xf1, "SpeedStor";
    SPEEDSTOR_F4 = 0xf4, "SpeedStor";
    DOS_SECONDARY = 0xf2, "DOS secondary";
    VMWARE_VMFS = 0xfb, "VMware VMFS";
    VMWARE_VMKCORE = 0xfc, "VMware VMKCORE";
    LINUX_RAID = 0xfd, "Linux raid autodetect";
    LANSTEP = 0xfe, "LANstep";
    XENIX_BBT = 0xff, "BBT";

    GPT_BIOS_BOOT = 0x1000_0000, "BIOS boot";
    GPT_MBR_SCHEME = 0x1000_0001, "MBR partition scheme";
    GPT_HP_UX_DATA = 0x1000_0002, "HP-UX data";
    GPT_HP_UX_SERVICE = 0x1000_0003, "HP-UX service";
    GPT_LINUX_DM_CRYPT = 0x1000_0004, "Linux dm-crypt";
    GPT_FREEBSD_BOOT = 0x1000_0005, "FreeBSD boot";
    GPT_FREEBSD_SWAP = 0x1000_0006, "FreeBSD swap";
    GPT_FREEBSD_UFS = 0x1000_0007, "FreeBSD UFS";
    GPT_FREEBSD_VINUM = 0x1000_0008, "FreeBSD Vinum";
    GPT_FREEBSD_ZFS = 0x1000_0009, "FreeBSD ZFS";
    GPT_MACOS_ZFS = 0x1000_000a, "Apple ZFS";
    GPT_MACOS_ONLINE_RAID = 0x1000_000b, "Apple RAID";
    GPT_MACOS_OFFLINE_RAID = 0x1000_000c, "Apple RAID offline";
    GPT_MACOS_LABEL = 0x1000_000d, "Apple label";
    GPT_MACOS_APPLE_TV_RECOVERY = 0x1000_000e, "Apple TV recovery";
    GPT_SOLARIS_BACKUP = 0x1000_000f, "Solaris backup";
    GPT_SOLARIS_ALTSCTR = 0x1000_0010, "Solaris alternate sector";
    GPT_SOLARIS_RESERVED1 = 0x1000_0011, "Solaris reserved 1";
    GPT_SOLARIS_RESERVED2 = 0x1000_0012, "Solaris reserved 2";
    GPT_SOLARIS_RESERVED3 = 0x1000_0013, "Solaris reserved 3";
    GPT_SOLARIS_RESERVED4 = 0x1000_0014, "Solaris reserved 4";
    GPT_SOLARIS_RESERVED5 = 0x1000_0015, "Solaris reserved 5";
    GPT_NETBSD_SWAP = 0x1000_0016, "NetBSD swap";
    GPT_NETBSD_FFS = 0x1000_0017, "NetBSD FFS";
    GPT_NETBSD_LFS = 0x1000_0018, "NetBSD LFS";
    GPT_NETBSD_RAID = 0x1000_0019, "NetBSD RAID";
    GPT_NETBSD_CONCATENATED = 0x1000_001a, "NetBSD concatenated";
    GPT_NETBSD_ENCRYPTED = 0x1000_001b, "NetBSD encrypted";
    PARELOS_BOOT = 0x1000_001c, "ParelOS boot";
    PARELOS_DATA = 0x1000_001d, "ParelOS data";
    PARELOS_SWAP = 0x1000_001e, "ParelOS swap";

    /// Type identifier that is not recognised
    UNKNOWN = 0xffff_ffff, "Unknown";
}

impl std::fmt::Display for PartitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Unknown ({:#04x})", self.0),
        }
    }
}

/// A partition type identifier as stored in a partition table
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[allow(variant_size_differences)]
pub enum PartitionTypeId {
    /// GPT partition type GUID
    Gpt(Uuid),
    /// MBR system ID byte
    Mbr(u8),
}

impl PartitionTypeId {
    /// Parse the `PARTTYPE` column of `lsblk`
    ///
    /// This is `0x83` style for MBR and a GUID for GPT. Returns `None` for
    /// anything else (including the empty string of unpartitioned devices).
    pub fn from_lsblk(value: &str) -> Option<Self> {
        let value = value.trim();
        match value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
        {
            Some(hex) => u8::from_str_radix(hex, 16).ok().map(Self::Mbr),
            None => Uuid::try_parse(value).ok().map(Self::Gpt),
        }
    }
}

impl From<Uuid> for PartitionTypeId {
    fn from(value: Uuid) -> Self {
        Self::Gpt(value)
    }
}

impl From<u8> for PartitionTypeId {
    fn from(value: u8) -> Self {
        Self::Mbr(value)
    }
}

/// Known GPT type GUIDs, earlier entries win
const GPT_TYPES: &[(Uuid, PartitionType)] = &[
    (Uuid::nil(), PartitionType::UNALLOCATED),
    (
        Uuid::from_u128(0xc12a7328_f81f_11d2_ba4b_00a0c93ec93b),
        PartitionType::EFI_SYSTEM,
    ),
    (
        Uuid::from_u128(0x21686148_6449_6e6f_744e_656564454649),
        PartitionType::GPT_BIOS_BOOT,
    ),
    (
        Uuid::from_u128(0x024dee41_33e7_11d3_9d69_0008c781f39f),
        PartitionType::GPT_MBR_SCHEME,
    ),
    // Microsoft basic data
    (
        Uuid::from_u128(0xebd0a0a2_b9e5_4433_87c0_68b6b72699c7),
        PartitionType::NTFS,
    ),
    // Microsoft reserved
    (
        Uuid::from_u128(0xe3c9e316_0b5c_4db8_817d_f92df00215ae),
        PartitionType::FAT32,
    ),
    // Windows recovery
    (
        Uuid::from_u128(0xde94bba4_06d1_4d40_a16a_bfd50179d6ac),
        PartitionType::FAT32,
    ),
    // LDM metadata
    (
        Uuid::from_u128(0x5808c8aa_7e8f_42e0_85d2_e1e90434cfb3),
        PartitionType::SFS,
    ),
    // LDM data
    (
        Uuid::from_u128(0xaf9b60a0_1431_4f62_bc68_3311714a69ad),
        PartitionType::SFS,
    ),
    (
        Uuid::from_u128(0x75894c1e_3aeb_11d3_b7c1_7b03a0000000),
        PartitionType::GPT_HP_UX_DATA,
    ),
    (
        Uuid::from_u128(0xe2a1e728_32e3_11d6_a682_7b03a0000000),
        PartitionType::GPT_HP_UX_SERVICE,
    ),
    // Linux filesystem
    (
        Uuid::from_u128(0x0fc63daf_8483_4772_8e79_3d69d8477de4),
        PartitionType::LINUX,
    ),
    // Linux root (x86-64)
    (
        Uuid::from_u128(0x4f68bce3_e8cd_4db1_96e7_fbcaf984b709),
        PartitionType::LINUX,
    ),
    (
        Uuid::from_u128(0x0657fd6d_a4ab_43c4_84e5_0933c84b4f4f),
        PartitionType::SWAP_OR_SOLARIS,
    ),
    // Linux /home
    (
        Uuid::from_u128(0x933ac7e1_2eb4_4f13_b844_0e14e2aef915),
        PartitionType::LINUX,
    ),
    // Linux /srv
    (
        Uuid::from_u128(0x3b8f8425_20e0_4f3b_907f_1a25a76f98e8),
        PartitionType::LINUX,
    ),
    // Linux /var
    (
        Uuid::from_u128(0x4d21b016_b534_45c2_a9fb_5c16e091fd2d),
        PartitionType::LINUX,
    ),
    // Linux /var/tmp
    (
        Uuid::from_u128(0x7ec6f557_3bc5_4aca_b293_16ef5df639d1),
        PartitionType::LINUX,
    ),
    (
        Uuid::from_u128(0xe6d6d379_f507_44c2_a23c_238f2a3df928),
        PartitionType::LINUX_LVM,
    ),
    (
        Uuid::from_u128(0xa19d880f_05fc_4d3b_a006_743f0f84911e),
        PartitionType::LINUX_RAID,
    ),
    (
        Uuid::from_u128(0xca7d7ccb_63ed_4c53_861c_1742536059cc),
        PartitionType::LUKS,
    ),
    (
        Uuid::from_u128(0x7ffec5c9_2d00_49b7_8941_3ea10a5586b7),
        PartitionType::GPT_LINUX_DM_CRYPT,
    ),
    (
        Uuid::from_u128(0x83bd6b9d_7f41_11dc_be0b_001560b84f0f),
        PartitionType::GPT_FREEBSD_BOOT,
    ),
    (
        Uuid::from_u128(0x516e7cb4_6ecf_11d6_8ff8_00022d09712b),
        PartitionType::BSD386,
    ),
    (
        Uuid::from_u128(0x516e7cb5_6ecf_11d6_8ff8_00022d09712b),
        PartitionType::GPT_FREEBSD_SWAP,
    ),
    (
        Uuid::from_u128(0x516e7cb6_6ecf_11d6_8ff8_00022d09712b),
        PartitionType::GPT_FREEBSD_UFS,
    ),
    (
        Uuid::from_u128(0x516e7cb8_6ecf_11d6_8ff8_00022d09712b),
        PartitionType::GPT_FREEBSD_VINUM,
    ),
    (
        Uuid::from_u128(0x516e7cba_6ecf_11d6_8ff8_00022d09712b),
        PartitionType::GPT_FREEBSD_ZFS,
    ),
    (
        Uuid::from_u128(0x48465300_0000_11aa_aa11_00306543ecac),
        PartitionType::HFS,
    ),
    (
        Uuid::from_u128(0x55465300_0000_11aa_aa11_00306543ecac),
        PartitionType::MACOSX,
    ),
    // Shared by Apple ZFS and Solaris /usr, the Apple entry comes first
    (
        Uuid::from_u128(0x6a898cc3_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_MACOS_ZFS,
    ),
    (
        Uuid::from_u128(0x52414944_0000_11aa_aa11_00306543ecac),
        PartitionType::GPT_MACOS_ONLINE_RAID,
    ),
    (
        Uuid::from_u128(0x52414944_5f4f_11aa_aa11_00306543ecac),
        PartitionType::GPT_MACOS_OFFLINE_RAID,
    ),
    (
        Uuid::from_u128(0x426f6f74_0000_11aa_aa11_00306543ecac),
        PartitionType::MACOSX_BOOT,
    ),
    (
        Uuid::from_u128(0x4c616265_6c00_11aa_aa11_00306543ecac),
        PartitionType::GPT_MACOS_LABEL,
    ),
    (
        Uuid::from_u128(0x5265636f_7665_11aa_aa11_00306543ecac),
        PartitionType::GPT_MACOS_APPLE_TV_RECOVERY,
    ),
    (
        Uuid::from_u128(0x6a82cb45_1dd2_11b2_99a6_080020736631),
        PartitionType::SOLARIS8_BOOT,
    ),
    // Solaris root
    (
        Uuid::from_u128(0x6a85cf4d_1dd2_11b2_99a6_080020736631),
        PartitionType::SOLARIS_NEW,
    ),
    (
        Uuid::from_u128(0x6a87c46f_1dd2_11b2_99a6_080020736631),
        PartitionType::SWAP_OR_SOLARIS,
    ),
    (
        Uuid::from_u128(0x6a8b642b_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_BACKUP,
    ),
    // Solaris /var
    (
        Uuid::from_u128(0x6a8ef2e9_1dd2_11b2_99a6_080020736631),
        PartitionType::SOLARIS_NEW,
    ),
    // Solaris /home
    (
        Uuid::from_u128(0x6a90ba39_1dd2_11b2_99a6_080020736631),
        PartitionType::SOLARIS_NEW,
    ),
    (
        Uuid::from_u128(0x6a9283a5_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_ALTSCTR,
    ),
    (
        Uuid::from_u128(0x6a945a3b_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_RESERVED1,
    ),
    (
        Uuid::from_u128(0x6a9630d1_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_RESERVED2,
    ),
    (
        Uuid::from_u128(0x6a980767_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_RESERVED3,
    ),
    (
        Uuid::from_u128(0x6a96237f_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_RESERVED4,
    ),
    (
        Uuid::from_u128(0x6a8d2ac7_1dd2_11b2_99a6_080020736631),
        PartitionType::GPT_SOLARIS_RESERVED5,
    ),
    (
        Uuid::from_u128(0x49f48d32_b10e_11dc_b99b_0019d1879648),
        PartitionType::GPT_NETBSD_SWAP,
    ),
    (
        Uuid::from_u128(0x49f48d5a_b10e_11dc_b99b_0019d1879648),
        PartitionType::GPT_NETBSD_FFS,
    ),
    (
        Uuid::from_u128(0x49f48d82_b10e_11dc_b99b_0019d1879648),
        PartitionType::GPT_NETBSD_LFS,
    ),
    (
        Uuid::from_u128(0x49f48daa_b10e_11dc_b99b_0019d1879648),
        PartitionType::GPT_NETBSD_RAID,
    ),
    (
        Uuid::from_u128(0x2db519c4_b10f_11dc_b99b_0019d1879648),
        PartitionType::GPT_NETBSD_CONCATENATED,
    ),
    (
        Uuid::from_u128(0x2db519ec_b10f_11dc_b99b_0019d1879648),
        PartitionType::GPT_NETBSD_ENCRYPTED,
    ),
    (
        Uuid::from_u128(0x03fedbca_aaaa_aaaa_aaaa_3f19aa5c2bb1),
        PartitionType::PARELOS_BOOT,
    ),
    (
        Uuid::from_u128(0x03fedbca_aaaa_aaaa_aaaa_2f19aa5c2bb2),
        PartitionType::PARELOS_DATA,
    ),
    (
        Uuid::from_u128(0x03fedbca_aaaa_aaaa_aaaa_1f19aa5c2bb3),
        PartitionType::PARELOS_SWAP,
    ),
];

/// Map a partition type identifier to a [`PartitionType`]
///
/// Never fails, unrecognised GUIDs give [`PartitionType::UNKNOWN`]. Whether
/// a partition is bootable is not decided here.
#[must_use]
pub fn map_partition_type(id: PartitionTypeId) -> PartitionType {
    match id {
        PartitionTypeId::Mbr(byte) => PartitionType(u32::from(byte)),
        PartitionTypeId::Gpt(guid) => GPT_TYPES
            .iter()
            .find(|(known, _)| *known == guid)
            .map_or(PartitionType::UNKNOWN, |(_, ty)| *ty),
    }
}

/// Kind of partition table on a disk
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PartitionTableType {
    #[strum(to_string = "MBR")]
    Mbr,
    #[strum(to_string = "GPT")]
    Gpt,
    #[strum(to_string = "Apple")]
    Apple,
    #[strum(to_string = "AIX")]
    Aix,
    #[strum(to_string = "Amiga")]
    Amiga,
    #[strum(to_string = "Atari")]
    Atari,
    #[strum(to_string = "BSD")]
    Bsd,
    #[strum(to_string = "DASD")]
    Dasd,
    /// SGI disk volume header
    #[strum(to_string = "DVH")]
    Dvh,
    #[strum(to_string = "PC-98")]
    Pc98,
    #[strum(to_string = "Sun")]
    Sun,
    /// Partitions inside a loop device
    #[strum(to_string = "Loop")]
    Loop,
    /// Recognised by the OS but not by us
    #[strum(to_string = "Other")]
    Other,
    #[strum(to_string = "Unknown")]
    Unknown,
}

impl PartitionTableType {
    /// Parse the `PTTYPE` column of `lsblk`
    #[must_use]
    pub fn from_lsblk(value: &str) -> Self {
        match value.trim() {
            "dos" => Self::Mbr,
            "gpt" => Self::Gpt,
            "mac" => Self::Apple,
            "aix" => Self::Aix,
            "amiga" => Self::Amiga,
            "atari" => Self::Atari,
            "bsd" => Self::Bsd,
            "dasd" => Self::Dasd,
            "sgi" => Self::Dvh,
            "pc98" => Self::Pc98,
            "sun" => Self::Sun,
            "loop" => Self::Loop,
            "" => Self::Unknown,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gpt(value: &str) -> PartitionType {
        map_partition_type(PartitionTypeId::Gpt(Uuid::parse_str(value).unwrap()))
    }

    #[test]
    fn test_gpt() {
        assert_eq!(
            gpt("c12a7328-f81f-11d2-ba4b-00a0c93ec93b"),
            PartitionType::EFI_SYSTEM
        );
        assert_eq!(
            gpt("00000000-0000-0000-0000-000000000000"),
            PartitionType::UNALLOCATED
        );
        assert_eq!(
            gpt("0FC63DAF-8483-4772-8E79-3D69D8477DE4"),
            PartitionType::LINUX
        );
        assert_eq!(
            gpt("6a898cc3-1dd2-11b2-99a6-080020736631"),
            PartitionType::GPT_MACOS_ZFS
        );
        assert_eq!(
            gpt("03fedbca-aaaa-aaaa-aaaa-1f19aa5c2bb3"),
            PartitionType::PARELOS_SWAP
        );
        assert_eq!(
            gpt("01234567-89ab-cdef-0123-456789abcdef"),
            PartitionType::UNKNOWN
        );
    }

    #[test]
    fn test_mbr() {
        let mbr = |byte| map_partition_type(PartitionTypeId::Mbr(byte));
        assert_eq!(mbr(0x83), PartitionType::LINUX);
        assert_eq!(mbr(0xff), PartitionType::XENIX_BBT);
        assert_eq!(mbr(0x00), PartitionType::UNALLOCATED);
        assert_eq!(mbr(0x9a).as_raw(), 0x9a);
        assert!(mbr(0x9a).is_mbr());
        assert!(!PartitionType::GPT_BIOS_BOOT.is_mbr());
    }

    #[test]
    fn test_names() {
        assert_eq!(PartitionType::LINUX.to_string(), "Linux");
        assert_eq!(PartitionType::UNKNOWN.to_string(), "Unknown");
        assert_eq!(PartitionType::new(0x9a).name(), None);
        assert_eq!(PartitionType::new(0x9a).to_string(), "Unknown (0x9a)");
    }

    #[test]
    fn test_from_lsblk() {
        assert_eq!(
            PartitionTypeId::from_lsblk("0x83\n"),
            Some(PartitionTypeId::Mbr(0x83))
        );
        assert_eq!(
            PartitionTypeId::from_lsblk("c12a7328-f81f-11d2-ba4b-00a0c93ec93b"),
            Some(PartitionTypeId::Gpt(Uuid::from_u128(
                0xc12a7328_f81f_11d2_ba4b_00a0c93ec93b
            )))
        );
        assert_eq!(PartitionTypeId::from_lsblk(""), None);
        assert_eq!(PartitionTypeId::from_lsblk("0x1ff"), None);

        assert_eq!(PartitionTableType::from_lsblk("gpt"), PartitionTableType::Gpt);
        assert_eq!(PartitionTableType::from_lsblk("dos"), PartitionTableType::Mbr);
        assert_eq!(PartitionTableType::from_lsblk(""), PartitionTableType::Unknown);
        assert_eq!(
            PartitionTableType::from_lsblk("xenix"),
            PartitionTableType::Other
        );
        assert_eq!(PartitionTableType::Mbr.to_string(), "MBR");
    }

    #[test]
    fn test_gpt_guids_are_unique() {
        let mut seen = vec![];
        for (guid, _) in GPT_TYPES {
            if !seen.contains(guid) {
                seen.push(*guid);
            }
        }
        assert_eq!(seen.len(), GPT_TYPES.len());
    }
}

//! The 32-bit Mach-O header and the CPU type / flag constants reported alongside it.
//!
//! Fields are serialized one by one in native byte order. No byte swapping is done,
//! so the file is assumed to share the host's byte order.

use crate::error::{Error, Result};

pub const MH_MAGIC: u32 = 0xfeedface;

pub const CPU_ARCH_ABI64: u32 = 0x0100_0000;

pub const CPU_TYPE_I386: u32 = 7;
pub const CPU_TYPE_X86_64: u32 = CPU_TYPE_I386 | CPU_ARCH_ABI64;
pub const CPU_TYPE_ARM: u32 = 12;
pub const CPU_TYPE_SPARC: u32 = 14;
pub const CPU_TYPE_POWERPC: u32 = 18;
pub const CPU_TYPE_POWERPC64: u32 = CPU_TYPE_POWERPC | CPU_ARCH_ABI64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuType {
    I386,
    X86_64,
    Arm,
    Sparc,
    PowerPc,
    PowerPc64,
}

impl CpuType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            CPU_TYPE_I386 => Some(Self::I386),
            CPU_TYPE_X86_64 => Some(Self::X86_64),
            CPU_TYPE_ARM => Some(Self::Arm),
            CPU_TYPE_SPARC => Some(Self::Sparc),
            CPU_TYPE_POWERPC => Some(Self::PowerPc),
            CPU_TYPE_POWERPC64 => Some(Self::PowerPc64),
            _ => None,
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::I386 => CPU_TYPE_I386,
            Self::X86_64 => CPU_TYPE_X86_64,
            Self::Arm => CPU_TYPE_ARM,
            Self::Sparc => CPU_TYPE_SPARC,
            Self::PowerPc => CPU_TYPE_POWERPC,
            Self::PowerPc64 => CPU_TYPE_POWERPC64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::I386 => "i386",
            Self::X86_64 => "x86_64",
            Self::Arm => "arm",
            Self::Sparc => "sparc",
            Self::PowerPc => "ppc",
            Self::PowerPc64 => "ppc64",
        }
    }
}

/// Mnemonic of a `flags` bit, as in `<mach-o/loader.h>` without the `MH_` prefix.
pub fn flag_name(bit: u32) -> Option<&'static str> {
    const NAMES: [&str; 26] = [
        "NOUNDEFS",
        "INCRLINK",
        "DYLDLINK",
        "BINDATLOAD",
        "PREBOUND",
        "SPLIT_SEGS",
        "LAZY_INIT",
        "TWOLEVEL",
        "FORCE_FLAT",
        "NOMULTIDEFS",
        "NOFIXPREBINDING",
        "PREBINDABLE",
        "ALLMODSBOUND",
        "SUBSECTIONS_VIA_SYMBOLS",
        "CANONICAL",
        "WEAK_DEFINES",
        "BINDS_TO_WEAK",
        "ALLOW_STACK_EXECUTION",
        "ROOT_SAFE",
        "SETUID_SAFE",
        "NO_REEXPORTED_DYLIBS",
        "PIE",
        "DEAD_STRIPPABLE_DYLIB",
        "HAS_TLV_DESCRIPTORS",
        "NO_HEAP_EXECUTION",
        "APP_EXTENSION_SAFE",
    ];
    NAMES.get(bit as usize).copied()
}

/// Bit positions set in `flags`, counted from the least significant bit.
pub fn set_flag_bits(flags: u32) -> Vec<u32> {
    (0..u32::BITS).filter(|bit| flags & (1 << bit) != 0).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MachHeader {
    pub magic: u32,
    pub cpu_type: u32,
    pub cpu_sub_type: u32,
    pub filetype: u32,
    pub ncmds: u32,
    pub sizeofcmds: u32,
    pub flags: u32,
}

impl MachHeader {
    pub const SIZE: usize = 7 * 4;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(Error::TruncatedInput {
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }

        let mut fields = bytes[..Self::SIZE]
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]));
        let mut next = || fields.next().unwrap_or_default();

        Ok(Self {
            magic: next(),
            cpu_type: next(),
            cpu_sub_type: next(),
            filetype: next(),
            ncmds: next(),
            sizeofcmds: next(),
            flags: next(),
        })
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let fields = [
            self.magic,
            self.cpu_type,
            self.cpu_sub_type,
            self.filetype,
            self.ncmds,
            self.sizeofcmds,
            self.flags,
        ];

        let mut buf = [0u8; Self::SIZE];
        for (chunk, field) in buf.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&field.to_ne_bytes());
        }
        buf
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MH_MAGIC
    }

    pub fn cpu(&self) -> Option<CpuType> {
        CpuType::from_raw(self.cpu_type)
    }

    pub fn is_arm(&self) -> bool {
        self.cpu_type == CpuType::Arm.raw()
    }
}

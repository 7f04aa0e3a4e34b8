use crate::error::{Error, Result};

pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ArmSubtype {
    All = 0,
    V4T = 5,
    V6 = 6,
    V5TEJ = 7,
    XScale = 8,
    V7 = 9,
    V7F = 10,
    V7S = 11,
    V7K = 12,
    V6M = 14,
    V7M = 15,
    V7EM = 16,
}

impl ArmSubtype {
    pub const ALL: [ArmSubtype; 12] = [
        Self::All,
        Self::V4T,
        Self::V6,
        Self::V5TEJ,
        Self::XScale,
        Self::V7,
        Self::V7F,
        Self::V7S,
        Self::V7K,
        Self::V6M,
        Self::V7M,
        Self::V7EM,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "armall",
            Self::V4T => "armv4t",
            Self::V6 => "armv6",
            Self::V5TEJ => "armv5tej",
            Self::XScale => "armxscale",
            Self::V7 => "armv7",
            Self::V7F => "armv7f",
            Self::V7S => "armv7s",
            Self::V7K => "armv7k",
            Self::V6M => "armv6m",
            Self::V7M => "armv7m",
            Self::V7EM => "armv7em",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Canonical name of an ARM subtype code, or `"unknown"`.
pub fn name_of(code: u32) -> &'static str {
    ArmSubtype::from_code(code).map_or(UNKNOWN, ArmSubtype::name)
}

/// Case-sensitive lookup of an ARM subtype name.
pub fn code_of(name: &str) -> Option<u32> {
    ArmSubtype::from_name(name).map(ArmSubtype::code)
}

pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Turns a user supplied subtype into its code.
///
/// Names are tried first. Decimal numbers are only accepted when they match a known
/// ARM subtype, so a typo can't silently produce a nonsensical header.
pub fn resolve(arg: &str) -> Result<u32> {
    if let Some(code) = code_of(arg) {
        return Ok(code);
    }

    if is_numeric(arg) {
        if let Ok(code) = arg.parse::<u32>() {
            if name_of(code) != UNKNOWN {
                return Ok(code);
            }
        }
    }

    Err(Error::InvalidSubtype(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for subtype in ArmSubtype::ALL {
            assert_eq!(code_of(name_of(subtype.code())), Some(subtype.code()));
        }
    }

    #[test]
    fn unknown_codes() {
        for code in [1, 2, 3, 4, 13, 17, 0xffff_ffff] {
            assert_eq!(name_of(code), UNKNOWN);
        }
    }

    #[test]
    fn code_of_is_exact() {
        assert_eq!(code_of("armv7s"), Some(11));
        assert_eq!(code_of("armv4t"), Some(5));
        assert_eq!(code_of("ARMV7S"), None);
        assert_eq!(code_of("armv7s "), None);
        assert_eq!(code_of(""), None);
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric("0"));
        assert!(is_numeric("9"));
        assert!(is_numeric("0123456789"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("-1"));
        assert!(!is_numeric("+9"));
        assert!(!is_numeric("0x9"));
        assert!(!is_numeric("9 "));
    }

    #[test]
    fn resolve_names_and_numbers() {
        assert_eq!(resolve("armv7s").unwrap(), 11);
        assert_eq!(resolve("armall").unwrap(), 0);
        assert_eq!(resolve("11").unwrap(), 11);
        assert_eq!(resolve("0").unwrap(), 0);
        assert_eq!(resolve("016").unwrap(), 16);
    }

    #[test]
    fn resolve_rejects_unlisted() {
        for arg in ["9999", "13", "4294967296", "armv8", "", "v7"] {
            match resolve(arg) {
                Err(Error::InvalidSubtype(s)) => assert_eq!(s, arg),
                other => panic!("{:?} resolved to {:?}", arg, other),
            }
        }
    }
}

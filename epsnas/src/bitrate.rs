//! Bit rate and scale calculators
//!
//! Pure functions turning the 8-bit rate codes of TS 24.008 10.5.6.5 and
//! TS 24.301 9.9.4.2 / 9.9.4.3 into a value with a unit, plus the unit tables
//! of the extended APN-AMBR (9.9.4.29) and extended EPS QoS (9.9.4.30) IEs.

use std::fmt;

/// Unit of a [`BitRate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RateUnit {
    Kbps,
    Mbps,
    Gbps,
    Tbps,
    Pbps,
}

impl RateUnit {
    /// Number of kbps in one unit.
    pub fn kbps_factor(self) -> u64 {
        match self {
            RateUnit::Kbps => 1,
            RateUnit::Mbps => 1_000,
            RateUnit::Gbps => 1_000_000,
            RateUnit::Tbps => 1_000_000_000,
            RateUnit::Pbps => 1_000_000_000_000,
        }
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RateUnit::Kbps => "kbps",
            RateUnit::Mbps => "Mbps",
            RateUnit::Gbps => "Gbps",
            RateUnit::Tbps => "Tbps",
            RateUnit::Pbps => "Pbps",
        };
        f.write_str(s)
    }
}

/// A bit rate as carried on the wire: a value and the unit it was coded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRate {
    pub value: u64,
    pub unit: RateUnit,
}

impl BitRate {
    /// 0 kbps
    pub const ZERO: BitRate = BitRate::kbps(0);

    pub const fn kbps(value: u64) -> Self {
        Self {
            value,
            unit: RateUnit::Kbps,
        }
    }

    pub const fn mbps(value: u64) -> Self {
        Self {
            value,
            unit: RateUnit::Mbps,
        }
    }

    /// Builds `multiplier * value` in `unit`.
    pub fn scaled(value: u64, (multiplier, unit): (u32, RateUnit)) -> Self {
        Self {
            value: value.saturating_mul(u64::from(multiplier)),
            unit,
        }
    }

    /// The rate normalized to kbps (saturating).
    pub fn as_kbps(&self) -> u64 {
        self.value.saturating_mul(self.unit.kbps_factor())
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl fmt::Display for BitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Base bit rate code (TS 24.008 10.5.6.5, maximum/guaranteed bit rate).
///
/// 0 and 255 both map to 0 kbps.
pub fn calc_bitrate(code: u8) -> BitRate {
    let c = u64::from(code);
    match code {
        0x01..=0x3F => BitRate::kbps(c),
        0x40..=0x7F => BitRate::kbps(64 + (c - 0x40) * 8),
        0x80..=0xFE => BitRate::kbps(576 + (c - 0x80) * 64),
        0x00 | 0xFF => BitRate::ZERO,
    }
}

/// Extended bit rate code (8700 kbps up to 256 Mbps). Code 0 means "use the
/// base value" and maps to 0.
pub fn calc_bitrate_ext(code: u8) -> BitRate {
    let c = u64::from(code);
    match code {
        0x00 => BitRate::ZERO,
        0x01..=0x4A => BitRate::kbps(8600 + c * 100),
        0x4B..=0xBA => BitRate::mbps(16 + (c - 0x4A)),
        0xBB..=0xFA => BitRate::mbps(128 + (c - 0xBA) * 2),
        _ => BitRate::mbps(256),
    }
}

/// Extended-2 bit rate code (260 Mbps up to 10 Gbps). Code 0 maps to 0.
pub fn calc_bitrate_ext2(code: u8) -> BitRate {
    let c = u64::from(code);
    match code {
        0x00 => BitRate::ZERO,
        0x01..=0x3D => BitRate::mbps(256 + c * 4),
        0x3E..=0xA1 => BitRate::mbps(500 + (c - 0x3D) * 10),
        0xA2..=0xF6 => BitRate::mbps(1500 + (c - 0xA1) * 100),
        _ => BitRate::mbps(10000),
    }
}

/// Picks the most extended non-zero code: extended-2, then extended, then base.
pub fn eps_qos_rate(base: u8, ext: Option<u8>, ext2: Option<u8>) -> BitRate {
    match (ext, ext2) {
        (_, Some(e2)) if e2 != 0 => calc_bitrate_ext2(e2),
        (Some(e), _) if e != 0 => calc_bitrate_ext(e),
        _ => calc_bitrate(base),
    }
}

/// APN-AMBR rate: the extended-2 octet adds `value * 256 Mbps` on top of the
/// extended value.
pub fn apn_ambr_rate(base: u8, ext: Option<u8>, ext2: Option<u8>) -> BitRate {
    let first = match ext {
        Some(e) if e != 0 => calc_bitrate_ext(e),
        _ => calc_bitrate(base),
    };
    match ext2 {
        Some(e2) if e2 != 0 => {
            let ext_kbps = match ext {
                Some(e) if e != 0 => first.as_kbps(),
                _ => 0,
            };
            let total = u64::from(e2) * 256_000 + ext_kbps;
            if total % 1000 == 0 {
                BitRate::mbps(total / 1000)
            } else {
                BitRate::kbps(total)
            }
        }
        _ => first,
    }
}

fn pow4(exp: u8) -> u32 {
    4u32.pow(u32::from(exp))
}

fn high_units(code: u8) -> (u32, RateUnit) {
    match code {
        0x07..=0x0B => (pow4(code - 0x07), RateUnit::Gbps),
        0x0C..=0x10 => (pow4(code - 0x0C), RateUnit::Tbps),
        0x11..=0x15 => (pow4(code - 0x11), RateUnit::Pbps),
        _ => (256, RateUnit::Pbps),
    }
}

/// Unit of the extended APN-AMBR values (TS 24.301 9.9.4.29).
///
/// Codes 0 to 2 are all read as 1 Mbps.
pub fn get_ext_ambr_unit(code: u8) -> (u32, RateUnit) {
    match code {
        0x00..=0x02 => (1, RateUnit::Mbps),
        0x03..=0x06 => (pow4(code - 0x02), RateUnit::Mbps),
        _ => high_units(code),
    }
}

/// Unit of the extended EPS QoS values (TS 24.301 9.9.4.30).
///
/// Code 0 means "value is not used" and yields a zero multiplier.
pub fn get_ext_eps_qos_unit(code: u8) -> (u32, RateUnit) {
    match code {
        0x00 => (0, RateUnit::Kbps),
        0x01 => (200, RateUnit::Kbps),
        0x02..=0x06 => (pow4(code - 0x02), RateUnit::Mbps),
        _ => high_units(code),
    }
}

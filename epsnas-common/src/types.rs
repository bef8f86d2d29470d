//! Common 3GPP identifiers shared by the NAS decoders.

use std::fmt;
use std::str::FromStr;

/// Public Land Mobile Network identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Plmn {
    /// Mobile Country Code (3 digits, range 0-999)
    pub mcc: u16,
    /// Mobile Network Code (2-3 digits, range 0-999)
    pub mnc: u16,
    /// True if MNC is 3 digits, false if 2 digits
    pub long_mnc: bool,
}

impl Plmn {
    /// Creates a new PLMN with the given MCC and MNC.
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }

    /// Encodes the PLMN to 3GPP format (3 bytes).
    ///
    /// The encoding follows 3GPP TS 24.008 format:
    /// - Byte 0: MCC digit 2 (high nibble) | MCC digit 1 (low nibble)
    /// - Byte 1: MNC digit 3 or 0xF (high nibble) | MCC digit 3 (low nibble)
    /// - Byte 2: MNC digit 2 (high nibble) | MNC digit 1 (low nibble)
    pub fn encode(&self) -> [u8; 3] {
        let mcc = self.mcc;
        let mcc3 = (mcc % 10) as u8;
        let mcc2 = ((mcc % 100) / 10) as u8;
        let mcc1 = ((mcc % 1000) / 100) as u8;

        let mnc = self.mnc;
        let (mnc1, mnc2, mnc3) = if self.long_mnc {
            (
                ((mnc % 1000) / 100) as u8,
                ((mnc % 100) / 10) as u8,
                (mnc % 10) as u8,
            )
        } else {
            (((mnc % 100) / 10) as u8, (mnc % 10) as u8, 0x0F)
        };

        [(mcc2 << 4) | mcc1, (mnc3 << 4) | mcc3, (mnc2 << 4) | mnc1]
    }

    /// Decodes a PLMN from 3GPP format (3 bytes).
    ///
    /// Filler or non-decimal digits are kept as-is (a capture may carry
    /// 0xF fillers in unexpected places); [`Plmn::has_valid_digits`] tells
    /// whether every digit was decimal.
    pub fn decode(bytes: [u8; 3]) -> Self {
        let [octet1, octet2, octet3] = bytes;

        let mcc1 = (octet1 & 0x0F) as u16;
        let mcc2 = ((octet1 >> 4) & 0x0F) as u16;
        let mcc3 = (octet2 & 0x0F) as u16;
        let mcc = 100 * mcc1 + 10 * mcc2 + mcc3;

        let mnc3 = (octet2 >> 4) & 0x0F;
        let mnc1 = (octet3 & 0x0F) as u16;
        let mnc2 = ((octet3 >> 4) & 0x0F) as u16;

        let (mnc, long_mnc) = if mnc3 != 0x0F {
            (10 * (10 * mnc1 + mnc2) + mnc3 as u16, true)
        } else {
            (10 * mnc1 + mnc2, false)
        };

        Self { mcc, mnc, long_mnc }
    }

    /// Returns true if all decoded digits are in the range 0-9.
    pub fn has_valid_digits(&self) -> bool {
        self.mcc <= 999 && self.mnc <= 999
    }
}

impl fmt::Debug for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plmn({self})")
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "{:03}-{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}-{:02}", self.mcc, self.mnc)
        }
    }
}

/// Tracking Area Identity (PLMN + 16-bit TAC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tai {
    /// PLMN identity
    pub plmn: Plmn,
    /// Tracking area code
    pub tac: u16,
}

impl Tai {
    /// Creates a new TAI.
    pub const fn new(plmn: Plmn, tac: u16) -> Self {
        Self { plmn, tac }
    }
}

impl fmt::Display for Tai {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/0x{:04x}", self.plmn, self.tac)
    }
}

/// Link direction of a captured NAS message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// UE to network
    Uplink,
    /// Network to UE
    Downlink,
    /// Capture carries no direction metadata
    #[default]
    Unknown,
}

impl Direction {
    /// Direction bit used in the ciphering counter block (1 = downlink).
    pub fn bit(&self) -> u8 {
        match self {
            Direction::Downlink => 1,
            Direction::Uplink | Direction::Unknown => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Uplink => write!(f, "UL"),
            Direction::Downlink => write!(f, "DL"),
            Direction::Unknown => write!(f, "??"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ul" | "uplink" => Ok(Direction::Uplink),
            "dl" | "downlink" => Ok(Direction::Downlink),
            "unknown" | "?" => Ok(Direction::Unknown),
            _ => Err(format!("unknown direction: {s}")),
        }
    }
}

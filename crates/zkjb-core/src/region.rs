//! # Region Codes
//!
//! The fixed enumeration of hiring regions. One definition, exhaustive
//! `match` everywhere — validation and the CLI share this single list, so
//! independent region lists cannot diverge.

use serde::{Deserialize, Serialize};

/// A hiring region code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegionCode {
    /// North America.
    NA,
    /// Europe.
    EU,
    /// Asia-Pacific.
    APAC,
    /// Latin America.
    LATAM,
    /// Africa.
    AFRICA,
    /// Middle East and North Africa.
    MENA,
}

impl RegionCode {
    /// All region codes, in declaration order.
    pub const ALL: [RegionCode; 6] = [
        RegionCode::NA,
        RegionCode::EU,
        RegionCode::APAC,
        RegionCode::LATAM,
        RegionCode::AFRICA,
        RegionCode::MENA,
    ];

    /// The canonical uppercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionCode::NA => "NA",
            RegionCode::EU => "EU",
            RegionCode::APAC => "APAC",
            RegionCode::LATAM => "LATAM",
            RegionCode::AFRICA => "AFRICA",
            RegionCode::MENA => "MENA",
        }
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RegionCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NA" => Ok(RegionCode::NA),
            "EU" => Ok(RegionCode::EU),
            "APAC" => Ok(RegionCode::APAC),
            "LATAM" => Ok(RegionCode::LATAM),
            "AFRICA" => Ok(RegionCode::AFRICA),
            "MENA" => Ok(RegionCode::MENA),
            other => Err(format!("unknown region code: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn all_codes_roundtrip_from_str() {
        for code in RegionCode::ALL {
            assert_eq!(RegionCode::from_str(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(RegionCode::from_str("apac").unwrap(), RegionCode::APAC);
    }

    #[test]
    fn unknown_code_rejected() {
        assert!(RegionCode::from_str("ANTARCTICA").is_err());
    }

    #[test]
    fn serializes_as_uppercase_string() {
        assert_eq!(serde_json::to_string(&RegionCode::LATAM).unwrap(), "\"LATAM\"");
        let back: RegionCode = serde_json::from_str("\"MENA\"").unwrap();
        assert_eq!(back, RegionCode::MENA);
    }
}

/*!
Raw value formats.

Names are exactly the ones used in drivedb.h and in smartctl's `-v` option, and they are what [`Conv`](enum.Conv.html) is parsed from and displayed as.
*/

use std::fmt;

#[cfg(feature = "serializable")]
use serde::{Serialize, Serializer};

/// How to interpret vendor-specific bytes of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Conv {
	Raw8,
	Raw16,
	Raw48,
	Raw56,
	Raw64,
	Hex48,
	Hex56,
	Hex64,
	/// `raw16(raw16)`
	Raw16OptRaw16,
	/// `raw16(avg16)`
	Raw16OptAvg16,
	/// `raw24(raw8)`
	Raw24OptRaw8,
	/// `raw24/raw24`
	Raw24DivRaw24,
	/// `raw24/raw32`
	Raw24DivRaw32,
	Sec2Hour,
	Min2Hour,
	HalfMin2Hour,
	Msec24Hour32,
	TempMinMax,
	Temp10x,
	/// anything else, kept verbatim for diagnostics
	Unknown(String),
}

impl Conv {
	pub fn as_str(&self) -> &str {
		use self::Conv::*;
		match self {
			Raw8 => "raw8",
			Raw16 => "raw16",
			Raw48 => "raw48",
			Raw56 => "raw56",
			Raw64 => "raw64",
			Hex48 => "hex48",
			Hex56 => "hex56",
			Hex64 => "hex64",
			Raw16OptRaw16 => "raw16(raw16)",
			Raw16OptAvg16 => "raw16(avg16)",
			Raw24OptRaw8 => "raw24(raw8)",
			Raw24DivRaw24 => "raw24/raw24",
			Raw24DivRaw32 => "raw24/raw32",
			Sec2Hour => "sec2hour",
			Min2Hour => "min2hour",
			HalfMin2Hour => "halfmin2hour",
			Msec24Hour32 => "msec24hour32",
			TempMinMax => "tempminmax",
			Temp10x => "temp10x",
			Unknown(s) => s.as_str(),
		}
	}

	/**
	Default order of bytes that make up the raw value, from the most significant to the least one.

	`0`…`5` are vendor-specific bytes, `r` is the reserved byte, `v` and `w` are current and worst values.
	These are taken from `ata_get_attr_raw_value()` in smartmontools' atacmds.cpp, and they're not to be derived from anything.
	*/
	pub fn byte_order(&self) -> &'static str {
		use self::Conv::*;
		match self {
			Raw64 | Hex64 => "543210wv",
			Raw56 | Hex56 | Raw24DivRaw32 | Msec24Hour32 => "r543210",
			_ => "543210",
		}
	}

	pub fn is_known(&self) -> bool {
		!matches!(self, Conv::Unknown(_))
	}
}

impl Default for Conv {
	fn default() -> Self { Conv::Unknown(String::new()) }
}

impl<'a> From<&'a str> for Conv {
	fn from(s: &'a str) -> Self {
		use self::Conv::*;
		match s {
			"raw8" => Raw8,
			"raw16" => Raw16,
			"raw48" => Raw48,
			"raw56" => Raw56,
			"raw64" => Raw64,
			"hex48" => Hex48,
			"hex56" => Hex56,
			"hex64" => Hex64,
			"raw16(raw16)" => Raw16OptRaw16,
			"raw16(avg16)" => Raw16OptAvg16,
			"raw24(raw8)" => Raw24OptRaw8,
			"raw24/raw24" => Raw24DivRaw24,
			"raw24/raw32" => Raw24DivRaw32,
			"sec2hour" => Sec2Hour,
			"min2hour" => Min2Hour,
			"halfmin2hour" => HalfMin2Hour,
			"msec24hour32" => Msec24Hour32,
			"tempminmax" => TempMinMax,
			"temp10x" => Temp10x,
			s => Unknown(s.to_string()),
		}
	}
}

impl ::std::str::FromStr for Conv {
	type Err = ::std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Conv::from(s))
	}
}

impl fmt::Display for Conv {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(feature = "serializable")]
impl Serialize for Conv {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

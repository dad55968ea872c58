/*!
NVMe data structures: SMART / Health Information log page, Identify Controller and Identify Namespace data.

Like everything else in this crate, these are only decoded here; issuing Get Log Page (0x02) and Identify (0x06) admin commands is up to the caller.
Unlike ATA, NVMe defines all of its data structures as little-endian, so there's no byte order to configure.
*/

pub mod log;
pub mod id;
pub mod ns;

use std::fmt;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Short(what: &'static str, actual: usize, expected: usize) {
			display("{} is too short: {} bytes, expected {}", what, actual, expected)
		}
	}
}

fn check_len(what: &'static str, data: &[u8], expected: usize) -> Result<(), Error> {
	if data.len() < expected {
		return Err(Error::Short(what, data.len(), expected));
	}
	Ok(())
}

/// Temperature as NVMe reports it, in Kelvin; 0 means there's no reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kelvin(pub u16);

impl Kelvin {
	pub fn celsius(self) -> Option<i32> {
		if self.0 == 0 { None }
		else { Some(self.0 as i32 - 273) }
	}
}

impl fmt::Display for Kelvin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.celsius() {
			Some(t) => write!(f, "{} Celsius", t),
			None => write!(f, "-"),
		}
	}
}

#[cfg(feature = "serializable")]
impl serde::Serialize for Kelvin {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serde::Serialize::serialize(&self.celsius(), serializer)
	}
}

fn write_field<W: ::std::io::Write, T: fmt::Display>(w: &mut W, label: &str, value: T) -> ::std::io::Result<()> {
	writeln!(w, "{:<34}{}", format!("{}:", label), value)
}

fn with_decimal_size(count: u128, unit: f64) -> String {
	use number_prefix::NumberPrefix;

	match NumberPrefix::decimal(count as f64 * unit) {
		NumberPrefix::Prefixed(p, x) => format!("{} [{:.1} {}B]", count, x, p),
		NumberPrefix::Standalone(x) => format!("{} [{} B]", count, x),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn temperature() {
		assert_eq!(Kelvin(308).celsius(), Some(35));
		assert_eq!(Kelvin(263).to_string(), "-10 Celsius");
		assert_eq!(Kelvin(0).to_string(), "-");
	}

	#[test]
	fn sizes() {
		assert_eq!(with_decimal_size(0, 512_000.), "0 [0 B]");
		assert_eq!(with_decimal_size(2, 512_000.), "2 [1.0 MB]");
	}
}

/*!
Identify Controller data structure (Identify command, CNS 0x01).

Only a handful of fields from the first 520 bytes are decoded, plus power state descriptors. Vendor-specific area is left alone.
*/

use std::fmt;
use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian};

#[cfg(feature = "serializable")]
use serde::Serialize;

use super::{check_len, with_decimal_size, write_field, Error, Kelvin};

pub const ID_LEN: usize = 4096;

const POWER_STATES: usize = 2048;
const POWER_STATE_LEN: usize = 32;

/// Power, in units of 0.0001 W
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Power(pub u32);

impl Power {
	pub fn watts(self) -> f64 {
		self.0 as f64 / 10_000.
	}
}

impl fmt::Display for Power {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (watts, frac) = (self.0 / 10_000, self.0 % 10_000);
		// centiwatt precision is what most drives report
		if frac % 100 == 0 {
			write!(f, "{}.{:02}W", watts, frac / 100)
		} else {
			write!(f, "{}.{:04}W", watts, frac)
		}
	}
}

#[cfg(feature = "serializable")]
impl serde::Serialize for Power {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_f64(self.watts())
	}
}

/// Power state descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct PowerState {
	pub max_power: Power,
	/// controller does not process I/O commands in this state
	pub non_operational: bool,
	/// microseconds
	pub entry_latency: u32,
	/// microseconds
	pub exit_latency: u32,
	/// relative values: the lower, the better
	pub read_throughput: u8,
	pub read_latency: u8,
	pub write_throughput: u8,
	pub write_latency: u8,
	pub idle_power: Option<Power>,
	pub active_power: Option<Power>,
}

// bits 7:6 of the scale byte: 00 not reported, 01 0.0001 W, 10 0.01 W
fn scaled_power(value: u16, scale: u8) -> Option<Power> {
	match scale >> 6 {
		0b01 => Some(Power(value as u32)),
		0b10 => Some(Power(value as u32 * 100)),
		_ => None,
	}
}

fn parse_power_state(d: &[u8]) -> PowerState {
	let flags = d[3];
	let max_power = LittleEndian::read_u16(&d[0..2]) as u32;

	PowerState {
		// max power scale bit: 0.01 W unless set
		max_power: Power(if flags & 1 != 0 { max_power } else { max_power * 100 }),
		non_operational: flags & 2 != 0,
		entry_latency: LittleEndian::read_u32(&d[4..8]),
		exit_latency: LittleEndian::read_u32(&d[8..12]),
		read_throughput: d[12] & 0x1f,
		read_latency: d[13] & 0x1f,
		write_throughput: d[14] & 0x1f,
		write_latency: d[15] & 0x1f,
		idle_power: scaled_power(LittleEndian::read_u16(&d[16..18]), d[18]),
		active_power: scaled_power(LittleEndian::read_u16(&d[20..22]), d[22]),
	}
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Controller {
	pub vendor_id: u16,
	pub subsystem_vendor_id: u16,
	pub serial: String,
	pub model: String,
	pub firmware: String,
	pub ieee_oui: u32,
	/// maximum data transfer size, as a power of two of the minimum memory page size; 0 means no limit
	pub mdts: u8,
	pub controller_id: u16,
	/// `None` for controllers that predate NVMe 1.2
	pub version: Option<(u16, u8)>,
	pub warning_temperature: Kelvin,
	pub critical_temperature: Kelvin,
	/// bytes
	pub total_capacity: u128,
	pub namespaces: u32,
	pub power_states: Vec<PowerState>,
}

// strings are ascii, left-justified and padded with spaces
fn read_string(data: &[u8]) -> String {
	String::from_utf8_lossy(data).trim().to_string()
}

/**
Interprets Identify Controller data.

## Errors

Returns [`Error::Short`](../enum.Error.html) if `data` is shorter than 4096 bytes.
*/
pub fn parse_controller(data: &[u8]) -> Result<Controller, Error> {
	check_len("Identify Controller data", data, ID_LEN)?;

	let version = LittleEndian::read_u32(&data[80..84]);

	Ok(Controller {
		vendor_id: LittleEndian::read_u16(&data[0..2]),
		subsystem_vendor_id: LittleEndian::read_u16(&data[2..4]),
		serial: read_string(&data[4..24]),
		model: read_string(&data[24..64]),
		firmware: read_string(&data[64..72]),
		ieee_oui: LittleEndian::read_u24(&data[73..76]),
		mdts: data[77],
		controller_id: LittleEndian::read_u16(&data[78..80]),
		version: if version == 0 { None } else { Some(((version >> 16) as u16, (version >> 8) as u8)) },
		warning_temperature: Kelvin(LittleEndian::read_u16(&data[266..268])),
		critical_temperature: Kelvin(LittleEndian::read_u16(&data[268..270])),
		total_capacity: LittleEndian::read_u128(&data[280..296]),
		namespaces: LittleEndian::read_u32(&data[516..520]),
		// number of power states is zero-based
		power_states: data[POWER_STATES .. POWER_STATES + 32 * POWER_STATE_LEN]
			.chunks_exact(POWER_STATE_LEN)
			.take(data[263] as usize + 1)
			.map(parse_power_state)
			.collect(),
	})
}

pub fn write_controller<W: Write>(w: &mut W, id: &Controller) -> io::Result<()> {
	write_field(w, "Model number", &id.model)?;
	write_field(w, "Serial number", &id.serial)?;
	write_field(w, "Firmware version", &id.firmware)?;
	write_field(w, "PCI vendor ID", format!("0x{:04x}", id.vendor_id))?;
	write_field(w, "PCI subsystem vendor ID", format!("0x{:04x}", id.subsystem_vendor_id))?;
	write_field(w, "IEEE OUI identifier", format!("0x{:06x}", id.ieee_oui))?;
	write_field(w, "Controller ID", id.controller_id)?;
	if let Some((major, minor)) = id.version {
		write_field(w, "NVMe version", format!("{}.{}", major, minor))?;
	}
	write_field(w, "Number of namespaces", id.namespaces)?;
	if id.total_capacity != 0 {
		write_field(w, "Total NVM capacity", with_decimal_size(id.total_capacity, 1.))?;
	}
	write_field(w, "Max. data transfer size", match id.mdts {
		0 => "unlimited".to_string(),
		n => match 1u64.checked_shl(n as u32) {
			Some(pages) => format!("{} pages", pages),
			None => format!("2^{} pages", n),
		},
	})?;
	write_field(w, "Warning comp. temperature", id.warning_temperature)?;
	write_field(w, "Critical comp. temperature", id.critical_temperature)?;

	writeln!(w)?;
	writeln!(w, "Supported Power States")?;
	write_power_states(w, &id.power_states)
}

pub fn write_power_states<W: Write>(w: &mut W, states: &[PowerState]) -> io::Result<()> {
	writeln!(w, "{:>2} {:<2} {:>9} {:>8} {:>8} {:>3} {:>2} {:>2} {:>2} {:>8} {:>7}",
		"St", "Op", "Max", "Active", "Idle", "RL", "RT", "WL", "WT", "Ent_Lat", "Ex_Lat")?;
	let power = |p: Option<Power>| p.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
	for (i, ps) in states.iter().enumerate() {
		writeln!(w, "{:>2} {:<2} {:>9} {:>8} {:>8} {:>3} {:>2} {:>2} {:>2} {:>8} {:>7}",
			i,
			if ps.non_operational { "-" } else { "+" },
			ps.max_power.to_string(),
			power(ps.active_power),
			power(ps.idle_power),
			ps.read_latency,
			ps.read_throughput,
			ps.write_latency,
			ps.write_throughput,
			ps.entry_latency,
			ps.exit_latency,
		)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Vec<u8> {
		let mut buf = vec![0u8; ID_LEN];
		buf[0..2].copy_from_slice(&0x144du16.to_le_bytes());
		buf[2..4].copy_from_slice(&0x144du16.to_le_bytes());
		buf[4..24].copy_from_slice(b"S4EWNX0N123456      ");
		buf[24..64].copy_from_slice(b"Samsung SSD 970 EVO Plus 500GB          ");
		buf[64..72].copy_from_slice(b"2B2QEXM7");
		buf[73..76].copy_from_slice(&[0x38, 0x25, 0x00]);
		buf[77] = 9;
		buf[78..80].copy_from_slice(&4u16.to_le_bytes());
		buf[80..84].copy_from_slice(&0x0001_0300u32.to_le_bytes());
		buf[266..268].copy_from_slice(&358u16.to_le_bytes());
		buf[268..270].copy_from_slice(&358u16.to_le_bytes());
		buf[280..288].copy_from_slice(&500_107_862_016u64.to_le_bytes());
		buf[516..520].copy_from_slice(&1u32.to_le_bytes());
		// two power states
		buf[263] = 1;
		buf[2048..2050].copy_from_slice(&780u16.to_le_bytes());
		let ps1 = 2048 + 32;
		buf[ps1..ps1 + 2].copy_from_slice(&50u16.to_le_bytes());
		buf[ps1 + 3] = 0b11;
		buf[ps1 + 4..ps1 + 8].copy_from_slice(&2000u32.to_le_bytes());
		buf[ps1 + 8..ps1 + 12].copy_from_slice(&1200u32.to_le_bytes());
		buf[ps1 + 12..ps1 + 16].copy_from_slice(&[4, 4, 4, 4]);
		buf[ps1 + 16..ps1 + 18].copy_from_slice(&50u16.to_le_bytes());
		buf[ps1 + 18] = 0b10 << 6;
		// third descriptor is filled in, but not announced
		buf[2048 + 64] = 0xff;
		buf
	}

	#[test]
	fn fields() {
		let id = parse_controller(&sample()).unwrap();
		assert_eq!(id.vendor_id, 0x144d);
		assert_eq!(id.serial, "S4EWNX0N123456");
		assert_eq!(id.model, "Samsung SSD 970 EVO Plus 500GB");
		assert_eq!(id.firmware, "2B2QEXM7");
		assert_eq!(id.ieee_oui, 0x002538);
		assert_eq!(id.mdts, 9);
		assert_eq!(id.controller_id, 4);
		assert_eq!(id.version, Some((1, 3)));
		assert_eq!(id.warning_temperature.celsius(), Some(85));
		assert_eq!(id.total_capacity, 500_107_862_016);
		assert_eq!(id.namespaces, 1);
		assert_eq!(id.power_states.len(), 2);
	}

	#[test]
	fn power_states() {
		let id = parse_controller(&sample()).unwrap();
		let (ps0, ps1) = (id.power_states[0], id.power_states[1]);
		assert_eq!(ps0.max_power, Power(78_000));
		assert!(!ps0.non_operational);
		assert_eq!(ps0.idle_power, None);
		assert_eq!(ps1.max_power, Power(50));
		assert!(ps1.non_operational);
		assert_eq!((ps1.entry_latency, ps1.exit_latency), (2000, 1200));
		assert_eq!(ps1.idle_power, Some(Power(5000)));
		assert_eq!(ps1.active_power, None);

		assert_eq!(Power(78_000).to_string(), "7.80W");
		assert_eq!(Power(50).to_string(), "0.0050W");
		assert_eq!(Power(5000).watts(), 0.5);

		let mut out = Vec::new();
		write_power_states(&mut out, &id.power_states).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), concat!(
			"St Op       Max   Active     Idle  RL RT WL WT  Ent_Lat  Ex_Lat\n",
			" 0 +      7.80W        -        -   0  0  0  0        0       0\n",
			" 1 -    0.0050W        -    0.50W   4  4  4  4     2000    1200\n",
		));
	}

	#[test]
	fn all_power_states() {
		let mut data = sample();
		data[263] = 0xff;
		assert_eq!(parse_controller(&data).unwrap().power_states.len(), 32);
	}

	#[test]
	fn report() {
		let mut out = Vec::new();
		write_controller(&mut out, &parse_controller(&sample()).unwrap()).unwrap();
		let out = String::from_utf8(out).unwrap();
		assert!(out.contains("IEEE OUI identifier:              0x002538\n"));
		assert!(out.contains("NVMe version:                     1.3\n"));
		assert!(out.contains("Max. data transfer size:          512 pages\n"));
		assert!(out.contains("Total NVM capacity:               500107862016 [500.1 GB]\n"));
	}

	#[test]
	fn short_buffer() {
		assert!(parse_controller(&[0; 512]).is_err());
	}
}

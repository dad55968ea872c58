/*!
SMART / Health Information log page (log identifier 0x02).

```text
offset  size
0       1       critical warning
1       2       composite temperature, K
3       1       available spare, %
4       1       available spare threshold, %
5       1       percentage used
32      16×10   data units read/written, host read/write commands, controller busy time, power cycles,
                power on hours, unsafe shutdowns, media errors, error log entries
192     4       warning composite temperature time, min
196     4       critical composite temperature time, min
200     2×8     temperature sensors 1-8, K
```
*/

use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian};

#[cfg(feature = "serializable")]
use serde::Serialize;

use super::{check_len, with_decimal_size, write_field, Error, Kelvin};

pub const LOG_LEN: usize = 512;

// one data unit is 1000 sectors of 512 bytes each, regardless of the actual sector size
const DATA_UNIT: f64 = 512_000.;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct SmartLog {
	pub critical_warning: u8,
	pub temperature: Kelvin,
	pub available_spare: u8,
	pub available_spare_threshold: u8,
	pub percentage_used: u8,
	pub data_units_read: u128,
	pub data_units_written: u128,
	pub host_read_commands: u128,
	pub host_write_commands: u128,
	/// minutes
	pub controller_busy_time: u128,
	pub power_cycles: u128,
	pub power_on_hours: u128,
	pub unsafe_shutdowns: u128,
	pub media_errors: u128,
	pub error_log_entries: u128,
	/// minutes
	pub warning_temperature_time: u32,
	/// minutes
	pub critical_temperature_time: u32,
	pub temperature_sensors: [Kelvin; 8],
}

impl SmartLog {
	/// Human-readable descriptions of critical warning bits that are set.
	pub fn warnings(&self) -> Vec<&'static str> {
		[
			"available spare capacity is below the threshold",
			"temperature is outside of the allowed range",
			"reliability is degraded due to media or internal errors",
			"media is in read-only mode",
			"volatile memory backup device has failed",
			"persistent memory region is read-only or unreliable",
		].iter()
			.enumerate()
			.filter(|&(bit, _)| self.critical_warning & (1 << bit) != 0)
			.map(|(_, &desc)| desc)
			.collect()
	}
}

/**
Interprets SMART / Health Information log page.

## Errors

Returns [`Error::Short`](../enum.Error.html) if `data` is shorter than 512 bytes.
*/
pub fn parse_smart_log(data: &[u8]) -> Result<SmartLog, Error> {
	check_len("SMART / Health Information log", data, LOG_LEN)?;

	let counter = |i: usize| LittleEndian::read_u128(&data[32 + i * 16 .. 48 + i * 16]);

	let mut temperature_sensors = [Kelvin(0); 8];
	for (i, sensor) in temperature_sensors.iter_mut().enumerate() {
		*sensor = Kelvin(LittleEndian::read_u16(&data[200 + i * 2 ..]));
	}

	Ok(SmartLog {
		critical_warning: data[0],
		temperature: Kelvin(LittleEndian::read_u16(&data[1..3])),
		available_spare: data[3],
		available_spare_threshold: data[4],
		percentage_used: data[5],
		data_units_read: counter(0),
		data_units_written: counter(1),
		host_read_commands: counter(2),
		host_write_commands: counter(3),
		controller_busy_time: counter(4),
		power_cycles: counter(5),
		power_on_hours: counter(6),
		unsafe_shutdowns: counter(7),
		media_errors: counter(8),
		error_log_entries: counter(9),
		warning_temperature_time: LittleEndian::read_u32(&data[192..196]),
		critical_temperature_time: LittleEndian::read_u32(&data[196..200]),
		temperature_sensors,
	})
}

pub fn write_smart_log<W: Write>(w: &mut W, log: &SmartLog) -> io::Result<()> {
	write_field(w, "Critical warning", format!("0x{:02x}", log.critical_warning))?;
	for warning in log.warnings() {
		writeln!(w, "  {}", warning)?;
	}
	write_field(w, "Temperature", log.temperature)?;
	write_field(w, "Available spare", format!("{}%", log.available_spare))?;
	write_field(w, "Available spare threshold", format!("{}%", log.available_spare_threshold))?;
	write_field(w, "Percentage used", format!("{}%", log.percentage_used))?;
	write_field(w, "Data units read", with_decimal_size(log.data_units_read, DATA_UNIT))?;
	write_field(w, "Data units written", with_decimal_size(log.data_units_written, DATA_UNIT))?;
	write_field(w, "Host read commands", log.host_read_commands)?;
	write_field(w, "Host write commands", log.host_write_commands)?;
	write_field(w, "Controller busy time", log.controller_busy_time)?;
	write_field(w, "Power cycles", log.power_cycles)?;
	write_field(w, "Power on hours", log.power_on_hours)?;
	write_field(w, "Unsafe shutdowns", log.unsafe_shutdowns)?;
	write_field(w, "Media and data integrity errors", log.media_errors)?;
	write_field(w, "Error information log entries", log.error_log_entries)?;
	write_field(w, "Warning comp. temperature time", log.warning_temperature_time)?;
	write_field(w, "Critical comp. temperature time", log.critical_temperature_time)?;
	for (i, sensor) in log.temperature_sensors.iter().enumerate() {
		// unimplemented sensors report 0
		if sensor.celsius().is_some() {
			write_field(w, &format!("Temperature sensor {}", i + 1), sensor)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Vec<u8> {
		let mut buf = vec![0u8; LOG_LEN];
		buf[0] = 0b0000_0101;
		buf[1..3].copy_from_slice(&308u16.to_le_bytes());
		buf[3] = 100;
		buf[4] = 10;
		buf[5] = 3;
		// data units read: 2^64 + 1, to make sure all 16 bytes are used
		buf[32] = 1;
		buf[40] = 1;
		// data units written
		buf[48..50].copy_from_slice(&1000u16.to_le_bytes());
		// power on hours
		buf[128..130].copy_from_slice(&4321u16.to_le_bytes());
		buf[192..196].copy_from_slice(&7u32.to_le_bytes());
		buf[202..204].copy_from_slice(&310u16.to_le_bytes());
		buf
	}

	#[test]
	fn fields() {
		let log = parse_smart_log(&sample()).unwrap();
		assert_eq!(log.temperature.celsius(), Some(35));
		assert_eq!(log.available_spare, 100);
		assert_eq!(log.available_spare_threshold, 10);
		assert_eq!(log.percentage_used, 3);
		assert_eq!(log.data_units_read, (1u128 << 64) + 1);
		assert_eq!(log.data_units_written, 1000);
		assert_eq!(log.power_on_hours, 4321);
		assert_eq!(log.warning_temperature_time, 7);
		assert_eq!(log.temperature_sensors[0], Kelvin(0));
		assert_eq!(log.temperature_sensors[1].celsius(), Some(37));
		assert_eq!(log.warnings(), vec![
			"available spare capacity is below the threshold",
			"reliability is degraded due to media or internal errors",
		]);
	}

	#[test]
	fn report() {
		let log = parse_smart_log(&sample()).unwrap();
		let mut out = Vec::new();
		write_smart_log(&mut out, &log).unwrap();
		let out = String::from_utf8(out).unwrap();

		let line = |label: &str| out.lines()
			.find(|l| l.starts_with(label))
			.map(|l| l[label.len()..].trim().to_string());

		assert_eq!(line("Temperature:"), Some("35 Celsius".to_string()));
		assert_eq!(line("Data units written:"), Some("1000 [512.0 MB]".to_string()));
		assert_eq!(line("Power on hours:"), Some("4321".to_string()));
		assert_eq!(line("Temperature sensor 2:"), Some("37 Celsius".to_string()));
		assert_eq!(line("Temperature sensor 1:"), None);
		assert!(out.contains("\n  reliability is degraded"));
		assert!(!out.contains("read-only"));
	}

	#[test]
	fn short_buffer() {
		match parse_smart_log(&[0; 511]) {
			Err(Error::Short(_, 511, 512)) => (),
			x => panic!("unexpected result: {:?}", x),
		}
	}
}

/*!
Decodes the ATA IDENTIFY DEVICE response.

Only the bits the rest of the crate (and the `smart` tool) cares about are decoded:
identification strings, capacity, rotation rate, ATA version and S.M.A.R.T. feature state.
*/

use std::fmt;

#[cfg(feature = "serializable")]
use serde::Serialize;

use crate::utils::Endianness;

/// Size of IDENTIFY DEVICE data, in bytes.
pub const ID_LEN: usize = 512;

/// Width of the model number field (words 27..46), in bytes.
pub const MODEL_LEN: usize = 40;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Short(actual: usize) {
			display("IDENTIFY DEVICE data is too short: {} bytes, expected {}", actual, ID_LEN)
		}
	}
}

fn bytes_to_words(data: &[u8], order: Endianness) -> Vec<u16> {
	data.chunks_exact(2)
		.map(|w| order.read_u16(w))
		.collect()
}

// ATA strings keep the first character in the high byte of each word
fn read_bytes(arr: &[u16], start: usize, fin: usize) -> Vec<u8> {
	let mut output = Vec::with_capacity((fin - start + 1) * 2);

	for w in &arr[start..=fin] {
		output.push((w >> 8) as u8);
		output.push((w & 0xff) as u8);
	}

	output
}

// TODO make sure characters are in the range of 0x20 to (and including) 0x7e
fn read_string(arr: &[u16], start: usize, fin: usize) -> String {
	read_bytes(arr, start, fin).into_iter()
		.map(|b| b as char)
		.collect::<String>()
		.trim()
		.to_string()
}

/**
Pads user-supplied model string to look exactly like the model field as the drive returns it.

Drive database regexes are matched against untrimmed model field, so a model typed by hand has to be padded with spaces in order to get the same results as with the real IDENTIFY DEVICE data.
*/
pub fn model_field(model: &str) -> Vec<u8> {
	let mut field: Vec<u8> = model.bytes().take(MODEL_LEN).collect();
	field.resize(MODEL_LEN, b' ');
	field
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum Ternary {
	Unsupported, Disabled, Enabled
}

impl fmt::Display for Ternary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			Ternary::Unsupported => write!(f, "not supported"),
			Ternary::Disabled    => write!(f, "supported, disabled"),
			Ternary::Enabled     => write!(f, "supported, enabled"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub enum RPM {
	Unknown, NonRotating, RPM(u16)
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Id {
	pub serial: String,
	pub firmware: String,
	pub model: String,

	/// model number field as is, with padding; this is what drivedb regexes are matched against
	#[cfg_attr(feature = "serializable", serde(skip_serializing))]
	pub model_raw: Vec<u8>,

	/// bytes; `None` if sector count and sector size do not make sense together
	pub capacity: Option<u64>,
	pub rpm: RPM,

	pub ata_version: Option<&'static str>,

	pub smart: Ternary,
}

fn is_set(word: u16, bit: usize) -> bool {
	word & (1<<bit) != 0
}

fn make_ternary(data: &[u16], word_sup: usize, bit_sup: usize, word_enabled: usize, bit_enabled: usize) -> Ternary {
	if !is_set(data[word_sup], bit_sup) {
		Ternary::Unsupported
	} else if is_set(data[word_enabled], bit_enabled) {
		Ternary::Enabled
	} else {
		Ternary::Disabled
	}
}

// Table 10 of X3T13/2008D (ATA-3) Revision 7b, January 27, 1997
// Table 28 of T13/1410D (ATA/ATAPI-6) Revision 3b, February 26, 2002
// Table 31 of T13/1699-D (ATA8-ACS) Revision 6a, September 6, 2008
// Table 46 of T13/BSR INCITS 529 (ACS-4) Revision 08, April 28, 2015
fn ata_minor_version(word: u16) -> Option<&'static str> {
	Some(match word {
		0x0001 => "ATA-1 X3T9.2/781D prior to revision 4",
		0x0002 => "ATA-1 published, ANSI X3.221-1994",
		0x0003 => "ATA-1 X3T9.2/781D revision 4",
		0x0004 => "ATA-2 published, ANSI X3.279-1996",
		0x0005 => "ATA-2 X3T10/948D prior to revision 2k",
		0x0006 => "ATA-3 X3T10/2008D revision 1",
		0x0007 => "ATA-2 X3T10/948D revision 2k",
		0x0008 => "ATA-3 X3T10/2008D revision 0",
		0x0009 => "ATA-2 X3T10/948D revision 3",
		0x000a => "ATA-3 published, ANSI X3.298-1997",
		0x000b => "ATA-3 X3T10/2008D revision 6",
		0x000c => "ATA-3 X3T13/2008D revision 7 and 7a",
		0x000d => "ATA/ATAPI-4 X3T13/1153D revision 6",
		0x000e => "ATA/ATAPI-4 T13/1153D revision 13",
		0x000f => "ATA/ATAPI-4 X3T13/1153D revision 7",
		0x0010 => "ATA/ATAPI-4 T13/1153D revision 18",
		0x0011 => "ATA/ATAPI-4 T13/1153D revision 15",
		0x0012 => "ATA/ATAPI-4 published, ANSI NCITS 317-1998",
		0x0013 => "ATA/ATAPI-5 T13/1321D revision 3",
		0x0014 => "ATA/ATAPI-4 T13/1153D revision 14",
		0x0015 => "ATA/ATAPI-5 T13/1321D revision 1",
		0x0016 => "ATA/ATAPI-5 published, ANSI NCITS 340-2000",
		0x0017 => "ATA/ATAPI-4 T13/1153D revision 17",
		0x0018 => "ATA/ATAPI-6 T13/1410D revision 0",
		0x0019 => "ATA/ATAPI-6 T13/1410D revision 3a",
		0x001a => "ATA/ATAPI-7 T13/1532D revision 1",
		0x001b => "ATA/ATAPI-6 T13/1410D revision 2",
		0x001c => "ATA/ATAPI-6 T13/1410D revision 1",
		0x001d => "ATA/ATAPI-7 published, ANSI INCITS 397-2005",
		0x001e => "ATA/ATAPI-7 T13/1532D revision 0",
		0x001f => "ACS-3 T13/2161-D revision 3b",
		0x0021 => "ATA/ATAPI-7 T13/1532D revision 4a",
		0x0022 => "ATA/ATAPI-6 published, ANSI INCITS 361-2002",
		0x0027 => "ATA8-ACS T13/1699-D revision 3c",
		0x0028 => "ATA8-ACS T13/1699-D revision 6",
		0x0029 => "ATA8-ACS T13/1699-D revision 4",
		0x0031 => "ACS-2 T13/2015-D revision 2",
		0x0033 => "ATA8-ACS T13/1699-D revision 3e",
		0x0039 => "ATA8-ACS T13/1699-D revision 4c",
		0x0042 => "ATA8-ACS T13/1699-D revision 3f",
		0x0052 => "ATA8-ACS T13/1699-D revision 3b",
		0x005e => "ACS-4 T13/BSR INCITS 529 revision 5",
		0x006d => "ACS-3 T13/2161-D revision 5",
		0x0082 => "ACS-2 published, ANSI INCITS 482-2012",
		0x0107 => "ATA8-ACS T13/1699-D revision 2d",
		0x010a => "ACS-3 published, ANSI INCITS 522-2014",
		0x0110 => "ACS-2 T13/2015-D revision 3",
		0x011b => "ACS-3 T13/2161-D revision 4",
		// 0x0000 and 0xffff: revision is not reported; everything else is reserved
		_ => return None,
	})
}

pub fn parse_id(data: &[u8], order: Endianness) -> Result<Id, Error> {
	if data.len() < ID_LEN {
		return Err(Error::Short(data.len()));
	}
	let data = bytes_to_words(&data[..ID_LEN], order);

	let sectors = ((data[61] as u64) << 16)
	            +  (data[60] as u64);
	let sectors_48bit = ((data[103] as u64) << 48)
	                  + ((data[102] as u64) << 32)
	                  + ((data[101] as u64) << 16)
	                  +  (data[100] as u64);

	// data[106] is valid if bit 14 is 1 and bit 15 is 0
	let sector_size_valid = data[106] & ((1<<14) + (1<<15)) == (1<<14);

	let sector_size = if sector_size_valid && data[106] & (1<<12) != 0 {
		// logical sector size is >256 words and determined by words 117-118
		(((data[118] as u64) << 16) + (data[117] as u64)) << 1
	} else {
		512
	};

	Ok(Id {
		serial: read_string(&data, 10, 19),
		firmware: read_string(&data, 23, 26),
		model: read_string(&data, 27, 46),
		model_raw: read_bytes(&data, 27, 46),

		capacity: sector_size.checked_mul(if sectors_48bit > 0 { sectors_48bit } else { sectors }),

		rpm: match data[217] {
			0x0001 => RPM::NonRotating,
			// all values except 0x0000 in this range are reserved
			0x0000 | 0xffff | 0x0002..=0x0400 => RPM::Unknown,
			i => RPM::RPM(i),
		},

		// TODO word 80: major revision number compatibility bits (if not 0x0000 nor 0xffff)
		ata_version: ata_minor_version(data[81]),

		smart: make_ternary(&data, 82, 0, 85, 0),
	})
}

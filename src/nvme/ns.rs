/*!
Identify Namespace data structure (Identify command, CNS 0x00).

```text
offset  size
0       8       namespace size, blocks
8       8       namespace capacity, blocks
16      8       namespace utilization, blocks
25      1       number of LBA formats, zero-based
26      1       formatted LBA size (bits 3:0 index the LBA format in use)
48      16      NVM capacity, bytes
104     16      namespace globally unique identifier
120     8       IEEE extended unique identifier
128     4×16    LBA formats
```
*/

use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian};

#[cfg(feature = "serializable")]
use serde::Serialize;

use super::{check_len, with_decimal_size, write_field, Error};

pub const NS_LEN: usize = 4096;

const LBA_FORMATS: usize = 128;
const MAX_LBA_FORMATS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct LbaFormat {
	/// metadata bytes per block
	pub metadata_size: u16,
	/// bytes per block; `None` if the format is not available
	pub data_size: Option<u32>,
	/// 0 is the best performance, 3 is the worst
	pub relative_performance: u8,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct Namespace {
	/// blocks
	pub size: u64,
	/// blocks
	pub capacity: u64,
	/// blocks
	pub utilization: u64,
	/// bytes; 0 if not reported
	pub nvm_capacity: u128,
	pub nguid: [u8; 16],
	pub eui64: [u8; 8],
	/// index of the LBA format in use
	pub formatted_lba: u8,
	pub lba_formats: Vec<LbaFormat>,
}

impl Namespace {
	/// Size of a block in the current format.
	pub fn lba_size(&self) -> Option<u32> {
		self.lba_formats.get(self.formatted_lba as usize)
			.and_then(|f| f.data_size)
	}
}

fn parse_lba_format(d: &[u8]) -> LbaFormat {
	// LBA data size is a power of two; 0 means the format is not supported
	let lbads = d[2] as u32;
	LbaFormat {
		metadata_size: LittleEndian::read_u16(&d[0..2]),
		data_size: if lbads == 0 { None } else { 1u32.checked_shl(lbads) },
		relative_performance: d[3] & 0b11,
	}
}

/**
Interprets Identify Namespace data.

## Errors

Returns [`Error::Short`](../enum.Error.html) if `data` is shorter than 4096 bytes.
*/
pub fn parse_namespace(data: &[u8]) -> Result<Namespace, Error> {
	check_len("Identify Namespace data", data, NS_LEN)?;

	let mut nguid = [0; 16];
	nguid.copy_from_slice(&data[104..120]);
	let mut eui64 = [0; 8];
	eui64.copy_from_slice(&data[120..128]);

	Ok(Namespace {
		size: LittleEndian::read_u64(&data[0..8]),
		capacity: LittleEndian::read_u64(&data[8..16]),
		utilization: LittleEndian::read_u64(&data[16..24]),
		nvm_capacity: LittleEndian::read_u128(&data[48..64]),
		nguid,
		eui64,
		formatted_lba: data[26] & 0x0f,
		lba_formats: data[LBA_FORMATS .. LBA_FORMATS + 4 * MAX_LBA_FORMATS]
			.chunks_exact(4)
			.take(data[25] as usize + 1)
			.map(parse_lba_format)
			.collect(),
	})
}

fn hex(bytes: &[u8]) -> String {
	bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn write_namespace<W: Write>(w: &mut W, ns: &Namespace) -> io::Result<()> {
	let blocks = |count: u64| match ns.lba_size() {
		Some(size) => with_decimal_size(count as u128, size as f64),
		None => count.to_string(),
	};

	write_field(w, "Namespace size", blocks(ns.size))?;
	write_field(w, "Namespace capacity", blocks(ns.capacity))?;
	write_field(w, "Namespace utilization", blocks(ns.utilization))?;
	write_field(w, "Formatted LBA size", match ns.lba_size() {
		Some(size) => size.to_string(),
		None => "-".to_string(),
	})?;
	if ns.nvm_capacity != 0 {
		write_field(w, "NVM capacity", with_decimal_size(ns.nvm_capacity, 1.))?;
	}
	if ns.eui64.iter().any(|&b| b != 0) {
		write_field(w, "IEEE EUI-64", format!("{} {}", hex(&ns.eui64[..3]), hex(&ns.eui64[3..])))?;
	}
	if ns.nguid.iter().any(|&b| b != 0) {
		write_field(w, "Namespace GUID", hex(&ns.nguid))?;
	}

	writeln!(w)?;
	writeln!(w, "Supported LBA Sizes")?;
	writeln!(w, "{:>2} {:<3} {:>5} {:>7} {:>9}", "Id", "Fmt", "Data", "Metadt", "Rel_Perf")?;
	for (i, lbaf) in ns.lba_formats.iter().enumerate() {
		writeln!(w, "{:>2} {:<3} {:>5} {:>7} {:>9}",
			i,
			if i == ns.formatted_lba as usize { "+" } else { "-" },
			lbaf.data_size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
			lbaf.metadata_size,
			lbaf.relative_performance,
		)?;
	}
	Ok(())
}

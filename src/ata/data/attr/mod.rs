/*!
S.M.A.R.T. attribute table, as returned by SMART READ DATA.

```text
offset  size
0       2       data structure revision number
2       12×30   attribute entries
362     149     offline data collection status, self-test status, capabilities etc.
511     1       checksum
```

Every entry is laid out like this:

```text
0       attribute id (0 means there's no attribute in this slot)
1..2    flags
3       current (normalized) value
4       worst value
5..10   vendor-specific raw bytes
11      reserved
```
*/

pub mod conv;
pub mod raw;
pub mod report;

pub use self::conv::Conv;

use crate::utils::Endianness;

/// Number of bytes actually interpreted by [`AttributeTable::parse`](struct.AttributeTable.html#method.parse).
pub const TABLE_LEN: usize = 2 + ENTRY_LEN * ENTRIES;
const ENTRY_LEN: usize = 12;
const ENTRIES: usize = 30;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		MalformedBuffer(actual: usize) {
			display("S.M.A.R.T. data is too short: {} bytes, expected at least {}", actual, TABLE_LEN)
		}
	}
}

/// Single entry of the attribute table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeRecord {
	pub id: u8,
	pub flags: u16,
	pub value: u8,
	pub worst: u8,
	/// vendor-specific bytes; their meaning is defined by the [`Conv`](conv/enum.Conv.html) used to decode them
	pub vendor: [u8; 6],
	pub reserved: u8,
}

impl AttributeRecord {
	fn parse(entry: &[u8], order: Endianness) -> Self {
		let mut vendor = [0; 6];
		vendor.copy_from_slice(&entry[5..11]);

		AttributeRecord {
			id: entry[0],
			flags: order.read_u16(&entry[1..3]),
			value: entry[3],
			worst: entry[4],
			vendor,
			reserved: entry[11],
		}
	}

	// if true, failure is predicted within 24h; otherwise, attribute indicates drive's exceeded intended design life period
	pub fn pre_fail(&self) -> bool { self.flags & (1<<0) != 0 }
	// if false, attribute is only updated during offline data collection
	pub fn online(&self)   -> bool { self.flags & (1<<1) != 0 }
}

#[derive(Debug, Clone)]
pub struct AttributeTable {
	pub version: u16,
	entries: Vec<AttributeRecord>,
}

impl AttributeTable {
	/**
	Interprets SMART READ DATA response.

	`order` is the byte order of multi-byte fields (`flags` and the revision number) in `data`.
	The checksum is not verified.

	## Errors

	Returns [`Error::MalformedBuffer`](enum.Error.html) if `data` is shorter than [`TABLE_LEN`](constant.TABLE_LEN.html).
	*/
	pub fn parse(data: &[u8], order: Endianness) -> Result<Self, Error> {
		if data.len() < TABLE_LEN {
			return Err(Error::MalformedBuffer(data.len()));
		}

		let entries = data[2..TABLE_LEN]
			.chunks_exact(ENTRY_LEN)
			.map(|entry| AttributeRecord::parse(entry, order))
			.collect();

		Ok(AttributeTable {
			version: order.read_u16(&data[0..2]),
			entries,
		})
	}

	/// Iterates over populated entries, stopping at the first one with id 0.
	pub fn iter(&self) -> impl Iterator<Item = &AttributeRecord> {
		self.entries.iter().take_while(|attr| attr.id != 0)
	}

	/// Raw entries, including the unpopulated ones.
	pub fn entries(&self) -> &[AttributeRecord] {
		&self.entries
	}
}

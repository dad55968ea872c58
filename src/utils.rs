use byteorder::{BigEndian, ByteOrder, LittleEndian};

/**
Byte order of multi-byte fields in buffers handed over by the transport.

Devices themselves speak little-endian, but some transports (and some older kernels) hand data over in host order,
so it's up to the caller to say which one is it.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness { Little, Big }

impl Endianness {
	pub fn native() -> Self {
		if cfg!(target_endian = "little") { Endianness::Little }
		else { Endianness::Big }
	}

	pub fn read_u16(&self, buf: &[u8]) -> u16 {
		match self {
			Endianness::Little => LittleEndian::read_u16(buf),
			Endianness::Big => BigEndian::read_u16(buf),
		}
	}

	pub fn read_u32(&self, buf: &[u8]) -> u32 {
		match self {
			Endianness::Little => LittleEndian::read_u32(buf),
			Endianness::Big => BigEndian::read_u32(buf),
		}
	}
}

impl Default for Endianness {
	fn default() -> Self { Endianness::native() }
}

impl ::std::str::FromStr for Endianness {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"native" => Ok(Endianness::native()),
			"little" | "le" => Ok(Endianness::Little),
			"big" | "be" => Ok(Endianness::Big),
			_ => Err(()),
		}
	}
}

pub fn hexdump(data: &[u8]) -> String {
	// 3× len for ' {:02x}'
	// len/16 for \n
	// len/16 for ' ' before ascii
	// len for ascii
	// 2 to "round" (/16)s up and have lesser chance of reallocation
	let mut dump = String::with_capacity(4*data.len() + data.len()/8 + 2);
	let mut ascii = String::with_capacity(16);

	for (i, &b) in data.iter().enumerate() {
		if i % 16 == 0 {
			dump.push(' ');
			dump.push_str(&ascii);
			ascii.truncate(0);
			dump.push('\n');
		}
		dump.push_str(&format!(" {:02x}", b));
		ascii.push(
			if (0x20..0x7f).contains(&b) {
				b as char
			} else {
				// ' ' and '.' are ambiguous, and a string of '�'s is just unreadable
				'░'
			}
		);
	}
	dump.push(' ');
	dump.push_str(&ascii);
	dump.push('\n');
	dump
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_byte_order() {
		let buf = [0x34, 0x12];
		assert_eq!(Endianness::Little.read_u16(&buf), 0x1234);
		assert_eq!(Endianness::Big.read_u16(&buf), 0x3412);
		assert_eq!("BE".parse::<Endianness>(), Ok(Endianness::Big));
		assert!("middle".parse::<Endianness>().is_err());
	}

	#[test]
	fn hexdump_marks_non_printable() {
		let dump = hexdump(b"AB\x00");
		assert!(dump.contains(" 41 42 00"));
		assert!(dump.ends_with(" AB░\n"));
	}
}

/*!
Vendor-specific raw value decoding and rendering.

Raw value is built in two steps, just like smartmontools does it:

1. [`decode`](fn.decode.html) picks bytes of the attribute entry in the order defined by the format and packs them into a single integer,
2. [`format`](fn.format.html) splits that integer back into bytes and words, and renders whatever the format says it should.

Yes, one might think it's much easier to get the bytes right away, but byte order is what drivedb entries and `-v` arguments are written against, so here we go.
*/

use super::{AttributeRecord, Conv};

// `attr` bytes for every char of the byte order string
fn pick(attr: &AttributeRecord, c: char) -> u8 {
	match c {
		'0' => attr.vendor[0],
		'1' => attr.vendor[1],
		'2' => attr.vendor[2],
		'3' => attr.vendor[3],
		'4' => attr.vendor[4],
		'5' => attr.vendor[5],
		'r' => attr.reserved,
		'v' => attr.value,
		'w' => attr.worst,
		// smartmontools defaults to 0 for any unrecognized character
		_ => 0,
	}
}

/// Packs bytes of `attr` into a single value, most significant byte first, according to the default byte order of `conv`.
pub fn decode(attr: &AttributeRecord, conv: &Conv) -> u64 {
	decode_with(attr, conv.byte_order())
}

/**
Same as [`decode`](fn.decode.html), but with explicit byte order, like `r543210` or `543210wv` (see [`Conv::byte_order`](../conv/enum.Conv.html#method.byte_order)).

Only the last 8 characters matter, since the value can't hold more than that.
*/
pub fn decode_with(attr: &AttributeRecord, byte_order: &str) -> u64 {
	byte_order.chars()
		.fold(0, |acc, c| (acc << 8) | pick(attr, c) as u64)
}

/*
This is a chart of all possible raw value interpretations for attributes of type 'tempminmax':
> [5][4][3][2][1][0] raw[]
> [ 2 ] [ 1 ] [ 0 ]  word[]
> xx HH xx LL xx TT (Hitachi/HGST)
> xx LL xx HH xx TT (Kingston SSDs)
> 00 00 HH LL xx TT (Maxtor, Samsung, Seagate, Toshiba)
> 00 00 00 HH LL TT (WDC)
> CC CC HH LL xx TT (WDC, CCCC=over temperature count)
> (xx = 00/ff, possibly sign extension of lower byte)

Nothing in the data tells these apart, so layouts are tried one by one, and the first plausible one wins.
Thresholds below are exactly the ones smartmontools uses; changing them changes the output for real drives.
*/

// 0x11: >= 0, signed byte or word; 0x01: < 0, signed byte; 0x10: < 0, signed word; 0x00: not a temperature
fn check_temp_word(word: u16) -> u8 {
	if word <= 0x7f {
		0x11
	} else if word <= 0xff {
		0x01
	} else if 0xff80 <= word {
		0x10
	} else {
		0x00
	}
}

fn check_temp_range(t: i32, ut1: u8, ut2: u8) -> Option<(i32, i32)> {
	let (t1, t2) = (ut1 as i8 as i32, ut2 as i8 as i32);
	let (lo, hi) = if t1 > t2 { (t2, t1) } else { (t1, t2) };

	if -60 <= lo && lo <= t && t <= hi && hi <= 120 && !(lo == -1 && hi <= 0) {
		Some((lo, hi))
	} else {
		None
	}
}

#[derive(Debug, PartialEq)]
enum Temperature {
	Current,
	MinMax(i32, i32),
	MinMaxCount(i32, i32, u16),
}

fn temperature_layout(raw: &[u8; 6], word: &[u16; 3]) -> Option<Temperature> {
	use self::Temperature::*;

	let t = raw[0] as i8 as i32;
	let ctw0 = check_temp_word(word[0]);

	if word[2] == 0 {
		if word[1] == 0 && ctw0 != 0 {
			// 00 00 00 00 xx TT
			return Some(Current);
		}

		// 00 00 HL LH xx TT
		(if ctw0 != 0 { check_temp_range(t, raw[2], raw[3]) } else { None })
			// 00 00 00 HL LH TT
			.or_else(|| if raw[3] == 0 { check_temp_range(t, raw[1], raw[2]) } else { None })
			.map(|(lo, hi)| MinMax(lo, hi))
	} else if ctw0 != 0 {
		// xx HL xx LH xx TT
		(if ctw0 & check_temp_word(word[1]) & check_temp_word(word[2]) != 0 {
			check_temp_range(t, raw[2], raw[4]).map(|(lo, hi)| MinMax(lo, hi))
		} else { None })
			// CC CC HL LH xx TT
			.or_else(|| if word[2] < 0x7fff {
				check_temp_range(t, raw[2], raw[3])
					.filter(|&(_, hi)| hi >= 40)
					.map(|(lo, hi)| MinMaxCount(lo, hi, word[2]))
			} else { None })
	} else {
		None
	}
}

/**
Renders `value` (as returned by [`decode`](fn.decode.html)) according to `conv`.

Unknown formats are rendered as `?`.
*/
pub fn format(value: u64, conv: &Conv) -> String {
	use self::Conv::*;

	let mut raw = [0u8; 6];
	for (i, b) in raw.iter_mut().enumerate() {
		*b = (value >> (8 * i)) as u8;
	}
	let word = [
		raw[0] as u16 | (raw[1] as u16) << 8,
		raw[2] as u16 | (raw[3] as u16) << 8,
		raw[4] as u16 | (raw[5] as u16) << 8,
	];

	match conv {
		Raw8 => format!("{} {} {} {} {} {}", raw[5], raw[4], raw[3], raw[2], raw[1], raw[0]),
		Raw16 => format!("{} {} {}", word[2], word[1], word[0]),
		Raw48 | Raw56 | Raw64 => value.to_string(),
		Hex48 => format!("0x{:012x}", value),
		Hex56 => format!("0x{:014x}", value),
		Hex64 => format!("0x{:016x}", value),
		Raw16OptRaw16 => {
			let mut s = word[0].to_string();
			if word[1] != 0 || word[2] != 0 {
				s.push_str(&format!(" ({} {})", word[2], word[1]));
			}
			s
		},
		Raw16OptAvg16 => {
			let mut s = word[0].to_string();
			if word[1] != 0 {
				s.push_str(&format!(" (Average {})", word[1]));
			}
			s
		},
		Raw24OptRaw8 => {
			let mut s = (value & 0xff_ffff).to_string();
			if raw[3] != 0 || raw[4] != 0 || raw[5] != 0 {
				s.push_str(&format!(" ({} {} {})", raw[5], raw[4], raw[3]));
			}
			s
		},
		Raw24DivRaw24 => format!("{}/{}", value >> 24, value & 0xff_ffff),
		Raw24DivRaw32 => format!("{}/{}", value >> 32, value & 0xffff_ffff),
		Min2Hour => {
			let minutes = word[0] as u64 + ((word[1] as u64) << 16);
			let mut s = format!("{}h+{:02}m", minutes / 60, minutes % 60);
			if word[2] != 0 {
				s.push_str(&format!(" ({})", word[2]));
			}
			s
		},
		Sec2Hour => {
			let hours = value / 3600;
			let minutes = (value - 3600 * hours) / 60;
			let seconds = value % 60;
			format!("{}h+{:02}m+{:02}s", hours, minutes, seconds)
		},
		HalfMin2Hour => {
			let hours = value / 120;
			let minutes = (value - 120 * hours) / 2;
			format!("{}h+{:02}m", hours, minutes)
		},
		Msec24Hour32 => {
			let hours = value & 0xffff_ffff;
			let milliseconds = value >> 32;
			let seconds = milliseconds / 1000;
			format!("{}h+{:02}m+{:02}.{:03}s", hours, seconds / 60, seconds % 60, milliseconds % 1000)
		},
		TempMinMax => {
			use self::Temperature::*;
			let t = raw[0] as i8;
			match temperature_layout(&raw, &word) {
				Some(Current) => t.to_string(),
				Some(MinMax(lo, hi)) => format!("{} (Min/Max {}/{})", t, lo, hi),
				Some(MinMaxCount(lo, hi, count)) => format!("{} (Min/Max {}/{} #{})", t, lo, hi, count),
				// whatever this might be, show all the bytes as is
				None => format!("{} ({} {} {} {} {})", raw[0], raw[5], raw[4], raw[3], raw[2], raw[1]),
			}
		},
		Temp10x => format!("{}.{}", word[0] / 10, word[0] % 10),
		Unknown(_) => "?".to_string(),
	}
}

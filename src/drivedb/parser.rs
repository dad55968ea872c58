/*!
Parser for smartmontools' `drivedb.h`.

The file is a sequence of C struct initializers, `{ "family", "model", "firmware", "warning", "presets" },`,
with adjacent string literals concatenated the way C compiler does it, and comments anywhere in between.
*/
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till, take_until};
use nom::character::complete::{char, multispace1, none_of, one_of};
use nom::combinator::{eof, map, opt, value};
use nom::multi::{fold_many0, many0, many1};
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::IResult;
use nom::Parser;

fn block_comment(input: &str) -> IResult<&str, ()> {
	value((), (tag("/*"), take_until("*/"), tag("*/"))).parse(input)
}

fn line_comment(input: &str) -> IResult<&str, ()> {
	value((), (tag("//"), take_till(|c: char| c == '\n'), opt(char('\n')))).parse(input)
}

fn whitespace(input: &str) -> IResult<&str, ()> {
	value((), many0(alt((value((), multispace1), line_comment, block_comment)))).parse(input)
}

fn escaped_char(input: &str) -> IResult<&str, char> {
	map(preceded(char('\\'), one_of("\\\"'nrt?")), |c| match c {
		'n' => '\n',
		'r' => '\r',
		't' => '\t',
		c => c,
	}).parse(input)
}

fn string_literal(input: &str) -> IResult<&str, String> {
	delimited(
		char('"'),
		fold_many0(alt((none_of("\n\\\""), escaped_char)), String::new, |mut s, c| { s.push(c); s }),
		char('"'),
	).parse(input)
}

// "foo" "bar" → "foobar"
fn string(input: &str) -> IResult<&str, String> {
	map(
		pair(string_literal, many0(preceded(whitespace, string_literal))),
		|(head, tail)| tail.iter().fold(head, |mut s, part| { s.push_str(part); s }),
	).parse(input)
}

/// drivedb.h entry, exactly as it is written in the file
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	/// > Informal string about the model family/series of a device.
	pub family: String,

	/// > POSIX extended regular expression to match the model of a device.
	/// > This should never be "".
	pub model: String,

	/// > POSIX extended regular expression to match a devices's firmware.
	///
	/// Optional if "".
	pub firmware: String,

	/// > A message that may be displayed for matching drives.
	/// > For example, to inform the user that they may need to apply a firmware patch.
	pub warning: String,

	/// > String with vendor-specific attribute ('-v') and firmware bug fix ('-F') options.
	/// > Same syntax as in smartctl command line.
	pub presets: String,
}

fn comma(input: &str) -> IResult<&str, ()> {
	value((), (whitespace, char(','), whitespace)).parse(input)
}

fn entry(input: &str) -> IResult<&str, Entry> {
	let (input, _) = terminated(char('{'), whitespace).parse(input)?;
	let (input, family) = terminated(string, comma).parse(input)?;
	let (input, model) = terminated(string, comma).parse(input)?;
	let (input, firmware) = terminated(string, comma).parse(input)?;
	let (input, warning) = terminated(string, comma).parse(input)?;
	let (input, presets) = terminated(string, whitespace).parse(input)?;
	// trailing comma after the last field is fine for C compiler, so it's fine for us
	let (input, _) = terminated(opt(char(',')), whitespace).parse(input)?;
	let (input, _) = char('}')(input)?;

	Ok((input, Entry { family, model, firmware, warning, presets }))
}

/// Parses the whole drivedb.h, keeping all the entries in file order.
pub fn database(input: &str) -> IResult<&str, Vec<Entry>> {
	let (input, _) = whitespace(input)?;
	let (input, entries) = many1(terminated(entry, opt(comma))).parse(input)?;
	let (input, _) = whitespace(input)?;
	let (input, _) = eof(input)?;
	Ok((input, entries))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn concatenated_strings() {
		let (rest, s) = string("\"foo\" /* bar */ \"baz\"\n  // qux\n \"\\\\d+\"").unwrap();
		assert_eq!(rest, "");
		assert_eq!(s, "foobaz\\d+");
	}

	#[test]
	fn entries() {
		let db = r#"
/*
 * drivedb.h - smartmontools drive database file
 */
/*
const drive_settings builtin_knowndrives[] = {
 */
  { "$Id: drivedb.h 4842 2018-12-02 16:07:26Z chrfranke $",
    "-", "-",
    "This is a dummy entry to hold the SVN-Id of drivedb.h",
    ""
  },
  { "DEFAULT",
    "-", "",
    "Default settings",
    "-v 9,raw24(raw8),Power_On_Hours " // comment
    "-v 194,tempminmax,Temperature_Celsius"
  },
  { "Seagate Barracuda 7200.14 (AF)", // tested with ST3000DM001-9YN166/CC4B
    "ST(1000|1500|2000|2500|3000)DM00[0-3]-.*",
    "", "",
    "-v 188,raw16 -v 240,msec24hour32"
  },
/*
};
 */
"#;
		let (_, entries) = database(db).unwrap();
		assert_eq!(entries.len(), 3);
		assert!(entries[0].family.starts_with("$Id"));
		assert_eq!(entries[1].family, "DEFAULT");
		assert_eq!(entries[1].presets, "-v 9,raw24(raw8),Power_On_Hours -v 194,tempminmax,Temperature_Celsius");
		assert_eq!(entries[2], Entry {
			family: "Seagate Barracuda 7200.14 (AF)".to_string(),
			model: "ST(1000|1500|2000|2500|3000)DM00[0-3]-.*".to_string(),
			firmware: "".to_string(),
			warning: "".to_string(),
			presets: "-v 188,raw16 -v 240,msec24hour32".to_string(),
		});
	}

	#[test]
	fn comment_at_end_of_file() {
		let db = "{ \"DEFAULT\", \"-\", \"\", \"\", \"-v 9,raw48\" }\n// end of file";
		let (_, entries) = database(db).unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].presets, "-v 9,raw48");
	}

	#[test]
	fn garbage() {
		assert!(database("{ \"DEFAULT\", \"-\" }").is_err());
		assert!(database("").is_err());
		assert!(database("{ \"a\", \"b\", \"c\", \"d\", \"e\" }, int x;").is_err());
	}
}

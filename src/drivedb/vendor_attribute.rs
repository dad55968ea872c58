/*!
Module to parse attribute descriptions.

Attribute descriptions usually come from two sources:

* [drivedb.h](../index.html) entries,
* command-line arguments (`smartctl -v …`).

Format for attribute descriptions is described in [smartctl(8)](https://www.smartmontools.org/browser/trunk/smartmontools/smartctl.8.in) (option `-v`/`--vendorattribute`).
*/
use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{char, digit1};
use nom::combinator::{eof, map, map_res, opt, value};
use nom::sequence::{pair, preceded};
use nom::IResult;
use nom::Parser;

use crate::ata::data::attr::Conv;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Parse(arg: String) {
			display("Unable to parse vendor attribute {:?}", arg)
		}
	}
}

/// SMART attribute description
#[derive(Debug, Clone, PartialEq)]
pub struct VendorAttribute {
	/// id of described attribute, or `None` if description applies to all attributes (`N,…`)
	pub id: Option<u8>,
	/// attribute name
	pub name: Option<String>,
	/// value format, like `raw48` or `tempminmax`
	pub conv: Conv,
	/// custom order of bytes to make value of, if given (`FORMAT:BYTEORDER`)
	pub byte_order: Option<String>,
}

fn attr_id(input: &str) -> IResult<&str, Option<u8>> {
	alt((
		map_res(digit1, |s: &str| s.parse::<u8>().map(Some)),
		value(None, char('N')),
	)).parse(input)
}

// drive type qualifier: parsed for compatibility, but not used for anything
fn drivetype(input: &str) -> IResult<&str, &str> {
	preceded(char(','), alt((tag("HDD"), tag("SSD")))).parse(input)
}

fn parse_standard(input: &str) -> IResult<&str, VendorAttribute> {
	let (input, id) = attr_id(input)?;
	let (input, _) = char(',')(input)?;
	let (input, format) = take_till1(|c| c == ',' || c == ':')(input)?;
	let (input, byte_order) = opt(preceded(char(':'), take_till1(|c| c == ','))).parse(input)?;
	let (input, name) = opt(preceded(
		char(','),
		map(pair(take_till1(|c| c == ','), opt(drivetype)), |(name, _)| name),
	)).parse(input)?;
	let (input, _) = eof(input)?;

	Ok((input, VendorAttribute {
		id,
		name: name.map(|x| x.to_string()),
		// trailing '+' marks attributes whose raw value only increases; that doesn't affect decoding
		conv: Conv::from(format.trim_end_matches('+')),
		byte_order: byte_order.map(|x| x.to_string()),
	}))
}

/**
Parses single attribute description (`-v` option argument).

The following formats are supported:

* `ID,FORMAT[:BYTEORDER][,NAME[,(HDD|SSD)]]`
* legacy `-v` arguments, like `9,halfminutes`

Unknown formats are not an error: they end up as [`Conv::Unknown`](../../ata/data/attr/conv/enum.Conv.html), and their values are rendered as `?`.
*/
pub fn parse(s: &str) -> Result<VendorAttribute, Error> {
	let arg = match s {
		"9,halfminutes" => "9,halfmin2hour,Power_On_Half_Minutes",
		"9,minutes" => "9,min2hour,Power_On_Minutes",
		"9,seconds" => "9,sec2hour,Power_On_Seconds",
		"9,temp" => "9,tempminmax,Temperature_Celsius",
		"192,emergencyretractcyclect" => "192,raw48,Emerg_Retract_Cycle_Ct",
		"193,loadunload" => "193,raw24/raw24",
		"194,10xCelsius" => "194,temp10x,Temperature_Celsius_x10",
		"194,unknown" => "194,raw48,Unknown_Attribute",
		"197,increasing" => "197,raw48+,Total_Pending_Sectors",
		"198,offlinescanuncsectorct" => "198,raw48,Offline_Scan_UNC_SectCt",
		"198,increasing" => "198,raw48+,Total_Offl_Uncorrectabl",
		"200,writeerrorcount" => "200,raw48,Write_Error_Count",
		"201,detectedtacount" => "201,raw48,Detected_TA_Count",
		"220,temp" => "220,tempminmax,Temperature_Celsius",
		s => s,
	};
	match parse_standard(arg) {
		Ok((_, attr)) => Ok(attr),
		Err(_) => Err(Error::Parse(s.to_string())),
	}
}

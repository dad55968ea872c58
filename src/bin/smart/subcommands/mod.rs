mod info;
mod attrs;
mod nvme;

use std::collections::HashMap;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use clap::builder::PossibleValuesParser;

use smart::ata::data::id;
use smart::utils::Endianness;

use crate::{Error, read_file};

pub fn arg_json() -> Arg {
	Arg::new("json")
		.long("json")
		.action(ArgAction::SetTrue)
		.help("Export data in JSON")
}

pub fn arg_drivedb() -> Arg {
	Arg::new("drivedb")
		.short('B') // smartctl-like
		.long("drivedb") // smartctl-like
		.num_args(1)
		.action(ArgAction::Append)
		.value_name("[+]FILE")
		.help("paths to drivedb files to look for\nuse 'FILE' for main (system-wide) file, '+FILE' for additional entries\nentries are looked up in every additional file in order of their appearance, then in the first valid main file, stopping at the first match\n(this option and its behavior is, to some extent, consistent with '-B' from smartctl)")
}

pub fn arg_vendorattribute() -> Arg {
	Arg::new("vendorattribute")
		.short('v') // smartctl-like
		.long("vendorattribute") // smartctl-like
		.num_args(1)
		.action(ArgAction::Append)
		.value_name("ID,FORMAT[:BYTEORDER][,NAME]")
		.help("set display option for vendor attribute 'ID' (or for all of them if 'ID' is 'N')\n(this option and its behavior is, to some extent, consistent with '-v' from smartctl)")
}

pub fn arg_byte_order() -> Arg {
	Arg::new("byte-order")
		.long("byte-order")
		.value_parser(PossibleValuesParser::new(["native", "little", "big"]))
		.default_value("native")
		.help("byte order of 16-bit words in data dumps\n(depends on how the dump was taken; devices themselves speak little-endian)")
}

/// `--identify FILE` and `--model STRING`, one of which is required to find the drive in the database.
pub fn args_device(cmd: Command, required: bool) -> Command {
	cmd
		.arg(Arg::new("identify")
			.long("identify")
			.value_name("FILE")
			.help("IDENTIFY DEVICE data dump")
		)
		.arg(Arg::new("model")
			.long("model")
			.value_name("MODEL")
			.help("drive model, as reported by the drive, if there's no IDENTIFY DEVICE dump at hand")
		)
		.group(ArgGroup::new("device")
			.args(["identify", "model"])
			.required(required)
		)
}

pub fn drivedb_paths(args: &ArgMatches) -> Option<Vec<String>> {
	args.get_many::<String>("drivedb")
		.map(|vals| vals.cloned().collect())
}

pub fn byte_order(args: &ArgMatches) -> Result<Endianness, Error> {
	let order = args.get_one::<String>("byte-order")
		.map(|s| s.as_str())
		.unwrap_or("native");
	order.parse()
		.map_err(|_| Error::Args(format!("Unknown byte order {:?}", order)))
}

/// Decoded IDENTIFY DEVICE data if there was a dump, and the model field to look the drive up with.
pub fn device(args: &ArgMatches, order: Endianness) -> Result<(Option<id::Id>, Option<Vec<u8>>), Error> {
	if let Some(path) = args.get_one::<String>("identify") {
		let id = id::parse_id(&read_file(path)?, order)?;
		let model = id.model_raw.clone();
		return Ok((Some(id), Some(model)));
	}
	Ok((None, args.get_one::<String>("model").map(|model| id::model_field(model))))
}

pub trait Subcommand: Sync {
	fn subcommand(&self) -> Command;
	fn run(&self, args: &ArgMatches) -> Result<(), Error>;
}

static INFO: info::Info = info::Info {};
static ATTRS: attrs::Attrs = attrs::Attrs {};
static NVME: nvme::NVMe = nvme::NVMe {};

lazy_static! {
	pub static ref SUBCOMMANDS: HashMap<&'static str, &'static dyn Subcommand> = {
		let mut m: HashMap<&'static str, &'static dyn Subcommand> = HashMap::new();
		m.insert("info",  &INFO);
		m.insert("attrs", &ATTRS);
		m.insert("nvme",  &NVME);
		m
	};
}

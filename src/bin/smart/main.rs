#![cfg_attr(feature = "cargo-clippy", allow(print_with_newline))]

#![warn(
	missing_debug_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications,
)]

use smart::drivedb;
use smart::ata::data::{attr, id};
use smart::drivedb::vendor_attribute;
use smart::nvme;
use smart::utils::hexdump;

use clap::{Arg, ArgAction, Command};

use log::LevelFilter;
use env_logger::Builder as LogBuilder;

use std::fs;
use std::io;

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;

mod subcommands;
use crate::subcommands::SUBCOMMANDS;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		Read(path: String, err: io::Error) {
			display("Cannot read {}: {}", path, err)
		}
		Write(err: io::Error) {
			from()
			display("{}", err)
		}
		Args(msg: String) {
			display("{}", msg)
		}
		Attributes(err: attr::Error) {
			from()
			display("{}", err)
		}
		Id(err: id::Error) {
			from()
			display("{}", err)
		}
		NVMe(err: nvme::Error) {
			from()
			display("{}", err)
		}
		DriveDB(err: drivedb::Error) {
			from()
			display("Cannot use drive database: {}", err)
		}
		VendorAttribute(err: vendor_attribute::Error) {
			from()
			display("{}", err)
		}
		JSON(err: serde_json::Error) {
			from()
			display("{}", err)
		}
	}
}

#[allow(non_upper_case_globals)]
static drivedb_default: [&str; 3] = [
	"/var/lib/smartmontools/drivedb/drivedb.h",
	"/usr/local/share/smartmontools/drivedb.h", // for all FreeBSD folks out there
	"/usr/share/smartmontools/drivedb.h",
];
#[allow(non_upper_case_globals)]
static drivedb_additional_default: [&str; 1] = [
	"/etc/smart_drivedb.h",
];

/// Returns database made of main and additional drivedb files, falling back to built-in paths if none were provided.
pub fn open_drivedb(options: Option<Vec<String>>) -> Result<drivedb::DriveDB, drivedb::Error> {
	let options = options.unwrap_or_default();

	let (paths_add, paths_main): (Vec<&str>, Vec<&str>) = options.iter()
		.map(|path| path.as_str())
		.partition(|path| path.starts_with('+'));

	// trim leading '+'
	let paths_add: Vec<&str> = paths_add.iter().map(|path| &path[1..]).collect();

	let mut show_warn_add = true;
	let mut show_warn_main = true;

	// apply defaults if one of the lists is not provided
	// also silence warnings for default files, most of them are not supposed to exist anyway
	let (paths_main, paths_add) = if paths_main.is_empty() {
		show_warn_main = false;
		let paths_add = if paths_add.is_empty() {
			show_warn_add = false;
			drivedb_additional_default.to_vec()
		} else {
			paths_add
		};
		(drivedb_default.to_vec(), paths_add)
	} else {
		// do not apply defaults to paths_add if paths_main is not the default one
		(paths_main, paths_add)
	};

	let mut loader = drivedb::Loader::new();

	for f in paths_add {
		match loader.load_additional(f) {
			Ok(()) => (),
			Err(e) => if show_warn_add {
				eprint!("Cannot open additional drivedb file {}: {}\n", f, e);
			} else {
				debug!("cannot open additional drivedb file {}: {}", f, e);
			},
		}
	}

	let mut loaded = false;
	for f in paths_main {
		match loader.load(f) {
			Ok(()) => {
				loaded = true;
				break; // we only need one 'main' file, the first valid one
			},
			Err(e) => if show_warn_main {
				eprint!("Cannot open drivedb file {}: {}\n", f, e);
			} else {
				debug!("cannot open drivedb file {}: {}", f, e);
			},
		}
	}
	if !loaded {
		warn!("no drive database found, attribute names and formats will be unknown");
	}

	loader.db()
}

/// Reads the whole dump, showing its contents if asked to.
pub fn read_file(path: &str) -> Result<Vec<u8>, Error> {
	let data = fs::read(path).map_err(|err| Error::Read(path.to_string(), err))?;
	debug!("{} ({} bytes):\n{}", path, data.len(), hexdump(&data));
	Ok(data)
}

fn main() {
	let mut log = LogBuilder::new();

	let args = {
		let mut cmd = Command::new("smart")
			.about("decodes S.M.A.R.T. data dumps using smartmontools drive database")
			.version(env!("CARGO_PKG_VERSION"))
			.subcommand_required(true)
			.arg(Arg::new("debug")
				.short('d')
				.long("debug")
				.action(ArgAction::Count)
				.global(true)
				.help("Verbose output: set once to log actions, twice to also show raw data buffers\ncan also be set though env_logger's RUST_LOG env")
			);
		for subcommand in SUBCOMMANDS.values() {
			cmd = cmd.subcommand(subcommand.subcommand());
		}
		cmd.get_matches()
	};

	if let Ok(var) = std::env::var("RUST_LOG") {
		log.parse_filters(&var);
	}
	// -d takes precedence over RUST_LOG which some might export globally for some reasons
	log.filter(Some("smart"), {
		use self::LevelFilter::*;
		match args.get_count("debug") {
			0 => Warn,
			1 => Info,
			_ => Debug,
		}
	});
	log.init();

	// clap does not allow subcommands that do not exist, nor running without one
	let (subcommand, sargs) = match args.subcommand()
		.and_then(|(name, sargs)| SUBCOMMANDS.get(name).map(|sub| (sub, sargs)))
	{
		Some(x) => x,
		None => unreachable!(),
	};

	if let Err(e) = subcommand.run(sargs) {
		eprint!("{}\n", e);
		std::process::exit(1);
	}
}

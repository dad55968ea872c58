use smart::ata::data::attr::{AttributeTable, report};
use smart::ata::data::id;
use smart::drivedb::vendor_attribute;

use clap::{Arg, ArgMatches, Command};

use serde_json::json;

use crate::{Error, open_drivedb, read_file};
use super::{Subcommand, arg_byte_order, arg_drivedb, arg_json, arg_vendorattribute, args_device, byte_order, device, drivedb_paths};

use std::io::{self, Write};

pub struct Attrs {}
impl Subcommand for Attrs {
	fn subcommand(&self) -> Command {
		args_device(Command::new("attrs")
			.about("Prints a list of S.M.A.R.T. attributes")
			.arg(Arg::new("data")
				.long("data")
				.value_name("FILE")
				.required(true)
				.help("SMART READ DATA dump")
			)
			.arg(arg_byte_order())
			.arg(arg_json())
			.arg(arg_drivedb())
			.arg(arg_vendorattribute()),
		true)
	}

	fn run(&self, args: &ArgMatches) -> Result<(), Error> {
		let order = byte_order(args)?;
		let (id, model_field) = device(args, order)?;
		let model_field = match model_field {
			Some(field) => field,
			None => return Err(Error::Args("either --identify or --model is required".to_string())),
		};

		if let Some(ref id) = id {
			if id.smart != id::Ternary::Enabled {
				eprint!("S.M.A.R.T. is {}, attribute values might be stale\n", id.smart);
			}
		}

		let data = match args.get_one::<String>("data") {
			Some(path) => read_file(path)?,
			None => return Err(Error::Args("SMART READ DATA dump is required".to_string())),
		};
		let table = AttributeTable::parse(&data, order)?;

		let user_attributes = args.get_many::<String>("vendorattribute")
			.map(|attrs| attrs
				.map(|attr| vendor_attribute::parse(attr))
				.collect::<Result<Vec<_>, _>>()
			)
			.transpose()?
			.unwrap_or_default();

		let db = open_drivedb(drivedb_paths(args))?;
		let mut model = db.lookup(&model_field);
		model.apply_overrides(&user_attributes);

		let family = if model.is_default() || model.family.is_empty() { None } else { Some(&model.family) };
		let warning = if model.warning.is_empty() { None } else { Some(&model.warning) };

		if args.get_flag("json") {
			let output = json!({
				"family": family,
				"warning": warning,
				"revision": table.version,
				"attributes": report::render(&table, &model),
			});
			print!("{}\n", serde_json::to_string(&output)?);
			return Ok(());
		}

		let stdout = io::stdout();
		let mut out = stdout.lock();

		match family {
			Some(family) => write!(out, "Model family according to drive database:\n  {}\n", family)?,
			None => write!(out, "This drive is not in the drive database\n")?,
		}
		if let Some(warning) = warning {
			write!(out, "\n══════ WARNING ══════\n{}\n═════════════════════\n", warning)?;
		}
		write!(out, "\nS.M.A.R.T. Attributes Data Structure revision number: {}\n", table.version)?;

		report::write_header(&mut out)?;
		report::write_attributes(&mut out, &table, &model)?;

		Ok(())
	}
}

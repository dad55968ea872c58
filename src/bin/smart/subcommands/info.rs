use smart::ata::data::id;
use smart::drivedb::DriveModel;

use clap::{ArgMatches, Command};

use serde_json::json;

use number_prefix::NumberPrefix;
use prettytable::{Cell, Row, Table, format};

use crate::{Error, open_drivedb};
use super::{Subcommand, arg_byte_order, arg_drivedb, arg_json, args_device, byte_order, device, drivedb_paths};

use std::io::{self, Write};

fn print_ata_id<W: Write>(out: &mut W, id: &id::Id) -> io::Result<()> {
	write!(out, "Model:    {}\n", id.model)?;
	match id.rpm {
		id::RPM::Unknown => (),
		id::RPM::NonRotating => write!(out, "RPM:      N/A (SSD or other non-rotating media)\n")?,
		id::RPM::RPM(i) => write!(out, "RPM:      {}\n", i)?,
	};
	write!(out, "Firmware: {}\n", id.firmware)?;
	write!(out, "Serial:   {}\n", id.serial)?;

	match id.capacity {
		Some(capacity) => write!(out, "Capacity: {} bytes ({}, {})\n",
			capacity,
			match NumberPrefix::decimal(capacity as f64) {
				NumberPrefix::Prefixed(p, x) => format!("{:.1} {}B", x, p),
				NumberPrefix::Standalone(x)  => format!("{} bytes", x),
			},
			match NumberPrefix::binary(capacity as f64) {
				NumberPrefix::Prefixed(p, x) => format!("{:.1} {}B", x, p),
				NumberPrefix::Standalone(x)  => format!("{} bytes", x),
			},
		)?,
		None => write!(out, "Capacity: unknown (device reports nonsensical sector count)\n")?,
	}
	write!(out, "ATA version:      {}\n", id.ata_version.unwrap_or("unknown"))?;
	write!(out, "SMART support is: {}\n", id.smart)?;
	write!(out, "\n")
}

fn print_model<W: Write>(out: &mut W, model: &DriveModel) -> io::Result<()> {
	if model.is_default() || model.family.is_empty() {
		write!(out, "This drive is not in the drive database\n")?;
	} else {
		write!(out, "Model family according to drive database:\n  {}\n", model.family)?;
	}
	if !model.warning.is_empty() {
		write!(out, "\n══════ WARNING ══════\n{}\n═════════════════════\n", model.warning)?;
	}

	let mut presets: Vec<_> = model.presets.iter()
		.filter_map(|(id, attr)| id.parse::<u8>().ok().map(|id| (id, attr)))
		.collect();
	presets.sort_by_key(|&(id, _)| id);

	write!(out, "\nAttribute presets:\n")?;
	let mut table = Table::new();
	table.set_format(*format::consts::FORMAT_CLEAN);
	table.set_titles(Row::new(vec![
		Cell::new("ID#").style_spec("r"),
		Cell::new("ATTRIBUTE_NAME"),
		Cell::new("FORMAT"),
		Cell::new("BYTE_ORDER"),
	]));
	for (id, attr) in presets {
		table.add_row(Row::new(vec![
			Cell::new(&id.to_string()).style_spec("r"),
			Cell::new(&attr.name),
			Cell::new(attr.conv.as_str()),
			Cell::new(attr.byte_order()),
		]));
	}
	table.print(out)?;
	Ok(())
}

pub struct Info {}
impl Subcommand for Info {
	fn subcommand(&self) -> Command {
		args_device(Command::new("info")
			.about("Prints drive identification and what the drive database knows about it")
			.arg(arg_byte_order())
			.arg(arg_json())
			.arg(arg_drivedb()),
		true)
	}

	fn run(&self, args: &ArgMatches) -> Result<(), Error> {
		let order = byte_order(args)?;
		let (id, model_field) = device(args, order)?;
		let model_field = match model_field {
			Some(field) => field,
			None => return Err(Error::Args("either --identify or --model is required".to_string())),
		};

		let db = open_drivedb(drivedb_paths(args))?;
		let model = db.lookup(&model_field);

		if args.get_flag("json") {
			let family = if model.is_default() || model.family.is_empty() { None } else { Some(&model.family) };
			let warning = if model.warning.is_empty() { None } else { Some(&model.warning) };
			let output = json!({
				"id": id,
				"family": family,
				"warning": warning,
				"presets": model.presets,
			});
			print!("{}\n", serde_json::to_string(&output)?);
			return Ok(());
		}

		let stdout = io::stdout();
		let mut out = stdout.lock();

		if let Some(ref id) = id {
			print_ata_id(&mut out, id)?;
		}
		print_model(&mut out, &model)?;

		Ok(())
	}
}

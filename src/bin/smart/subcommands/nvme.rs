use smart::nvme::{id, log, ns};

use clap::{Arg, ArgMatches, Command};

use serde_json::json;

use crate::{Error, read_file};
use super::{Subcommand, arg_json};

use std::io::{self, Write};

pub struct NVMe {}
impl Subcommand for NVMe {
	fn subcommand(&self) -> Command {
		Command::new("nvme")
			.about("Prints NVMe SMART / Health Information log")
			.arg(Arg::new("log")
				.long("log")
				.value_name("FILE")
				.required(true)
				.help("SMART / Health Information log page dump")
			)
			.arg(Arg::new("identify")
				.long("identify")
				.value_name("FILE")
				.help("Identify Controller data dump")
			)
			.arg(Arg::new("namespace")
				.long("namespace")
				.value_name("FILE")
				.help("Identify Namespace data dump")
			)
			.arg(arg_json())
	}

	fn run(&self, args: &ArgMatches) -> Result<(), Error> {
		let controller = match args.get_one::<String>("identify") {
			Some(path) => Some(id::parse_controller(&read_file(path)?)?),
			None => None,
		};
		let namespace = match args.get_one::<String>("namespace") {
			Some(path) => Some(ns::parse_namespace(&read_file(path)?)?),
			None => None,
		};
		let smart_log = match args.get_one::<String>("log") {
			Some(path) => log::parse_smart_log(&read_file(path)?)?,
			None => return Err(Error::Args("SMART / Health Information log dump is required".to_string())),
		};

		if args.get_flag("json") {
			let output = json!({
				"controller": controller,
				"namespace": namespace,
				"smart_log": smart_log,
			});
			print!("{}\n", serde_json::to_string(&output)?);
			return Ok(());
		}

		let stdout = io::stdout();
		let mut out = stdout.lock();

		if let Some(ref controller) = controller {
			id::write_controller(&mut out, controller)?;
			write!(out, "\n")?;
		}
		if let Some(ref namespace) = namespace {
			ns::write_namespace(&mut out, namespace)?;
			write!(out, "\n")?;
		}
		write!(out, "SMART/Health Information (NVMe Log 0x02)\n")?;
		log::write_smart_log(&mut out, &smart_log)?;

		Ok(())
	}
}

use super::parser;
use super::{DriveDB, DriveModel};

use std::fs;
use std::io;
use std::path::Path;

quick_error! {
	#[derive(Debug)]
	pub enum Error {
		IO(err: io::Error) {
			from()
			display("IO error: {}", err)
			source(err)
		}
		Parse(file: String) {
			display("Unable to parse the drivedb {}", file)
		}
		Regex(err: regex::Error) {
			from()
			display("Invalid drivedb entry: {}", err)
			source(err)
		}
	}
}

fn load(file: &Path) -> Result<Vec<DriveModel>, Error> {
	let db = fs::read(file)?;
	// drivedb.h is mostly ascii, but there's no reason to choke on a stray byte in some comment
	let db = String::from_utf8_lossy(&db);

	let entries = match parser::database(&db) {
		Ok((_, entries)) => entries,
		Err(_) => return Err(Error::Parse(file.display().to_string())),
	};
	info!("loaded {} drivedb entries from {}", entries.len(), file.display());

	Ok(entries.into_iter().map(DriveModel::from).collect())
}

/**
Use this helper to load entries from `drivedb.h`.

It is also possible to use `Loader` to create dummy database in case if only user-defined attributes (or none at all) are needed: just call [`db()`](#method.db) right after creating the loader.
*/
#[derive(Debug, Default)]
pub struct Loader {
	entries: Vec<DriveModel>,
	additional: Vec<DriveModel>,
}

impl Loader {
	pub fn new() -> Self {
		Loader::default()
	}

	/**
	Loads entries from main drivedb file.

	Entries from previously loaded main file will be discarded; entries from additional files will not be affected.

	## Errors

	Returns [enum Error](enum.Error.html) if:

	- it encounters any kind of I/O error,
	- drive database is malformed.
	*/
	pub fn load<P: AsRef<Path>>(&mut self, file: P) -> Result<(), Error> {
		self.entries = load(file.as_ref())?;
		Ok(())
	}

	/**
	Loads more entries from additional drivedb file. Additional entries always take precedence over the ones from the main file,
	and entries from additional files loaded earlier take precedence over the ones loaded later.

	## Errors

	Returns [enum Error](enum.Error.html) if:

	- it encounters any kind of I/O error,
	- drive database is malformed.
	*/
	pub fn load_additional<P: AsRef<Path>>(&mut self, file: P) -> Result<(), Error> {
		let entries = load(file.as_ref())?;
		self.additional.extend(entries);
		Ok(())
	}

	/**
	Returns actual drive database with all entries loaded beforehand.

	Default entries of the main file are placed before all the additional entries, so that the drives matched by additional entries still inherit default presets.

	## Errors

	Returns [enum Error](enum.Error.html) if some model regex cannot be compiled.
	*/
	pub fn db(self) -> Result<DriveDB, Error> {
		let (defaults, entries): (Vec<_>, Vec<_>) = self.entries
			.into_iter()
			.partition(DriveModel::is_default);

		let models = defaults.into_iter()
			.chain(self.additional)
			.chain(entries)
			.collect();

		Ok(DriveDB::new(models)?)
	}
}

use std::fs;
use std::path::PathBuf;

use smart::ata::data::attr::{AttributeTable, Conv, report};
use smart::ata::data::id;
use smart::drivedb::{self, Loader, vendor_attribute};
use smart::utils::Endianness;

const MAIN: &str = r#"
/*
 * drivedb.h - smartmontools drive database file
 */
  { "VERSION: 7.4 $Id: drivedb.h 5528 2023-08-06 13:26:51Z chrfranke $",
    "-", "-",
    "Version information",
    ""
  },
  { "$Id: drivedb.h 4842 2018-12-02 16:07:26Z chrfranke $",
    "-", "-",
    "This is a dummy entry to hold the SVN-Id of drivedb.h",
    ""
  },
  { "DEFAULT",
    "-", "",
    "Default settings",
    "-v 5,raw16(raw16),Reallocated_Sector_Ct "
    "-v 9,raw24(raw8),Power_On_Hours "
    "-v 194,tempminmax,Temperature_Celsius"
  },
  { "Seagate Barracuda 7200.14 (AF)", // tested with ST3000DM001-1CH166/CC26
    "ST(1000|2000|3000)DM001-.*",
    "", "",
    "-v 9,min2hour -v 240,msec24hour32,Head_Flying_Hours"
  },
  { "USB: Seagate Expansion; ",
    "0x0bc2:0x2312",
    "", "", "-d sat"
  },
  { "Buggy SSDs",
    "BUGGY SSD [0-9]+GB",
    "", "This drive may lose data on power loss, upgrade firmware",
    ""
  }
"#;

const ADDITIONAL: &str = r#"
  { "Local override",
    "ST3000DM001-1CH166",
    "", "",
    "-v 9,sec2hour,Power_On_Seconds"
  },
"#;

struct TempFile(PathBuf);

impl TempFile {
	fn new(name: &str, contents: &str) -> Self {
		let path = std::env::temp_dir().join(format!("smart-test-{}-{}.h", std::process::id(), name));
		fs::write(&path, contents).unwrap();
		TempFile(path)
	}
}

impl Drop for TempFile {
	fn drop(&mut self) {
		let _ = fs::remove_file(&self.0);
	}
}

fn smart_data() -> Vec<u8> {
	let entries: [[u8; 12]; 4] = [
		[5, 0x33, 0x00, 100, 100, 0, 0, 0, 0, 0, 0, 0],
		[9, 0x32, 0x00, 98, 98, 0x11, 0x0e, 0, 0, 2, 0, 0],
		[194, 0x22, 0x00, 30, 45, 30, 0, 18, 45, 0, 0, 0],
		[240, 0x00, 0x00, 100, 253, 0x10, 0x27, 0, 0, 0x39, 0x30, 0],
	];
	let mut buf = vec![0u8; 512];
	buf[0] = 0x10;
	for (i, entry) in entries.iter().enumerate() {
		buf[2 + i * 12 .. 14 + i * 12].copy_from_slice(entry);
	}
	buf
}

fn lines(table: &AttributeTable, model: &drivedb::DriveModel) -> Vec<String> {
	let mut out = Vec::new();
	report::write_attributes(&mut out, table, model).unwrap();
	String::from_utf8(out).unwrap().lines().map(|l| l.to_string()).collect()
}

#[test]
fn main_file() {
	let main = TempFile::new("main", MAIN);
	let mut loader = Loader::new();
	loader.load(&main.0).unwrap();
	let db = loader.db().unwrap();

	let model = db.lookup(&id::model_field("ST3000DM001-1CH166"));
	assert_eq!(model.family, "Seagate Barracuda 7200.14 (AF)");
	assert_eq!(model.preset(9).map(|p| (&p.conv, p.name.as_str())), Some((&Conv::Min2Hour, "Power_On_Hours")));

	let table = AttributeTable::parse(&smart_data(), Endianness::Little).unwrap();
	assert_eq!(table.version, 0x10);
	assert_eq!(lines(&table, &model), vec![
		"  5 Reallocated_Sector_Ct    0x0033   100   100   000    Pre-fail Always   0",
		"  9 Power_On_Hours           0x0032   098   098   000    Old_age  Always   60h+01m (2)",
		"194 Temperature_Celsius      0x0022   030   045   000    Old_age  Always   30 (Min/Max 18/45)",
		"240 Head_Flying_Hours        0x0000   100   253   000    Old_age  Offline  10000h+00m+12.345s",
	]);
}

#[test]
fn additional_entries_take_precedence() {
	let main = TempFile::new("precedence-main", MAIN);
	let additional = TempFile::new("precedence-additional", ADDITIONAL);
	let mut loader = Loader::new();
	loader.load_additional(&additional.0).unwrap();
	loader.load(&main.0).unwrap();
	let db = loader.db().unwrap();

	let model = db.lookup(&id::model_field("ST3000DM001-1CH166"));
	assert_eq!(model.family, "Local override");
	// defaults of the main file still apply
	assert_eq!(model.preset(194).map(|p| p.name.as_str()), Some("Temperature_Celsius"));

	let table = AttributeTable::parse(&smart_data(), Endianness::Little).unwrap();
	assert_eq!(lines(&table, &model)[1],
		"  9 Power_On_Seconds         0x0032   098   098   000    Old_age  Always   2386093h+56m+33s");
	// not described by the override, and it does not fall through to the main file entry either
	assert_eq!(model.preset(240), None);

	// other models are not affected
	let model = db.lookup(&id::model_field("ST2000DM001-9YN164"));
	assert_eq!(model.family, "Seagate Barracuda 7200.14 (AF)");
}

#[test]
fn identify_device_data() {
	let main = TempFile::new("identify", MAIN);
	let mut loader = Loader::new();
	loader.load(&main.0).unwrap();
	let db = loader.db().unwrap();

	let mut data = vec![0u8; id::ID_LEN];
	// drives swap bytes within each word
	for (i, pair) in id::model_field("BUGGY SSD 128GB").chunks(2).enumerate() {
		data[54 + i * 2] = pair[1];
		data[55 + i * 2] = pair[0];
	}
	let id = id::parse_id(&data, Endianness::Little).unwrap();
	assert_eq!(id.model, "BUGGY SSD 128GB");

	let model = db.lookup(&id.model_raw);
	assert_eq!(model.family, "Buggy SSDs");
	assert_eq!(model.warning, "This drive may lose data on power loss, upgrade firmware");
	assert_eq!(model.preset(5).map(|p| &p.conv), Some(&Conv::Raw16OptRaw16));
}

#[test]
fn unknown_model_gets_defaults() {
	let main = TempFile::new("unknown", MAIN);
	let mut loader = Loader::new();
	loader.load(&main.0).unwrap();
	let db = loader.db().unwrap();

	for model in &["WDC WD40EFRX-68WT0N0", "0x0bc2:0x2312", "$Id"] {
		let model = db.lookup(&id::model_field(model));
		assert!(model.is_default());
		assert_eq!(model.preset(9).map(|p| &p.conv), Some(&Conv::Raw24OptRaw8));
		assert_eq!(model.preset(240), None);
	}
}

#[test]
fn user_overrides() {
	let main = TempFile::new("overrides", MAIN);
	let mut loader = Loader::new();
	loader.load(&main.0).unwrap();
	let db = loader.db().unwrap();

	let overrides = ["N,raw48", "9,raw48:012345,Power_On_Hours_LE"].iter()
		.map(|s| vendor_attribute::parse(s))
		.collect::<Result<Vec<_>, _>>()
		.unwrap();

	let mut model = db.lookup(&id::model_field("ST3000DM001-1CH166"));
	model.apply_overrides(&overrides);

	let table = AttributeTable::parse(&smart_data(), Endianness::Little).unwrap();
	let reports = report::render(&table, &model);
	assert_eq!(reports.len(), 4);
	assert!(reports.iter().all(|r| r.conv == Conv::Raw48));
	assert_eq!(reports[0].name, "Reallocated_Sector_Ct");
	assert_eq!(reports[1].name, "Power_On_Hours_LE");
	assert_eq!(reports[1].raw_value, 0x11_0e00_0002_00);
	assert_eq!(reports[2].raw, (30u64 | 18 << 16 | 45 << 24).to_string());
}

#[test]
fn missing_files() {
	let mut loader = Loader::new();
	assert!(loader.load("/nonexistent/drivedb.h").is_err());
	assert!(loader.load_additional("/nonexistent/smart_drivedb.h").is_err());

	// still usable, just knows nothing
	let db = loader.db().unwrap();
	let model = db.lookup(&id::model_field("ST3000DM001-1CH166"));
	assert_eq!(model, drivedb::DriveModel::default());

	let table = AttributeTable::parse(&smart_data(), Endianness::Little).unwrap();
	assert_eq!(lines(&table, &model)[1],
		"  9                          0x0032   098   098   000    Old_age  Always   ?");
}

#[test]
fn malformed_file() {
	let broken = TempFile::new("broken", "{ \"DEFAULT\", \"-\", ");
	let mut loader = Loader::new();
	match loader.load(&broken.0) {
		Err(drivedb::Error::Parse(_)) => (),
		x => panic!("unexpected result: {:?}", x),
	}
}

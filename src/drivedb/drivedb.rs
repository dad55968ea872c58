use std::collections::HashMap;

use regex::bytes::{RegexSet, RegexSetBuilder};

#[cfg(feature = "serializable")]
use serde::Serialize;

use super::parser::Entry;
use super::presets;
use super::vendor_attribute::VendorAttribute;
use crate::ata::data::attr::Conv;

/// How to decode and name a particular attribute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct AttrConv {
	pub conv: Conv,
	/// empty if unknown
	pub name: String,
	/// custom byte order, if the description has one
	#[cfg_attr(feature = "serializable", serde(skip_serializing_if = "Option::is_none"))]
	pub byte_order: Option<String>,
}

impl AttrConv {
	/// Byte order to assemble raw value with: either the custom one, or the default one for the format.
	pub fn byte_order(&self) -> &str {
		match self.byte_order {
			Some(ref order) => order.as_str(),
			None => self.conv.byte_order(),
		}
	}
}

/// Drive-related data that cannot be queried from the drive itself (model family, attribute presets etc.)
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct DriveModel {
	/// > Informal string about the model family/series of a device.
	pub family: String,
	pub model_regex: String,
	/// kept for reference; drives are only matched by model
	pub firmware_regex: String,
	/// > A message that may be displayed for matching drives.
	/// > For example, to inform the user that they may need to apply a firmware patch.
	pub warning: String,
	/// attribute descriptions, keyed by attribute id in decimal
	pub presets: HashMap<String, AttrConv>,
}

impl From<Entry> for DriveModel {
	fn from(entry: Entry) -> Self {
		DriveModel {
			presets: presets::parse(&entry.presets),
			family: entry.family,
			model_regex: entry.model,
			firmware_regex: entry.firmware,
			warning: entry.warning,
		}
	}
}

impl DriveModel {
	/// Whether this entry holds presets that are applicable to every drive.
	pub fn is_default(&self) -> bool {
		self.family == "DEFAULT"
	}

	// > The entry is ignored if [modelfamily] starts with a dollar sign.
	// newer files open with a "VERSION: 7.x $Id…$" entry instead, with "-" for a model regex
	fn is_placeholder(&self) -> bool {
		self.family.starts_with('$') || self.family.starts_with("VERSION:")
	}

	// > If [modelfamily] starts with "USB:", [modelregexp] is a USB vendor:product id.
	fn is_usb(&self) -> bool {
		self.family.starts_with("USB:")
	}

	/// Description of attribute `id`, if there's any.
	pub fn preset(&self, id: u8) -> Option<&AttrConv> {
		self.presets.get(&id.to_string())
	}

	// fills the gaps with baseline presets: unknown attributes are copied, unnamed ones get baseline names
	fn inherit(&mut self, baseline: &DriveModel) {
		for (id, base) in &baseline.presets {
			let own = self.presets.entry(id.clone()).or_insert_with(|| base.clone());
			if own.name.is_empty() {
				own.name = base.name.clone();
			}
		}
	}

	/**
	Applies user-supplied attribute descriptions (e.g. from `-v` arguments) on top of the presets.

	Format (and byte order) of the attribute is always replaced, while the name is only replaced if description has one.
	Descriptions without id (`N,…`) apply to every attribute id there is.
	*/
	pub fn apply_overrides(&mut self, extra: &[VendorAttribute]) {
		for attr in extra {
			let ids = match attr.id {
				Some(id) => id..=id,
				None => 1..=255,
			};
			for id in ids {
				let preset = self.presets.entry(id.to_string()).or_default();
				preset.conv = attr.conv.clone();
				preset.byte_order = attr.byte_order.clone();
				if let Some(ref name) = attr.name {
					preset.name = name.clone();
				}
			}
		}
	}
}

/**
Drive database that hosts its entries and allows to search for relevant data.

Entries are kept in the order they were given; this order is also the priority order for lookups. USB entries are not supported.
*/
#[derive(Debug)]
pub struct DriveDB {
	models: Vec<DriveModel>,

	// indices of `models` that take part in lookups, in the same order as `model_regexes`
	candidates: Vec<usize>,

	// precompiled RegexSets are often faster than simple regexes lazily compiled one by one on demand until the first match
	// (even if RegexSet compilation time is taken into account!),
	// and are a must if multiple lookups are about to be performed
	model_regexes: RegexSet,
}

impl DriveDB {
	/**
	Creates database out of `models`, compiling all the model regexes at once.

	## Errors

	Returns `regex::Error` if any of the regexes is invalid or too big.
	*/
	pub fn new(models: Vec<DriveModel>) -> Result<Self, regex::Error> {
		let candidates: Vec<usize> = models.iter()
			.enumerate()
			.filter(|(_, m)| !(m.is_placeholder() || m.is_default() || m.is_usb()))
			.map(|(i, _)| i)
			.collect();

		// model is expected to be an ascii string, no need to try matching unicode characters
		// hence `unicode(false)` and use of `regex::bytes::*` instead of `regex::*`
		let model_regexes = RegexSetBuilder::new(candidates.iter().map(|&i| &models[i].model_regex))
			.unicode(false)
			.build()?;

		Ok(DriveDB {
			models,
			candidates,
			model_regexes,
		})
	}

	/// All the entries, including the placeholder and default ones.
	pub fn models(&self) -> &[DriveModel] {
		&self.models
	}

	/// The last entry marked as `DEFAULT`, if any.
	pub fn default_model(&self) -> Option<&DriveModel> {
		self.models.iter().rev().find(|m| m.is_default())
	}

	/**
	Matches drive model number against the database.

	`model` is the model number field of IDENTIFY DEVICE data as is, padding included (see [`id::model_field`](../ata/data/id/fn.model_field.html) for hand-typed models).

	The first matching entry wins (this is consistent with smartmontools' `lookup_drive` function). Its presets are merged with the ones from the nearest preceding `DEFAULT` entry:
	attributes that the entry does not describe are taken from the default entry as is, and attributes that the entry describes without a name get their names from the default entry.

	If nothing matches, the last `DEFAULT` entry is returned, or an empty model if there are no default entries at all.
	*/
	pub fn lookup(&self, model: &[u8]) -> DriveModel {
		// set matches are reported in ascending order, so the first one is the first entry in file order
		let found = self.model_regexes.matches(model)
			.iter()
			.next()
			.map(|i| self.candidates[i]);

		match found {
			Some(index) => {
				let mut m = self.models[index].clone();
				debug!("model {:?} matches drivedb entry {:?}", String::from_utf8_lossy(model), m.family);

				match self.models[..index].iter().rev().find(|m| m.is_default()) {
					Some(baseline) => m.inherit(baseline),
					None => debug!("no default entry precedes {:?}", m.family),
				}
				m
			},
			None => {
				debug!("model {:?} matches no drivedb entries, using defaults", String::from_utf8_lossy(model));
				self.default_model().cloned().unwrap_or_default()
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::drivedb::vendor_attribute;

	fn model(family: &str, regex: &str, presets: &[(&str, Conv, &str)]) -> DriveModel {
		DriveModel {
			family: family.to_string(),
			model_regex: regex.to_string(),
			presets: presets.iter()
				.map(|(id, conv, name)| (id.to_string(), AttrConv {
					conv: conv.clone(),
					name: name.to_string(),
					byte_order: None,
				}))
				.collect(),
			..Default::default()
		}
	}

	fn db() -> DriveDB {
		DriveDB::new(vec![
			model("$Id: drivedb.h 4842 2018-12-02 16:07:26Z chrfranke $", "-", &[]),
			model("DEFAULT", "-", &[
				("9", Conv::Raw24OptRaw8, "Power_On_Hours"),
				("194", Conv::TempMinMax, "Temperature_Celsius"),
			]),
			model("Foo", "^FOO", &[
				("5", Conv::Raw16OptRaw16, "Foo_Attr"),
				("194", Conv::Temp10x, ""),
			]),
			model("Foo, generic", "^FOO-.*", &[]),
			model("USB: Bar bridge; ", "0x1234:0x5678", &[]),
		]).unwrap()
	}

	#[test]
	fn default_presets_are_inherited() {
		let m = db().lookup(b"FOO-1000");
		assert_eq!(m.family, "Foo");
		assert_eq!(m.presets.len(), 3);
		assert_eq!(m.preset(5).unwrap().name, "Foo_Attr");
		assert_eq!(m.preset(5).unwrap().conv, Conv::Raw16OptRaw16);
		assert_eq!(m.preset(9).unwrap().name, "Power_On_Hours");
		assert_eq!(m.preset(9).unwrap().conv, Conv::Raw24OptRaw8);
	}

	#[test]
	fn unnamed_presets_keep_their_format() {
		let m = db().lookup(b"FOO-1000");
		let temp = m.preset(194).unwrap();
		assert_eq!(temp.name, "Temperature_Celsius");
		assert_eq!(temp.conv, Conv::Temp10x);
	}

	#[test]
	fn search_is_unanchored_and_sees_padding() {
		let db = DriveDB::new(vec![
			model("Padded", "1CH166 +$", &[]),
		]).unwrap();
		assert_eq!(db.lookup(b"ST3000DM001-1CH166      ").family, "Padded");
		assert_eq!(db.lookup(b"ST3000DM001-1CH166").family, "");
	}

	#[test]
	fn no_match() {
		let db = db();
		let m = db.lookup(b"BAR-1000");
		assert_eq!(m.family, "DEFAULT");
		assert_eq!(m.presets.len(), 2);

		let empty = DriveDB::new(vec![model("Foo", "^FOO", &[])]).unwrap();
		assert_eq!(empty.lookup(b"BAR-1000"), DriveModel::default());
		assert_eq!(empty.lookup(b"FOO").presets.len(), 0);
	}

	#[test]
	fn placeholders_and_usb_are_never_matched() {
		let db = db();
		// matches "-" of the placeholder and default entries, and the id of the USB entry
		assert_eq!(db.lookup(b"-").family, "DEFAULT");
		assert_eq!(db.lookup(b"0x1234:0x5678").family, "DEFAULT");
	}

	#[test]
	fn version_entry_is_never_matched() {
		let db = DriveDB::new(vec![
			model("VERSION: 7.4 $Id: drivedb.h 5528 2023-08-06 13:26:51Z chrfranke $", "-", &[]),
			model("DEFAULT", "-", &[("9", Conv::Raw24OptRaw8, "Power_On_Hours")]),
			model("Seagate Barracuda 7200.14 (AF)", "ST3000DM001-.*", &[]),
		]).unwrap();

		let m = db.lookup(b"ST3000DM001-1CH166                      ");
		assert_eq!(m.family, "Seagate Barracuda 7200.14 (AF)");
		assert_eq!(m.preset(9).unwrap().name, "Power_On_Hours");

		let m = db.lookup(b"WDC WD40EFRX-68WT0N0                    ");
		assert!(m.is_default());
	}

	#[test]
	fn baseline_is_the_nearest_preceding_default() {
		let db = DriveDB::new(vec![
			model("DEFAULT", "-", &[("9", Conv::Raw48, "Old")]),
			model("DEFAULT", "-", &[("9", Conv::Raw48, "New")]),
			model("Foo", "^FOO", &[]),
			model("DEFAULT", "-", &[("9", Conv::Raw48, "Later")]),
		]).unwrap();
		assert_eq!(db.lookup(b"FOO").preset(9).unwrap().name, "New");
		assert_eq!(db.lookup(b"BAR").preset(9).unwrap().name, "Later");
	}

	#[test]
	fn invalid_regex() {
		assert!(DriveDB::new(vec![model("Broken", "(", &[])]).is_err());
	}

	#[test]
	fn overrides() {
		let mut m = db().lookup(b"FOO-1000");
		let extra: Vec<_> = ["9,minutes", "5,raw48", "194,raw16:012345"].iter()
			.map(|arg| vendor_attribute::parse(arg).unwrap())
			.collect();
		m.apply_overrides(&extra);

		assert_eq!(m.preset(9).unwrap().conv, Conv::Min2Hour);
		assert_eq!(m.preset(9).unwrap().name, "Power_On_Minutes");
		assert_eq!(m.preset(5).unwrap().conv, Conv::Raw48);
		assert_eq!(m.preset(5).unwrap().name, "Foo_Attr");
		assert_eq!(m.preset(194).unwrap().byte_order(), "012345");
		assert_eq!(m.preset(9).unwrap().byte_order(), "543210");
	}

	#[test]
	fn overrides_for_all_attributes() {
		let mut m = DriveModel::default();
		m.apply_overrides(&[vendor_attribute::parse("N,hex48").unwrap()]);
		assert_eq!(m.presets.len(), 255);
		assert!(m.presets.values().all(|p| p.conv == Conv::Hex48 && p.name.is_empty()));
	}
}

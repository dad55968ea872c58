use std::collections::HashMap;

use super::vendor_attribute::{self, VendorAttribute};
use super::AttrConv;

/// Splits drivedb.h presets string (smartctl options, like `-v 9,minutes -F samsung`) into attribute descriptions, keyed by attribute id.
pub fn parse(line: &str) -> HashMap<String, AttrConv> {
	let mut presets = HashMap::new();

	// using clap here would be an overkill
	let mut args = line.split_whitespace();
	while let Some(key) = args.next() {
		// we always expect an argument for the option
		let arg = match args.next() {
			Some(arg) => arg,
			None => {
				warn!("drivedb presets {:?}: no argument for {}", line, key);
				break;
			},
		};

		// firmware bug workarounds (-F) and the like are of no interest here
		if key != "-v" { continue; }

		match vendor_attribute::parse(arg) {
			Ok(VendorAttribute { id: Some(id), name, conv, byte_order }) => {
				presets.insert(id.to_string(), AttrConv {
					conv,
					name: name.unwrap_or_default(),
					byte_order,
				});
			},
			Ok(VendorAttribute { id: None, .. }) =>
				debug!("drivedb presets: ignoring {:?} that describes all attributes at once", arg),
			Err(err) => warn!("drivedb presets: {}", err),
		}
	}

	presets
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ata::data::attr::Conv;

	#[test]
	fn vendor_attributes() {
		let presets = parse("-v 9,minutes -F samsung -v 194,tempminmax,Temperature_Celsius   -v 240,msec24hour32");
		assert_eq!(presets.len(), 3);
		assert_eq!(presets["9"], AttrConv {
			conv: Conv::Min2Hour,
			name: "Power_On_Minutes".to_string(),
			byte_order: None,
		});
		assert_eq!(presets["194"].name, "Temperature_Celsius");
		assert_eq!(presets["240"].conv, Conv::Msec24Hour32);
		assert_eq!(presets["240"].name, "");
	}

	#[test]
	fn last_one_wins() {
		let presets = parse("-v 1,raw48,Raw_Read_Error_Rate -v 1,hex48,Read_Errors");
		assert_eq!(presets["1"].conv, Conv::Hex48);
		assert_eq!(presets["1"].name, "Read_Errors");
	}

	#[test]
	fn malformed_entries_are_skipped() {
		let presets = parse("-v 9 -v 5,raw16(raw16),Reallocated_Sector_Ct -v N,raw48 -v");
		assert_eq!(presets.keys().collect::<Vec<_>>(), vec!["5"]);
		assert!(parse("").is_empty());
	}
}

/*!
Renders attribute table, combined with the drive database entry, the same way `smartctl -A` does.

```text
ID# ATTRIBUTE_NAME           FLAG     VALUE WORST RSVD   TYPE     UPDATED  RAW_VALUE
  5 Reallocated_Sector_Ct    0x0033   100   100   000    Pre-fail Always   0
194 Temperature_Celsius      0x0022   036   052   000    Old_age  Always   36 (Min/Max 18/52)
```
*/

use std::io::{self, Write};

#[cfg(feature = "serializable")]
use serde::Serialize;

use super::{raw, AttributeRecord, AttributeTable, Conv};
use crate::drivedb::{AttrConv, DriveModel};

/// Single attribute, decoded and rendered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize))]
pub struct AttributeReport {
	pub id: u8,
	/// empty if drive database knows nothing about this attribute
	pub name: String,
	pub flags: u16,
	pub value: u8,
	pub worst: u8,
	pub reserved: u8,
	pub pre_fail: bool,
	pub online: bool,
	pub conv: Conv,
	/// raw value before formatting
	pub raw_value: u64,
	/// raw value as formatted according to `conv`
	pub raw: String,
}

fn report(attr: &AttributeRecord, preset: &AttrConv) -> AttributeReport {
	if !preset.conv.is_known() {
		debug!("attribute {}: unknown raw value format {:?}", attr.id, preset.conv.as_str());
	}

	let raw_value = raw::decode_with(attr, preset.byte_order());

	AttributeReport {
		id: attr.id,
		name: preset.name.clone(),
		flags: attr.flags,
		value: attr.value,
		worst: attr.worst,
		reserved: attr.reserved,
		pre_fail: attr.pre_fail(),
		online: attr.online(),
		conv: preset.conv.clone(),
		raw_value,
		raw: raw::format(raw_value, &preset.conv),
	}
}

/// Decodes every populated attribute of `table` using presets of `model`.
pub fn render(table: &AttributeTable, model: &DriveModel) -> Vec<AttributeReport> {
	let unknown = AttrConv::default();

	table.iter()
		.map(|attr| report(attr, model.preset(attr.id).unwrap_or(&unknown)))
		.collect()
}

pub fn write_header<W: Write>(w: &mut W) -> io::Result<()> {
	writeln!(w, "{:>3} {:<24} {:<8} {:<5} {:<5} {:<6} {:<8} {:<7}  {}",
		"ID#", "ATTRIBUTE_NAME", "FLAG", "VALUE", "WORST", "RSVD", "TYPE", "UPDATED", "RAW_VALUE")
}

/**
Writes one line per populated attribute of `table`.

Attributes that `model` has no presets for are still printed, with an empty name and `?` for a raw value.
*/
pub fn write_attributes<W: Write>(w: &mut W, table: &AttributeTable, model: &DriveModel) -> io::Result<()> {
	for attr in render(table, model) {
		writeln!(w, "{:>3} {:<24} 0x{:04x}   {:03}   {:03}   {:03}    {:<8} {:<7}  {}",
			attr.id,
			attr.name,
			attr.flags,
			attr.value,
			attr.worst,
			attr.reserved,
			if attr.pre_fail { "Pre-fail" } else { "Old_age" },
			if attr.online { "Always" } else { "Offline" },
			attr.raw,
		)?;
	}
	Ok(())
}

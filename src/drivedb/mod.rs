/*!
Use this module to match hard drive and SMART values it returns against smartmontools database.

## Example

```no_run
use smart::drivedb::{Loader, vendor_attribute};
use smart::ata::data::id;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut loader = Loader::new();
// look for version updated with `update-smart-drivedb(8)` first
loader.load("/var/lib/smartmontools/drivedb/drivedb.h")
	.or_else(|_| loader.load("/usr/share/smartmontools/drivedb.h"))?;
// `?` is optional though: if nothing can be loaded, loader will still provide dummy db for us

let db = loader.db()?;

// extra attribute definitions that user might give
let user_attributes = vec!["9,minutes"]
	.into_iter()
	.map(vendor_attribute::parse)
	.collect::<Result<Vec<_>, _>>()?;

let mut model = db.lookup(&id::model_field("ST3000DM001-1CH166"));
model.apply_overrides(&user_attributes);

if !model.warning.is_empty() {
	println!("WARNING: {}", model.warning);
}

if let Some(attr) = model.preset(9) {
	println!("Attribute 9 is named {}", attr.name);
}
# Ok(())
# }
```
*/

mod parser;
mod presets;
mod drivedb;
mod loader;
pub mod vendor_attribute;
pub use self::vendor_attribute::VendorAttribute;
pub use self::drivedb::{AttrConv, DriveDB, DriveModel};
pub use self::loader::{Loader, Error};

/*!
This crate decodes S.M.A.R.T. data that was already read from storage devices, and renders it in a human-readable form.

Transport (SG_IO, ATA PASS-THROUGH, NVMe admin commands, RAID controller firmware interfaces) is none of this crate's business:
it expects fixed-size buffers as they were returned by the device, and does the interesting part, which is making sense of them.

## Example

```no_run
use smart::ata::data::attr::{AttributeTable, report};
use smart::drivedb::Loader;
use smart::utils::Endianness;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut loader = Loader::new();
loader.load("/usr/share/smartmontools/drivedb.h")?;
let db = loader.db()?;

// SMART READ DATA response, as returned by the device
let data: Vec<u8> = std::fs::read("smart-data.bin")?;
let table = AttributeTable::parse(&data, Endianness::native())?;

let model = db.lookup(b"ST3000DM001-1CH166                      ");
report::write_attributes(&mut std::io::stdout(), &table, &model)?;
# Ok(())
# }
```

For more, dive into documentation for the module you're interested in.
*/

#![warn(missing_debug_implementations)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate log;

pub mod utils;

pub mod ata;
pub mod nvme;

pub mod drivedb;

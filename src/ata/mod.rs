/*!
ATA data structures: IDENTIFY DEVICE strings and the S.M.A.R.T. attribute table.

Commands that produce these buffers are:

* IDENTIFY DEVICE (`0xec`),
* SMART READ DATA (`0xb0`, feature `0xd0`, LBA mid/high `0x4f`/`0xc2`).

Issuing them, be it directly or via SCSI/ATA Translation, is out of scope of this crate.
*/

pub mod data;

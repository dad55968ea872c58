pub mod id;
pub mod attr;

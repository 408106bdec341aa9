pub mod boolean;
pub mod circuits;
pub mod conversion;
pub mod prg;
pub mod protocol;
pub mod share;
pub(crate) mod utils;

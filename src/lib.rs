pub(crate) mod error;
pub mod prelude;
pub(crate) mod semi2k;
#[cfg(test)]
pub(crate) mod tests;
pub(crate) mod traits;
pub(crate) mod types;

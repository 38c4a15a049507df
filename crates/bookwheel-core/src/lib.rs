pub mod book;
pub mod config;
pub mod fetch;
pub mod import;
pub mod sheet;
pub mod shuffle;
#[cfg(test)]
pub(crate) mod test_support;
pub mod time;
pub mod wheel;

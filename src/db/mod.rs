pub mod championship;
pub mod store;

#[cfg(test)]
pub mod memory;

pub mod backends;
pub mod keys;

pub mod generate;
pub mod helpers;
pub mod types;
pub mod usage;

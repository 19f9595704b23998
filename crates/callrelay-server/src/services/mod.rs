//! Background Services

pub mod registry_sweeper;

pub mod command;
pub mod error;
pub mod frequency;
pub(crate) mod interval;
pub mod memory;
pub mod reader;
pub mod reconcile;
pub mod request;
pub(crate) mod schemas;
pub mod schtasks;
pub mod store;
pub(crate) mod xml;

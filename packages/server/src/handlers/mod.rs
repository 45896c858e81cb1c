pub mod catalog;
pub mod challenge;
pub mod data;
pub mod spin;
pub mod tracker;

pub mod challenge;
pub mod deployment;
pub mod provider;

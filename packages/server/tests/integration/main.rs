mod common;

mod catalog;
mod challenge;
mod data;
mod spin;
mod tracker;

pub mod availability_controller;

pub use availability_controller::{configure, get_availability};

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Booking, WorkingHours};
pub use repositories::ScheduleRepository;
pub use services::{AvailabilityService, SlotCalculator};

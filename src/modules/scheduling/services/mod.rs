pub mod availability_service;
pub mod slot_calculator;

pub use availability_service::AvailabilityService;
pub use slot_calculator::SlotCalculator;

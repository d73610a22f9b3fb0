pub mod working_hours;

pub use working_hours::{day_of_week_index, Booking, WorkingHours};

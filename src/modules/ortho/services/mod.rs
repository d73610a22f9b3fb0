pub mod adjustment_service;
pub mod installment_generator;
pub mod installment_service;

pub use adjustment_service::{AdjustmentOutcome, AdjustmentService};
pub use installment_generator::{InstallmentGenerator, DEFAULT_DUE_DAY};
pub use installment_service::InstallmentService;

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AdjustmentLog, CaseStatus, OrthoCase, ReceivableTitle, TitleStatus};
pub use repositories::{AdjustmentRepository, CaseRepository, TitleRepository};
pub use services::{AdjustmentService, InstallmentGenerator, InstallmentService};

pub mod adjustment_log;
pub mod ortho_case;
pub mod receivable_title;

pub use adjustment_log::AdjustmentLog;
pub use ortho_case::{CaseStatus, OrthoCase};
pub use receivable_title::{ReceivableTitle, TitleStatus};

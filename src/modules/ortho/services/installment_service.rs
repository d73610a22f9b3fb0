// Business logic for installment schedule generation.
//
// Generation is write-once per case: validation happens before any write,
// and the repository's transactional existence check turns a repeat call
// into a Conflict with zero titles created.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::ortho::models::ReceivableTitle;
use crate::modules::ortho::repositories::{CaseRepository, TitleRepository};
use crate::modules::ortho::services::InstallmentGenerator;

/// Service for installment schedule operations
pub struct InstallmentService {
    case_repository: CaseRepository,
    title_repository: TitleRepository,
}

impl InstallmentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            case_repository: CaseRepository::new(pool.clone()),
            title_repository: TitleRepository::new(pool),
        }
    }

    /// Generate and persist the title schedule for a case.
    ///
    /// # Errors
    /// - `NotFound` when the case does not exist
    /// - `Validation` when the case is missing monthly amount or months
    /// - `Conflict` when titles already exist for the case
    pub async fn generate_for_case(&self, ortho_case_id: Uuid) -> Result<Vec<ReceivableTitle>> {
        let case = self
            .case_repository
            .find_by_id(ortho_case_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ortho case not found"))?;

        let today = Utc::now().date_naive();
        let titles = InstallmentGenerator::generate(&case, today)?;

        self.title_repository
            .create_schedule(ortho_case_id, &titles)
            .await?;

        info!(
            ortho_case_id = %ortho_case_id,
            titles_created = titles.len(),
            "Installment schedule persisted"
        );

        Ok(titles)
    }

    /// All titles for a case, ordered by installment number
    pub async fn get_titles(&self, ortho_case_id: Uuid) -> Result<Vec<ReceivableTitle>> {
        self.title_repository.find_by_case(ortho_case_id).await
    }
}

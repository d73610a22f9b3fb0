pub mod adjustment_controller;
pub mod installment_controller;

pub use adjustment_controller::adjust_prices;
pub use installment_controller::{generate_installments, get_installments};

use actix_web::web;

/// Configure ortho routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/ortho")
            .route(
                "/cases/{ortho_case_id}/installments",
                web::post().to(generate_installments),
            )
            .route(
                "/cases/{ortho_case_id}/installments",
                web::get().to(get_installments),
            )
            .route("/price-adjustments", web::post().to(adjust_prices)),
    );
}

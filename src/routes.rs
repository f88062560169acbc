use crate::{
    api::{self, leave, payroll, timesheet},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            (60_000 / requests_per_min as u64).max(1)
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    let api_limiter = Arc::new(build_limiter(config.rate_api_per_min));
    let import_limiter = Arc::new(build_limiter(config.rate_import_per_min));

    cfg.service(api::index);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(api_limiter) // rate limiting
            .service(
                web::scope("/payroll")
                    .service(
                        web::resource("/calculate")
                            .route(web::post().to(payroll::calculate_record)),
                    )
                    .service(
                        web::resource("/submit").route(web::post().to(payroll::submit_records)),
                    )
                    // CSV upload gets its own limiter and body cap
                    .service(
                        web::resource("/import")
                            .app_data(web::PayloadConfig::new(config.import_max_bytes))
                            .wrap(import_limiter)
                            .route(web::post().to(payroll::import_csv)),
                    )
                    .service(web::resource("/export").route(web::post().to(payroll::export_csv)))
                    .service(web::resource("/stats").route(web::post().to(payroll::payroll_stats)))
                    .service(
                        web::resource("/search").route(web::post().to(payroll::search_records)),
                    )
                    .service(
                        web::resource("/sample").route(web::get().to(payroll::sample_records)),
                    ),
            )
            .service(
                web::scope("/leave")
                    .service(web::resource("/submit").route(web::post().to(leave::submit_records)))
                    .service(web::resource("/summary").route(web::post().to(leave::leave_summary)))
                    .service(web::resource("/search").route(web::post().to(leave::search_records)))
                    .service(web::resource("/sample").route(web::get().to(leave::sample_records))),
            )
            .service(
                web::scope("/timesheet")
                    .service(
                        web::resource("/submit").route(web::post().to(timesheet::submit_records)),
                    )
                    .service(
                        web::resource("/totals").route(web::post().to(timesheet::timesheet_totals)),
                    )
                    .service(
                        web::resource("/weekly").route(web::post().to(timesheet::weekly_records)),
                    )
                    .service(web::resource("/export").route(web::post().to(timesheet::export_csv)))
                    .service(
                        web::resource("/search").route(web::post().to(timesheet::search_records)),
                    )
                    .service(
                        web::resource("/sample").route(web::get().to(timesheet::sample_records)),
                    ),
            ),
    );
}

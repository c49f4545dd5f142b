use crate::{
    api::{attendance, export, pages},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

/// Per-peer-IP limiter allowing `requests_per_min` with an equal burst.
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("limiter period and burst size are non-zero");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let record_limiter = build_limiter(config.rate_record_per_min);

    cfg.route("/", web::get().to(pages::index))
        .service(
            web::resource("/record_action")
                .wrap(record_limiter)
                .route(web::post().to(attendance::record_action)),
        )
        .route("/attendance", web::get().to(pages::view_attendance))
        .route(
            "/download_attendance",
            web::get().to(export::download_attendance),
        )
        .service(
            web::scope("/api")
                // /api/attendance
                .service(
                    web::resource("/attendance").route(web::get().to(attendance::list_attendance)),
                ),
        );
}

// FORM  POST /record_action
//  ├─ check_in   → new open entry under the check-in date
//  └─ check_out  → closes earliest open entry (same date, then lookback)
//
// VIEW  GET /attendance            → HTML, hours per entry
// FILE  GET /download_attendance   → uploads/attendance_records.xlsx

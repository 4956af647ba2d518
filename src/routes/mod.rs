use actix_web::web;

pub mod backend_health;
pub mod championship;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/api")
            .service(championship::publish_fixture_results)
            .service(championship::get_tables)
            .service(championship::filter_results_by_query)
            .service(championship::filter_results_by_body)
            .service(championship::update_results)
    );
}

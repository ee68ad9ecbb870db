pub mod build_queue;
mod set_send_result;

use actix_web::web;
use build_queue::build_queue_controller;
use set_send_result::set_send_result_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/queue/build", web::post().to(build_queue_controller));

    cfg.route(
        "/queue/{entry_id}/send-result",
        web::post().to(set_send_result_controller),
    );
}

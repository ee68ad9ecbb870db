pub mod run_batch;

use actix_web::web;
use run_batch::run_batch_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/batch/run", web::post().to(run_batch_controller));
}

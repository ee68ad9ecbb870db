mod get_audit_log;

use actix_web::web;
use get_audit_log::get_audit_log_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/audit", web::get().to(get_audit_log_controller));
}

mod create_template;
mod get_template;
mod get_templates;

use actix_web::web;
use create_template::create_template_controller;
use get_template::get_template_controller;
use get_templates::get_templates_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/templates", web::post().to(create_template_controller));
    cfg.route("/templates", web::get().to(get_templates_controller));

    cfg.route(
        "/templates/{template_id}",
        web::get().to(get_template_controller),
    );
}

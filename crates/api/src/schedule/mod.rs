mod create_schedule;
mod get_schedule;
mod get_schedules;
mod set_schedule_exclusions;
mod update_schedule;

use actix_web::web;
use create_schedule::create_schedule_controller;
use get_schedule::get_schedule_controller;
use get_schedules::get_schedules_controller;
use set_schedule_exclusions::set_schedule_exclusions_controller;
use update_schedule::update_schedule_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedules", web::post().to(create_schedule_controller));
    cfg.route("/schedules", web::get().to(get_schedules_controller));

    cfg.route(
        "/schedules/{schedule_id}",
        web::get().to(get_schedule_controller),
    );
    cfg.route(
        "/schedules/{schedule_id}",
        web::put().to(update_schedule_controller),
    );

    cfg.route(
        "/schedules/{schedule_id}/exclusions",
        web::put().to(set_schedule_exclusions_controller),
    );
}

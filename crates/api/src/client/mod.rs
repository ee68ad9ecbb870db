mod create_client;
mod filings;
mod get_client;
mod get_client_queue;
mod get_clients;
mod remove_deadline_override;
mod set_client_pause;
mod set_deadline_override;
mod set_filing_assignments;
mod set_records_received;
mod subscribers;
mod update_client;

use actix_web::web;
use create_client::create_client_controller;
use get_client::get_client_controller;
use get_client_queue::get_client_queue_controller;
use get_clients::get_clients_controller;
use remove_deadline_override::remove_deadline_override_controller;
use set_client_pause::set_client_pause_controller;
use set_deadline_override::set_deadline_override_controller;
use set_filing_assignments::set_filing_assignments_controller;
use set_records_received::set_records_received_controller;
use update_client::update_client_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/clients", web::post().to(create_client_controller));
    cfg.route("/clients", web::get().to(get_clients_controller));

    cfg.route("/clients/{client_id}", web::get().to(get_client_controller));
    cfg.route(
        "/clients/{client_id}",
        web::put().to(update_client_controller),
    );

    cfg.route(
        "/clients/{client_id}/pause",
        web::post().to(set_client_pause_controller),
    );
    cfg.route(
        "/clients/{client_id}/records-received",
        web::post().to(set_records_received_controller),
    );
    cfg.route(
        "/clients/{client_id}/assignments",
        web::put().to(set_filing_assignments_controller),
    );

    cfg.route(
        "/clients/{client_id}/overrides/{filing_type}",
        web::put().to(set_deadline_override_controller),
    );
    cfg.route(
        "/clients/{client_id}/overrides/{filing_type}",
        web::delete().to(remove_deadline_override_controller),
    );

    cfg.route(
        "/clients/{client_id}/queue",
        web::get().to(get_client_queue_controller),
    );
}

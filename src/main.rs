mod telemetry;

use practice_scheduler_api::Application;
use practice_scheduler_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("practice_scheduler_server".into(), "info".into());
    init_subscriber(subscriber);

    if std::env::var("DATABASE_URL").is_ok() {
        run_migration()
            .await
            .expect("To run the database migrations");
    }

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}

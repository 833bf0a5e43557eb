use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel::{pg::PgConnection, r2d2::ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod config;
mod errors;
mod handlers;
mod models;
mod schema;
mod session;
mod store;
mod view;

use config::Config;
use session::SessionKeys;
use store::{NoteStore, PgStore};
use view::View;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = Config::from_env().expect("invalid environment");

    let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
    let pool = r2d2::Pool::builder()
        .build(manager)
        .expect("failed to create a pg pool");
    {
        let mut connection = pool.get().expect("failed to get a pg connection");
        let connection: &mut PgConnection = &mut connection;
        connection
            .run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");
    }

    let store: Arc<dyn NoteStore> = Arc::new(PgStore::new(pool));
    let store = web::Data::from(store);
    let view = web::Data::new(View::new().expect("failed to load the board template"));
    let keys = web::Data::new(SessionKeys::new(
        config.secret_key.as_bytes(),
        config.session_ttl,
        config.secure_cookies,
    ));
    let governor = GovernorConfigBuilder::default()
        .period(config.rate_limit_period)
        .burst_size(config.rate_limit_burst)
        .finish()
        .expect("RATE_LIMIT_BURST and RATE_LIMIT_PERIOD_SECS must be positive");
    let form_limit = config.form_limit;

    log::info!("listening on 0.0.0.0:{}", config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(view.clone())
            .app_data(keys.clone())
            .app_data(web::FormConfig::default().limit(form_limit))
            .wrap(Governor::new(&governor))
            .wrap(Logger::default())
            .route("/health", web::get().to(handlers::index))
            .configure(handlers::board::configure)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}

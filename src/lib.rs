//! Core library exports for the cookbook service.
//!
//! The `data` feature exposes the domain model, Diesel models and schema so
//! other services can share the database layer. The default `server` feature
//! adds forms, repositories, services, routes and the Actix application.

#[cfg(feature = "server")]
use std::io;

#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::SessionMiddleware;
#[cfg(feature = "server")]
use actix_session::storage::CookieSessionStore;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::Logger;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
#[cfg(feature = "server")]
use pushkind_common::db::establish_connection_pool;
#[cfg(feature = "server")]
use pushkind_common::models::config::CommonServerConfig;

pub mod domain;
pub mod models;
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

/// Role required for every `/admin` endpoint.
pub const SERVICE_ACCESS_ROLE: &str = "cookbook";

#[cfg(feature = "server")]
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations, then serve the public and admin APIs until
/// shutdown.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> io::Result<()> {
    let secret = server_config.secret_key.as_bytes();
    if secret.len() < 64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "secret_key must be at least 64 bytes long",
        ));
    }
    let secret_key = Key::from(secret);

    // Read by the `AuthenticatedUser` extractor to verify session tokens.
    let common_config = web::Data::new(CommonServerConfig {
        auth_service_url: server_config.auth_service_url.clone(),
        secret: server_config.secret_key.clone(),
    });

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to establish database connection: {e}");
        io::Error::other(e.to_string())
    })?;

    {
        let mut conn = pool.get().map_err(|e| io::Error::other(e.to_string()))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| io::Error::other(e.to_string()))?;
        log::info!("Applied {} pending migrations", applied.len());
    }

    let repo = DieselRepository::new(pool);
    let address = server_config.address.clone();
    let port = server_config.port;

    log::info!("Starting cookbook server on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(common_config.clone())
            .service(
                web::scope("/api/v1")
                    .service(routes::categories::show_category_tree)
                    .service(routes::content::list_articles)
                    .service(routes::content::show_article)
                    .service(routes::comments::show_comment_thread)
                    .service(routes::comments::post_comment)
                    .service(routes::comments::report_comment)
                    .service(routes::content::list_recipes)
                    .service(routes::content::show_recipe)
                    .service(routes::schedule::show_upcoming)
                    .service(routes::newsletter::subscribe)
                    .service(routes::newsletter::unsubscribe),
            )
            .service(
                web::scope("/admin")
                    .service(routes::categories::show_categories)
                    .service(routes::categories::add_category)
                    .service(routes::categories::update_category)
                    .service(routes::categories::delete_category)
                    .service(routes::content::add_article)
                    .service(routes::content::add_recipe)
                    .service(routes::schedule::show_calendar)
                    .service(routes::schedule::schedule_content)
                    .service(routes::schedule::publish_due)
                    .service(routes::schedule::cancel_publication)
                    .service(routes::schedule::reschedule_publication)
                    .service(routes::comments::show_moderation_queue)
                    .service(routes::comments::approve_comment)
                    .service(routes::comments::reject_comment)
                    .service(routes::newsletter::show_subscribers)
                    .service(routes::newsletter::export_subscribers),
            )
    })
    .bind((address.as_str(), port))?
    .run()
    .await
}

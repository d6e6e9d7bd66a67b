//! Storefront JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storefront_app::{auth::SessionKey, context::AppContext};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod admin;
mod auth;
mod config;
mod extensions;
mod healthcheck;
mod money;
mod orders;
mod products;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod users;

/// Storefront JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let session_key = match SessionKey::from_hex(&config.session_key) {
        Ok(session_key) => session_key,
        Err(key_error) => {
            error!("invalid session key: {key_error}");

            process::exit(1);
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(&config.database_url, session_key).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("users")
                .push(Router::with_path("login").post(users::login::handler))
                .push(Router::with_path("register").post(users::register::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(
                    Router::with_path("{slug}")
                        .get(products::get::handler)
                        .push(Router::with_path("stock").get(products::stock::handler)),
                ),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("users/account").put(users::account::handler))
                .push(
                    Router::with_path("orders")
                        .post(orders::create::handler)
                        .push(Router::with_path("history").get(orders::history::handler))
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("pay").put(orders::pay::handler))
                                .push(
                                    Router::with_path("deliver")
                                        .hoop(auth::admin::handler)
                                        .put(orders::deliver::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("admin")
                        .hoop(auth::admin::handler)
                        .push(Router::with_path("summary").get(admin::summary::handler))
                        .push(Router::with_path("orders").get(admin::orders::handler))
                        .push(
                            Router::with_path("users")
                                .get(admin::users::index::handler)
                                .push(
                                    Router::with_path("{user}")
                                        .put(admin::users::update::handler)
                                        .delete(admin::users::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("products")
                                .post(admin::products::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(admin::products::update::handler)
                                        .delete(admin::products::delete::handler),
                                ),
                        ),
                ),
        );

    let doc = OpenApi::new("Storefront API", "0.3.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}

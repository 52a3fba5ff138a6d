//! Courier server binary.
//!
//! Wires the MySQL repositories, the token service with its revocation
//! registry and background sweeper, and the domain services into an
//! actix-web HTTP server.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use courier_api::middleware::{create_cors, JwtAuth};
use courier_api::routes;
use courier_api::state::AppState;
use courier_core::services::{
    AuthService, GroupService, MessageService, RevocationRegistry, RevocationSweeper,
    TokenService, TokenServiceConfig,
};
use courier_infra::database::create_pool;
use courier_infra::database::mysql::{
    MySqlGroupRepository, MySqlMessageRepository, MySqlUserRepository,
};
use courier_shared::config::{DatabaseConfig, JwtConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let jwt_config = JwtConfig::from_env()
        .expect("JWT_SECRET must be set before the server can issue tokens");
    let database_config = DatabaseConfig::from_env();
    let server_config = ServerConfig::from_env();

    let pool = create_pool(&database_config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e))?;
    info!("Connected to database");

    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let message_repo = Arc::new(MySqlMessageRepository::new(pool.clone()));
    let group_repo = Arc::new(MySqlGroupRepository::new(pool));

    // One registry for the process; the token service and the sweeper
    // share it.
    let registry = Arc::new(RevocationRegistry::new());
    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::from(&jwt_config), Arc::clone(&registry))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?,
    );
    let sweeper = RevocationSweeper::start(
        Arc::clone(&registry),
        Duration::from_secs(jwt_config.sweep_interval),
    );

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&token_service),
    ));
    let message_service = Arc::new(MessageService::new(
        Arc::clone(&message_repo),
        Arc::clone(&group_repo),
        Arc::clone(&user_repo),
    ));
    let group_service = Arc::new(GroupService::new(
        Arc::clone(&group_repo),
        Arc::clone(&user_repo),
    ));

    let state = web::Data::new(AppState::new(
        auth_service,
        message_service,
        group_service,
        Arc::clone(&token_service),
    ));

    let bind_address = server_config.bind_address();
    info!("Starting Courier server on {}", bind_address);

    let result = HttpServer::new(move || {
        let jwt_auth = JwtAuth::new(Arc::clone(&token_service));
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(state.clone())
            .configure(|cfg| {
                routes::configure::<MySqlUserRepository, MySqlMessageRepository, MySqlGroupRepository>(
                    cfg, jwt_auth,
                )
            })
    })
    .bind(&bind_address)?
    .run()
    .await;

    sweeper.stop().await;
    info!("Courier server stopped");

    result
}

//! Route handlers and the routing table.

pub mod auth;
pub mod groups;
pub mod health;
pub mod messages;

use actix_web::web;

use courier_core::repositories::{GroupRepository, MessageRepository, UserRepository};

use crate::middleware::JwtAuth;

/// Mounts the full API surface onto a service config.
///
/// `/api/v1/auth/{register,login,refresh}` are public; everything else
/// sits behind the JWT middleware.
pub fn configure<U, M, G>(cfg: &mut web::ServiceConfig, jwt_auth: JwtAuth)
where
    U: UserRepository + 'static,
    M: MessageRepository + 'static,
    G: GroupRepository + 'static,
{
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<U, M, G>))
                        .route("/login", web::post().to(auth::login::<U, M, G>))
                        .route("/refresh", web::post().to(auth::refresh::<U, M, G>))
                        .service(
                            web::scope("")
                                .wrap(jwt_auth.clone())
                                .route("/logout", web::post().to(auth::logout::<U, M, G>))
                                .route("/me", web::get().to(auth::me::<U, M, G>)),
                        ),
                )
                .service(
                    web::scope("/messages")
                        .wrap(jwt_auth.clone())
                        .route("", web::post().to(messages::send::<U, M, G>))
                        .route("", web::get().to(messages::feed::<U, M, G>))
                        .route(
                            "/conversation/{user_id}",
                            web::get().to(messages::conversation::<U, M, G>),
                        )
                        .route(
                            "/group/{group_id}",
                            web::get().to(messages::group_history::<U, M, G>),
                        ),
                )
                .service(
                    web::scope("/groups")
                        .wrap(jwt_auth)
                        .route("", web::post().to(groups::create::<U, M, G>))
                        .route("", web::get().to(groups::list::<U, M, G>))
                        .route(
                            "/{group_id}/members",
                            web::post().to(groups::add_member::<U, M, G>),
                        )
                        .route(
                            "/{group_id}/members",
                            web::get().to(groups::members::<U, M, G>),
                        ),
                ),
        );
}

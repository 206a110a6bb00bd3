use crate::{
    api::{employee, leave_request},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(web::resource("/login").route(web::post().to(handlers::login)))
            .service(web::resource("/refresh").route(web::post().to(handlers::refresh_token)))
            .service(web::resource("/logout").route(web::post().to(handlers::logout))),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_request::get_leave))
                            .route(web::put().to(leave_request::update_leave)),
                    )
                    // /leave/{id}/review
                    .service(
                        web::resource("/{id}/review")
                            .route(web::put().to(leave_request::review_leave)),
                    )
                    // /leave/{id}/admin
                    .service(
                        web::resource("/{id}/admin")
                            .route(web::put().to(leave_request::admin_update_leave)),
                    ),
            )
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    ),
            ),
    );
}

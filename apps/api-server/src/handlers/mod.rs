//! HTTP handlers and route configuration.

mod auth;
mod health;
mod news;
mod notes;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error, web};
use serde::Serialize;

use ya_core::DomainError;
use ya_core::services::Mutation;
use ya_shared::FormView;

use crate::middleware::error::{AppError, AppResult, field_error_map};
use crate::routes;

/// Form body, accepted as JSON or urlencoded.
pub type Submitted<T> = web::Either<web::Json<T>, web::Form<T>>;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        let detail = err.to_string();
        error::InternalError::from_response(err, AppError::BadRequest(detail).error_response())
            .into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _| {
        let detail = err.to_string();
        error::InternalError::from_response(err, AppError::BadRequest(detail).error_response())
            .into()
    }))
    .route("/health", web::get().to(health::health_check))
    // news
    .route("/", web::get().to(news::home))
    .service(
        web::resource("/news/{id}/")
            .route(web::get().to(news::detail))
            .route(web::post().to(news::add_comment)),
    )
    .service(
        web::resource("/edit_comment/{id}/")
            .route(web::get().to(news::edit_comment_form))
            .route(web::post().to(news::edit_comment)),
    )
    .service(
        web::resource("/delete_comment/{id}/")
            .route(web::get().to(news::delete_comment_confirm))
            .route(web::post().to(news::delete_comment))
            .route(web::delete().to(news::delete_comment)),
    )
    // notes
    .service(
        web::scope("/notes")
            .route("/", web::get().to(notes::home))
            .route("/list/", web::get().to(notes::list))
            .service(
                web::resource("/add/")
                    .route(web::get().to(notes::add_form))
                    .route(web::post().to(notes::add)),
            )
            .route("/done/", web::get().to(notes::done))
            .route("/note/{slug}/", web::get().to(notes::detail))
            .service(
                web::resource("/edit/{slug}/")
                    .route(web::get().to(notes::edit_form))
                    .route(web::post().to(notes::edit)),
            )
            .service(
                web::resource("/delete/{slug}/")
                    .route(web::get().to(notes::delete_confirm))
                    .route(web::post().to(notes::delete))
                    .route(web::delete().to(notes::delete)),
            ),
    )
    // users
    .service(
        web::scope("/auth")
            .service(
                web::resource("/signup/")
                    .route(web::get().to(auth::signup_form))
                    .route(web::post().to(auth::signup)),
            )
            .service(
                web::resource("/login/")
                    .route(web::get().to(auth::login_form))
                    .route(web::post().to(auth::login)),
            )
            .service(
                web::resource("/logout/")
                    .route(web::get().to(auth::logout))
                    .route(web::post().to(auth::logout)),
            ),
    );
}

/// `302 Found` to `location`.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Answer a form submission: redirect on success, echo the form with its
/// errors on a validation failure.
fn submitted<T, F: Serialize>(
    result: Result<Mutation<T>, DomainError>,
    values: F,
    req: &HttpRequest,
) -> AppResult<HttpResponse> {
    match result {
        Ok(mutation) => Ok(redirect(&routes::destination(mutation.redirect))),
        Err(DomainError::Validation(errors)) => Ok(HttpResponse::UnprocessableEntity()
            .json(FormView::with_errors(values, field_error_map(&errors)))),
        Err(e) => Err(AppError::from_domain(e, req)),
    }
}

#[cfg(test)]
mod test_support;

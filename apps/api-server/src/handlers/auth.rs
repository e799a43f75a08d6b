//! Authentication handlers.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use ya_core::DomainError;
use ya_core::services::Credentials;
use ya_shared::FormView;
use ya_shared::dto::{AuthResponse, LoginRequest, PageMessage, SignupRequest};

use super::{Submitted, redirect};
use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::middleware::error::{AppError, AppResult, field_error_map};
use crate::routes;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

/// The form echoed back without the password.
fn rejected<T>(values: T, errors: &ya_core::FieldErrors) -> HttpResponse
where
    T: serde::Serialize,
{
    HttpResponse::UnprocessableEntity().json(FormView::with_errors(values, field_error_map(errors)))
}

/// GET /auth/signup/
pub async fn signup_form() -> HttpResponse {
    HttpResponse::Ok().json(FormView::blank(SignupRequest::default()))
}

/// POST /auth/signup/ - registers the user and sends them to the login page.
pub async fn signup(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Submitted<SignupRequest>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let result = state
        .users
        .signup(Credentials {
            username: form.username.clone(),
            password: form.password,
        })
        .await;

    match result {
        Ok(_) => Ok(redirect(routes::LOGIN)),
        Err(DomainError::Validation(errors)) => Ok(rejected(
            SignupRequest {
                username: form.username,
                password: String::new(),
            },
            &errors,
        )),
        Err(e) => Err(AppError::from_domain(e, &req)),
    }
}

/// GET /auth/login/
pub async fn login_form() -> HttpResponse {
    HttpResponse::Ok().json(FormView::blank(LoginRequest::default()))
}

/// POST /auth/login/ - sets the access token cookie and follows `next`.
///
/// The token is also returned in the body for clients that send it as a
/// Bearer header instead.
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<NextQuery>,
    body: Submitted<LoginRequest>,
) -> AppResult<HttpResponse> {
    let form = body.into_inner();
    let result = state
        .users
        .login(Credentials {
            username: form.username.clone(),
            password: form.password,
        })
        .await;

    let session = match result {
        Ok(session) => session,
        Err(DomainError::Validation(errors)) => {
            return Ok(rejected(
                LoginRequest {
                    username: form.username,
                    password: String::new(),
                },
                &errors,
            ));
        }
        Err(e) => return Err(AppError::from_domain(e, &req)),
    };

    let cookie = Cookie::build(ACCESS_TOKEN_COOKIE, session.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(session.expires_in))
        .finish();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, routes::safe_next(query.next.as_deref())))
        .cookie(cookie)
        .json(AuthResponse {
            access_token: session.token,
            token_type: "Bearer".to_string(),
            expires_in: u64::try_from(session.expires_in).unwrap_or_default(),
        }))
}

/// GET or POST /auth/logout/ - expires the access token cookie.
pub async fn logout() -> HttpResponse {
    let mut cookie = Cookie::build(ACCESS_TOKEN_COOKIE, "").path("/").finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(PageMessage::new("You have been logged out."))
}

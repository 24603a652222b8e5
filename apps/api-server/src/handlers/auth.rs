//! Authentication handlers.

use actix_web::{HttpResponse, web};

use cinedex_core::domain::{AuthSession, Registration, User};
use cinedex_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(crate) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
    }
}

fn auth_response(state: &AppState, session: AuthSession) -> AuthResponse {
    AuthResponse {
        user: user_response(session.user),
        token: session.token,
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .accounts
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok(HttpResponse::Created().json(auth_response(&state, session)))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.accounts.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(auth_response(&state, session)))
}

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use crate::application::ports::in_ports::{
    UserAuthenticationUseCase, UserProfileUseCase, UserRegistrationUseCase,
};
use crate::domain::entities::user::{NewUser, UserLogin, UserSummary};
use crate::domain::DomainError;

// Absent fields deserialize as empty so they reach the service's own checks.
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserSummary,
    pub token: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserSummary,
}

// User registration handler
pub async fn register_user(
    data: web::Data<AppState>,
    user_data: web::Json<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let user_data = user_data.into_inner();
    let new_user = NewUser {
        name: user_data.name,
        email: user_data.email,
        password: user_data.password,
    };

    let user = data.user_service.register_user(new_user).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully",
        user: user.summary(),
    }))
}

// User login handler
pub async fn login_user(
    data: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let credentials = credentials.into_inner();
    let login = UserLogin {
        email: credentials.email,
        password: credentials.password,
    };

    let (user, token) = data.user_service.login(login).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful",
        user: user.summary(),
        token: token.token,
    }))
}

pub async fn current_user(
    data: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, DomainError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| DomainError::unauthorized("Missing bearer token"))?;

    let user_id = data.user_service.validate_token(token.trim()).await?;
    let user = data.user_service.get_user_profile(&user_id).await.map_err(|e| match e {
        // a valid token for a user that no longer exists
        DomainError::NotFound(_) => DomainError::unauthorized("Invalid or expired token"),
        other => other,
    })?;

    Ok(HttpResponse::Ok().json(ProfileResponse { user: user.summary() }))
}

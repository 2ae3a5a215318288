use crate::application::user_service::UserService;
use crate::domain::error::DomainError;
use crate::domain::user::{NewUser, UserChanges};
use crate::presentation::dto::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserEnvelope,
};
use crate::presentation::middleware::request_id;
use actix_web::{HttpRequest, HttpResponse, Scope, delete, get, post, put, web};
use tracing::info;


pub fn scope() -> Scope {
    web::scope("/users")
        .service(list_users)
        .service(create_user)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
}

#[get("")]
async fn list_users(
    req: HttpRequest,
    users: web::Data<UserService>,
) -> Result<HttpResponse, DomainError> {
    let users = users.list_users().await?;

    info!(
        request_id = %request_id(&req),
        count = users.len(),
        "users listed"
    );

    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
async fn get_user(
    users: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let user = users.get_user(&path).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("")]
async fn create_user(
    req: HttpRequest,
    users: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let user = users.create_user(new_user).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user created"
    );

    Ok(HttpResponse::Created().json(UserEnvelope {
        message: "User added successfully",
        user,
    }))
}

#[put("/{id}")]
async fn update_user(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, DomainError> {
    let changes = UserChanges::try_from(payload.into_inner())?;
    let user = users.update_user(&path, changes).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user updated"
    );

    Ok(HttpResponse::Ok().json(UserEnvelope {
        message: "User updated successfully",
        user,
    }))
}

#[delete("/{id}")]
async fn delete_user(
    req: HttpRequest,
    users: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let user = users.delete_user(&path).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        "user deleted"
    );

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted",
    }))
}

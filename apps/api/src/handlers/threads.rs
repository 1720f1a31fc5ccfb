use actix_web::{get, post, web, HttpResponse, Responder};
use application::chat::{
    access::load_thread_for,
    dtos::{ListMessagesQuery, OpenThreadRequest, SendMessageRequest},
    get_thread::GetThreadUseCase,
    list_messages::ListMessagesUseCase,
    mark_read::MarkThreadReadUseCase,
    open_thread::OpenThreadUseCase,
    send_message::SendMessageUseCase,
    unread_count::UnreadCountUseCase,
};
use application::AppError;
use uuid::Uuid;

use crate::extractors::AuthUser;
use crate::handlers::error_handler::HttpAppError;
use crate::state::AppState;

fn parse_thread_id(raw: &str) -> Result<Uuid, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::Validation("Missing thread id".to_string()));
    }
    Ok(Uuid::parse_str(raw)?)
}

#[post("")]
pub async fn open_thread(
    auth: AuthUser,
    state: web::Data<AppState>,
    body: web::Json<OpenThreadRequest>,
) -> Result<impl Responder, HttpAppError> {
    let user_id = auth.user_id()?;
    let thread = OpenThreadUseCase::execute(state.threads.as_ref(), user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(thread))
}

#[get("/{thread_id:[^/]*}")]
pub async fn get_thread(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, HttpAppError> {
    let user_id = auth.user_id()?;
    let thread_id = parse_thread_id(&path)?;

    let thread = GetThreadUseCase::execute(
        state.threads.as_ref(),
        state.messages.as_ref(),
        thread_id,
        user_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(thread))
}

#[get("/{thread_id:[^/]*}/messages")]
pub async fn list_messages(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListMessagesQuery>,
) -> Result<impl Responder, HttpAppError> {
    let user_id = auth.user_id()?;
    let thread_id = parse_thread_id(&path)?;
    load_thread_for(state.threads.as_ref(), thread_id, user_id).await?;

    let page = ListMessagesUseCase::execute(state.messages.as_ref(), thread_id, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/{thread_id:[^/]*}/messages")]
pub async fn send_message(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SendMessageRequest>,
) -> Result<impl Responder, HttpAppError> {
    let user_id = auth.user_id()?;
    let thread_id = parse_thread_id(&path)?;

    let message = SendMessageUseCase::execute(
        state.threads.as_ref(),
        state.messages.as_ref(),
        state.events.as_ref(),
        thread_id,
        user_id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Created().json(message))
}

#[post("/{thread_id:[^/]*}/read")]
pub async fn mark_thread_read(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, HttpAppError> {
    let user_id = auth.user_id()?;
    let thread_id = parse_thread_id(&path)?;
    load_thread_for(state.threads.as_ref(), thread_id, user_id).await?;

    let response = MarkThreadReadUseCase::execute(
        state.messages.as_ref(),
        state.events.as_ref(),
        thread_id,
        user_id,
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/{thread_id:[^/]*}/unread")]
pub async fn unread_count(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, HttpAppError> {
    let user_id = auth.user_id()?;
    let thread_id = parse_thread_id(&path)?;
    load_thread_for(state.threads.as_ref(), thread_id, user_id).await?;

    let response = UnreadCountUseCase::execute(state.messages.as_ref(), thread_id, user_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

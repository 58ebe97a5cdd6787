use axum::extract::State;
use http::StatusCode;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        ContactMessage, ContactRequest, ContactResponse, DashboardStats, Language,
        MarkReadRequest, MessageListResponse, MessageQuery, NewContactMessage,
    },
    queries::{message_queries, product_queries},
    services::email_service,
    utils::{
        extractors::{Json, Path, Query},
        validation::{non_blank, require, validate_email},
    },
};

// PUBLIC ROUTES
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let new_message = validate_contact(payload)?;

    let message = message_queries::create_message(&state.db, &new_message).await?;
    tracing::info!("Stored contact message {} from {}", message.id, message.email);

    email_service::notify_contact(&state.ses_client, &state.config.mail, &message).await;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            id: message.id,
        }),
    ))
}

pub fn validate_contact(payload: ContactRequest) -> Result<NewContactMessage> {
    let name = require(payload.name, "name")?;
    let email = require(payload.email, "email")?;
    let subject = require(payload.subject, "subject")?;
    let message = require(payload.message, "message")?;

    validate_email(&email)?;

    Ok(NewContactMessage {
        name,
        email,
        phone: non_blank(payload.phone),
        subject,
        message,
        language_code: Language::from_optional(payload.language_code.as_deref())
            .as_str()
            .to_string(),
    })
}

// ADMIN ROUTES
pub async fn list_messages(
    State(state): State<AppState>,
    Query(params): Query<MessageQuery>,
) -> Result<Json<MessageListResponse>> {
    let messages = message_queries::list_messages(&state.db, &params).await?;
    let (total, unread) = message_queries::count_messages(&state.db).await?;

    Ok(Json(MessageListResponse {
        messages,
        total,
        unread,
    }))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContactMessage>> {
    let message = message_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Message with id {} not found", id)))?;

    Ok(Json(message))
}

pub async fn mark_message(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Option<Json<MarkReadRequest>>,
) -> Result<Json<ContactMessage>> {
    let is_read = payload
        .and_then(|Json(body)| body.is_read)
        .unwrap_or(true);

    let message = message_queries::set_read(&state.db, id, is_read)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Message with id {} not found", id)))?;

    Ok(Json(message))
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    if message_queries::delete_message(&state.db, id).await? == 0 {
        return Err(AppError::NotFound(format!(
            "Message with id {} not found",
            id
        )));
    }

    tracing::info!("Deleted contact message {}", id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let products = product_queries::count_products(&state.db).await?;
    let (messages, unread_messages) = message_queries::count_messages(&state.db).await?;

    Ok(Json(DashboardStats {
        products,
        messages,
        unread_messages,
    }))
}

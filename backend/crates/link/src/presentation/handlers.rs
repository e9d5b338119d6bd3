//! HTTP Handlers

use std::sync::Arc;

use auth::CurrentUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::JsonBody;
use store::LinkRepository;

use crate::application::config::LinkConfig;
use crate::application::{
    CreateLinkInput, CreateLinkUseCase, DeleteLinkUseCase, ListLinksUseCase, RefreshLinkUseCase,
    ResolveLinkUseCase, UpdateLinkInput, UpdateLinkUseCase,
};
use crate::error::LinkResult;
use crate::presentation::dto::{
    CreateLinkRequest, LinkResponse, MessageResponse, UpdateLinkRequest,
};

/// Shared state for link handlers
#[derive(Clone)]
pub struct LinkAppState<R>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<LinkConfig>,
}

// ============================================================================
// Public redirect
// ============================================================================

/// GET /{slug}
pub async fn redirect<R>(
    State(state): State<LinkAppState<R>>,
    Path(slug): Path<String>,
) -> LinkResult<impl IntoResponse>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    let url = ResolveLinkUseCase::new(state.repo.clone())
        .execute(&slug)
        .await?;

    tracing::info!(slug = %slug, "Redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]))
}

// ============================================================================
// Link management (requires authentication)
// ============================================================================

/// POST /api/links
pub async fn create_link<R>(
    State(state): State<LinkAppState<R>>,
    user: CurrentUser,
    JsonBody(req): JsonBody<CreateLinkRequest>,
) -> LinkResult<impl IntoResponse>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateLinkUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            &user.email,
            CreateLinkInput {
                slug: req.slug,
                original_url: req.original_url,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Link is created"))))
}

/// GET /api/links
pub async fn list_links<R>(
    State(state): State<LinkAppState<R>>,
    user: CurrentUser,
) -> LinkResult<Json<Vec<LinkResponse>>>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    let links = ListLinksUseCase::new(state.repo.clone())
        .execute(&user.email)
        .await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// PUT /api/links
pub async fn update_link<R>(
    State(state): State<LinkAppState<R>>,
    user: CurrentUser,
    JsonBody(req): JsonBody<UpdateLinkRequest>,
) -> LinkResult<Json<MessageResponse>>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    UpdateLinkUseCase::new(state.repo.clone())
        .execute(
            &user.email,
            UpdateLinkInput {
                slug: req.slug,
                original_url: req.original_url,
                expired_date: req.expired_date,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Link is updated")))
}

/// DELETE /api/links/{slug}
pub async fn delete_link<R>(
    State(state): State<LinkAppState<R>>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> LinkResult<Json<MessageResponse>>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    DeleteLinkUseCase::new(state.repo.clone())
        .execute(&user.email, &slug)
        .await?;

    Ok(Json(MessageResponse::new("Link is deleted")))
}

/// GET /api/links/refresh/{slug}
pub async fn refresh_link<R>(
    State(state): State<LinkAppState<R>>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> LinkResult<Json<LinkResponse>>
where
    R: LinkRepository + Clone + Send + Sync + 'static,
{
    let link = RefreshLinkUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&user.email, &slug)
        .await?;

    Ok(Json(LinkResponse::from(link)))
}

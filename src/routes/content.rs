use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::content::{
    featured_resources, field_notes, search_resources, Category, CategoryFilter,
};
use crate::routes::ErrorBody;

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("{0}")]
    UnknownCategory(String),
    #[error("There is no Field Notes issue named {0}.")]
    IssueNotFound(String),
}

impl ResponseError for ContentError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContentError::UnknownCategory(_) => StatusCode::BAD_REQUEST,
            ContentError::IssueNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(serde::Deserialize)]
pub struct ResourceQuery {
    q: Option<String>,
    category: Option<String>,
}

#[derive(Serialize)]
struct CategoryEntry {
    id: &'static str,
    label: &'static str,
}

pub async fn list_resources(
    query: web::Query<ResourceQuery>,
) -> Result<HttpResponse, ContentError> {
    let filter = match query.category.as_deref() {
        None | Some("") => CategoryFilter::All,
        Some(id) => CategoryFilter::try_from(id).map_err(ContentError::UnknownCategory)?,
    };
    let categories: Vec<_> = Category::ALL
        .iter()
        .map(|category| CategoryEntry {
            id: category.id(),
            label: category.label(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "categories": categories,
        "featured": featured_resources(),
        "resources": search_resources(filter, query.q.as_deref().unwrap_or_default()),
    })))
}

pub async fn list_field_notes() -> HttpResponse {
    HttpResponse::Ok().json(field_notes())
}

pub async fn field_note(slug: web::Path<String>) -> Result<HttpResponse, ContentError> {
    let slug = slug.into_inner();
    match crate::content::field_note(&slug) {
        Some(note) => Ok(HttpResponse::Ok().json(note)),
        None => Err(ContentError::IssueNotFound(slug)),
    }
}

//! # API de contenido del sitio
//!
//! Listados de solo lectura de las colecciones que alimentan las páginas
//! del sitio: equipo de cocina, carta, reseñas, preguntas frecuentes,
//! razones para elegirnos y tipos de mesa. El filtrado y la ordenación que
//! las páginas aplicaban en el cliente se respetan aquí vía parámetros de
//! consulta.

use actix_web::{get, web, HttpResponse, Responder};
use mongodb::bson::{doc, Document};
use serde::Deserialize;

use super::middleware::ErrorLogExt;
use super::{AppError, AppResult};
use crate::db::MongoRepo;

/// Recorre un cursor tipado acumulando los documentos deserializados
async fn collect_items<T>(mut cursor: mongodb::Cursor<T>, what: &str) -> AppResult<Vec<T>>
where
    T: serde::de::DeserializeOwned + Unpin + Send + Sync,
{
    let mut results = Vec::new();
    while cursor
        .advance()
        .await
        .map_err(|e| AppError::database(what, e))?
    {
        let item = cursor
            .deserialize_current()
            .map_err(|e| AppError::Internal(format!("Error deserializando {}: {}", what, e)))?;
        results.push(item);
    }
    Ok(results)
}

#[get("/chefs")]
async fn list_chefs(repo: web::Data<MongoRepo>) -> AppResult<impl Responder> {
    let cursor = repo
        .chefs()
        .find(doc! {})
        .await
        .log_error_context("listing chefs")
        .map_err(|e| AppError::database("list_chefs", e))?;

    let items = collect_items(cursor, "chefs").await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "items": items })))
}

#[derive(Deserialize)]
struct MenuQuery {
    /// Filtrar por categoría exacta de la carta
    category: Option<String>,
}

#[get("/menuitems")]
async fn list_menu_items(
    repo: web::Data<MongoRepo>,
    query: web::Query<MenuQuery>,
) -> AppResult<impl Responder> {
    // Filtro dinámico según los parámetros recibidos
    let mut filter = Document::new();
    if let Some(category) = &query.category {
        filter.insert("category", category);
    }

    let cursor = repo
        .menu_items()
        .find(filter)
        .await
        .log_error_context("listing menu items")
        .map_err(|e| AppError::database("list_menu_items", e))?;

    let items = collect_items(cursor, "menuitems").await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "items": items })))
}

#[derive(Deserialize)]
struct ReviewQuery {
    /// Filtrar por puntuación exacta (1-5)
    rating: Option<i32>,
}

#[get("/customerreviews")]
async fn list_customer_reviews(
    repo: web::Data<MongoRepo>,
    query: web::Query<ReviewQuery>,
) -> AppResult<impl Responder> {
    let mut filter = Document::new();
    if let Some(rating) = query.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::validation_field(
                "rating",
                "La puntuación debe estar entre 1 y 5",
            ));
        }
        filter.insert("rating", rating);
    }

    let cursor = repo
        .customer_reviews()
        .find(filter)
        .await
        .log_error_context("listing customer reviews")
        .map_err(|e| AppError::database("list_customer_reviews", e))?;

    let items = collect_items(cursor, "customerreviews").await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "items": items })))
}

/// Parámetros de consulta de las preguntas frecuentes
#[derive(Deserialize)]
struct FaqQuery {
    /// Filtrar por categoría exacta
    category: Option<String>,
    /// Devolver solo las preguntas destacadas
    featured: Option<bool>,
}

/// Lista las preguntas frecuentes
///
/// Siempre ordenadas por `sortOrder` ascendente (ausente cuenta como
/// cero), que es el orden en el que la página las muestra.
///
/// # Filtros disponibles
/// - `category`: categoría exacta
/// - `featured`: `true` para quedarse solo con las destacadas
#[get("/faqs")]
async fn list_faqs(
    repo: web::Data<MongoRepo>,
    query: web::Query<FaqQuery>,
) -> AppResult<impl Responder> {
    let mut filter = Document::new();
    if let Some(category) = &query.category {
        filter.insert("category", category);
    }
    if let Some(true) = query.featured {
        filter.insert("isFeatured", true);
    }

    let cursor = repo
        .faqs()
        .find(filter)
        .await
        .log_error_context("listing faqs")
        .map_err(|e| AppError::database("list_faqs", e))?;

    let mut items = collect_items(cursor, "faqs").await?;
    items.sort_by_key(|f| f.sort_order.unwrap_or(0));

    Ok(HttpResponse::Ok().json(serde_json::json!({ "items": items })))
}

#[get("/reasonstochooseus")]
async fn list_reasons(repo: web::Data<MongoRepo>) -> AppResult<impl Responder> {
    let cursor = repo
        .reasons_to_choose_us()
        .find(doc! {})
        .await
        .log_error_context("listing reasons")
        .map_err(|e| AppError::database("list_reasons", e))?;

    let mut items = collect_items(cursor, "reasonstochooseus").await?;
    // La portada las muestra por displayOrder ascendente
    items.sort_by_key(|r| r.display_order.unwrap_or(0));

    Ok(HttpResponse::Ok().json(serde_json::json!({ "items": items })))
}

#[get("/seatingtypes")]
async fn list_seating_types(repo: web::Data<MongoRepo>) -> AppResult<impl Responder> {
    let cursor = repo
        .seating_types()
        .find(doc! {})
        .await
        .log_error_context("listing seating types")
        .map_err(|e| AppError::database("list_seating_types", e))?;

    let items = collect_items(cursor, "seatingtypes").await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "items": items })))
}

/// Configura las rutas de contenido
///
/// # Rutas disponibles
/// - `GET /chefs`
/// - `GET /menuitems?category=`
/// - `GET /customerreviews?rating=`
/// - `GET /faqs?category=&featured=`
/// - `GET /reasonstochooseus`
/// - `GET /seatingtypes`
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_chefs);
    cfg.service(list_menu_items);
    cfg.service(list_customer_reviews);
    cfg.service(list_faqs);
    cfg.service(list_reasons);
    cfg.service(list_seating_types);
}

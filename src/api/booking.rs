//! # API de Reservas
//!
//! Este módulo maneja todas las operaciones sobre la colección `bookings`:
//! - Crear una reserva a partir del formulario del asistente
//! - Listar reservas con filtro por estado y ordenación
//! - Cambiar el estado de una reserva (pending/confirmed/cancelled)
//! - Eliminar una reserva
//!
//! Las mutaciones sobre una reserva que ya no existe se tratan como éxito:
//! la siguiente recarga del listado reconcilia sola.

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use super::middleware::ErrorLogExt;
use super::{AppError, AppResult};
use crate::db::gateway::{BookingStore, DeleteOutcome, UpdateOutcome, BOOKINGS_PAGE_LIMIT};
use crate::db::MongoRepo;
use crate::reservation::board::{filter_bookings, sort_bookings, SortKey, StatusFilter};
use crate::reservation::wizard::{Wizard, WizardForm};
use crate::reservation::BookingStatus;

/// Formulario completo del asistente de reserva
///
/// Todos los valores llegan como texto, tal y como los tecleó el cliente;
/// `guests` se queda en cadena para que el centinela "10+" no se convierta
/// a número por el camino.
#[derive(Deserialize)]
struct BookingRequest {
    /// Fecha de la reserva (formato YYYY-MM-DD)
    date: String,
    /// Franja horaria (por ejemplo "7:30 PM")
    time: String,
    /// Número de comensales ("1".."10" o "10+")
    guests: String,
    /// Tipo de mesa (indoor/outdoor/bar/private)
    seating: String,
    /// Nombre completo del cliente
    name: String,
    /// Email del cliente
    email: String,
    /// Teléfono del cliente
    phone: String,
    /// Peticiones especiales (opcional)
    #[serde(default, rename = "specialRequests")]
    special_requests: String,
}

impl From<BookingRequest> for WizardForm {
    fn from(data: BookingRequest) -> WizardForm {
        WizardForm {
            date: data.date,
            time: data.time,
            guests: data.guests,
            seating: data.seating,
            name: data.name,
            email: data.email,
            phone: data.phone,
            special_requests: data.special_requests,
        }
    }
}

/// Parámetros de consulta del listado de reservas
#[derive(Deserialize)]
struct BookingQuery {
    /// Filtrar por estado ("all", "pending", "confirmed", "cancelled")
    status: Option<String>,
    /// Criterio de ordenación ("date-desc", "date-asc", "name")
    sort: Option<String>,
}

/// Cuerpo del cambio de estado
#[derive(Deserialize)]
struct UpdateStatusRequest {
    #[serde(rename = "bookingStatus")]
    booking_status: String,
}

/// Crea una nueva reserva
///
/// El servidor vuelve a recorrer el asistente con el formulario recibido:
/// avanza los pasos Fecha/Hora → Mesa → Contacto y envía. Un formulario
/// que no llega al paso de confirmación se rechaza indicando el paso
/// atascado, de modo que ninguna reserva se persiste sin todos los campos
/// obligatorios.
///
/// # Validaciones
/// - Fecha, hora y comensales no pueden estar vacíos (paso 1)
/// - Tipo de mesa elegido (paso 2)
/// - Nombre, email y teléfono no pueden estar vacíos (paso 3)
/// - La fecha debe parsear como YYYY-MM-DD
/// - La hora debe pertenecer a las franjas reservables (7:00 AM - 9:00 PM)
/// - Los comensales deben ser 1-10 o el centinela "10+"
/// - El tipo de mesa debe ser indoor, outdoor, bar o private
///
/// # Respuesta
/// ```json
/// {
///   "message": "Reserva creada correctamente",
///   "id": "7f9c24e8-3b2a-4f6d-9c1e-8a5b3d2f1e0c",
///   "bookingStatus": "pending"
/// }
/// ```
///
/// # Errores
/// - `400 Bad Request`: formulario incompleto o valores fuera de los
///   conjuntos permitidos
/// - `500 Internal Server Error`: error de base de datos
#[post("/bookings")]
async fn make_booking(
    repo: web::Data<MongoRepo>,
    data: web::Json<BookingRequest>,
) -> AppResult<impl Responder> {
    let nueva = Wizard::complete(WizardForm::from(data.into_inner()))?;

    let booking = repo
        .insert_booking(&nueva)
        .await
        .log_error_context("inserting new booking")?;

    tracing::info!(
        id = booking.id.as_deref().unwrap_or(""),
        date = %nueva.booking_date,
        time = %nueva.booking_time,
        "Reserva creada"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Reserva creada correctamente",
        "id": booking.id,
        "bookingStatus": BookingStatus::Pending.as_str()
    })))
}

/// Lista las reservas con filtro por estado y ordenación
///
/// Recupera hasta 100 reservas y aplica en memoria el mismo filtro y la
/// misma ordenación que usa el panel de administración: estados
/// desconocidos cuentan como pendientes, las fechas ausentes como el
/// origen de tiempos y los nombres ausentes como cadena vacía.
///
/// # Filtros disponibles
/// - `status`: "all" (por defecto), "pending", "confirmed", "cancelled"
/// - `sort`: "date-desc" (por defecto), "date-asc", "name"
///
/// # Respuesta
/// ```json
/// {
///   "items": [
///     {
///       "_id": "7f9c24e8-3b2a-4f6d-9c1e-8a5b3d2f1e0c",
///       "customerName": "Lucía Romero",
///       "email": "lucia@example.com",
///       "phone": "+34 600 111 222",
///       "bookingDate": "2024-03-05",
///       "bookingTime": "7:30 PM",
///       "numberOfGuests": 4,
///       "seatingType": "outdoor",
///       "bookingStatus": "pending",
///       "_createdDate": 1709658000,
///       "_updatedDate": 1709658000
///     }
///   ],
///   "total": 1
/// }
/// ```
///
/// # Errores
/// - `400 Bad Request`: valor de `status` o `sort` desconocido
/// - `500 Internal Server Error`: error de base de datos
#[get("/bookings")]
async fn get_bookings(
    repo: web::Data<MongoRepo>,
    query: web::Query<BookingQuery>,
) -> AppResult<impl Responder> {
    let filter = match &query.status {
        Some(raw) => raw
            .parse::<StatusFilter>()
            .map_err(|e| AppError::validation_field("status", &e))?,
        None => StatusFilter::All,
    };

    let sort = match &query.sort {
        Some(raw) => raw
            .parse::<SortKey>()
            .map_err(|e| AppError::validation_field("sort", &e))?,
        None => SortKey::default(),
    };

    let bookings = repo
        .fetch_bookings(BOOKINGS_PAGE_LIMIT)
        .await
        .log_error_context("fetching bookings")?;

    let mut view = filter_bookings(&bookings, filter);
    sort_bookings(&mut view, sort);
    let total = view.len();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "items": view,
        "total": total
    })))
}

/// Cambia el estado de una reserva
///
/// Actualiza únicamente `bookingStatus` (más el timestamp de
/// modificación); el resto de campos no se tocan. Si la reserva ya no
/// existe, por ejemplo porque otro administrador la borró, la operación
/// cuenta como éxito y la siguiente recarga del listado reconcilia.
///
/// # Parámetros
/// - `path`: ID de la reserva (en la URL)
/// - `data`: `{"bookingStatus": "pending" | "confirmed" | "cancelled"}`
///
/// # Respuesta
/// ```json
/// {
///   "message": "Estado de la reserva actualizado",
///   "id": "7f9c24e8-3b2a-4f6d-9c1e-8a5b3d2f1e0c",
///   "bookingStatus": "confirmed"
/// }
/// ```
///
/// # Errores
/// - `400 Bad Request`: estado desconocido
/// - `500 Internal Server Error`: error de base de datos
#[post("/bookings/{id}/status")]
async fn update_booking_status(
    repo: web::Data<MongoRepo>,
    path: web::Path<String>,
    data: web::Json<UpdateStatusRequest>,
) -> AppResult<impl Responder> {
    let id = path.into_inner();
    let status = data
        .booking_status
        .parse::<BookingStatus>()
        .map_err(|e| AppError::validation_field("bookingStatus", &e))?;

    let outcome = repo
        .update_booking_status(&id, status)
        .await
        .log_error_context("updating booking status")?;

    let message = match outcome {
        UpdateOutcome::Updated => "Estado de la reserva actualizado",
        UpdateOutcome::Missing => "La reserva ya no existe, el listado se reconciliará al recargar",
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "id": id,
        "bookingStatus": status.as_str()
    })))
}

/// Elimina una reserva
///
/// Borrar una reserva que ya no existe también cuenta como éxito: el
/// estado final es el mismo.
///
/// # Respuesta
/// ```json
/// {
///   "message": "Reserva eliminada correctamente",
///   "id": "7f9c24e8-3b2a-4f6d-9c1e-8a5b3d2f1e0c"
/// }
/// ```
///
/// # Errores
/// - `500 Internal Server Error`: error de base de datos
#[delete("/bookings/{id}")]
async fn delete_booking(
    repo: web::Data<MongoRepo>,
    path: web::Path<String>,
) -> AppResult<impl Responder> {
    let id = path.into_inner();

    let outcome = repo
        .delete_booking(&id)
        .await
        .log_error_context("deleting booking")?;

    let message = match outcome {
        DeleteOutcome::Deleted => "Reserva eliminada correctamente",
        DeleteOutcome::Missing => "La reserva ya no existía",
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "id": id
    })))
}

/// Configura las rutas relacionadas con reservas
///
/// # Rutas disponibles
/// - `POST /bookings` - Crear nueva reserva
/// - `GET /bookings` - Listar reservas con filtro y ordenación
/// - `POST /bookings/{id}/status` - Cambiar el estado de una reserva
/// - `DELETE /bookings/{id}` - Eliminar reserva
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(make_booking);
    cfg.service(get_bookings);
    cfg.service(update_booking_status);
    cfg.service(delete_booking);
}

//! Contrato de acceso a datos para la colección de reservas
//!
//! El panel de administración y la API hablan con el almacén a través de
//! este trait, de modo que las pruebas pueden sustituir MongoDB por un
//! almacén en memoria. Toda operación devuelve `Result`: los fallos del
//! almacén nunca se tragan en silencio.

use async_trait::async_trait;

use crate::api::AppResult;
use crate::db::Booking;
use crate::reservation::{BookingStatus, NewBooking};

/// Tamaño de página del listado de reservas
pub const BOOKINGS_PAGE_LIMIT: i64 = 100;

/// Resultado de una actualización de estado
///
/// `Missing` no es un error: la reserva pudo borrarla otro administrador y
/// la recarga del listado reconcilia sola.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Missing,
}

/// Resultado de un borrado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
}

/// Almacén de reservas
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Lista hasta `limit` reservas
    async fn fetch_bookings(&self, limit: i64) -> AppResult<Vec<Booking>>;

    /// Inserta una reserva nueva; el almacén asigna id y timestamps
    async fn insert_booking(&self, nueva: &NewBooking) -> AppResult<Booking>;

    /// Actualiza solo el estado (y el timestamp de modificación) de una
    /// reserva por id
    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> AppResult<UpdateOutcome>;

    /// Elimina una reserva por id
    async fn delete_booking(&self, id: &str) -> AppResult<DeleteOutcome>;
}

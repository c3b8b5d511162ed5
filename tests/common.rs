//! Utilidades compartidas por las pruebas de integración:
//! un almacén de reservas en memoria con fallos inyectables.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use boho_reservation::api::{AppError, AppResult};
use boho_reservation::db::gateway::{BookingStore, DeleteOutcome, UpdateOutcome};
use boho_reservation::db::Booking;
use boho_reservation::reservation::{BookingStatus, GuestCount, NewBooking, SeatingType};

#[derive(Default)]
struct MemStoreInner {
    items: Vec<Booking>,
    fail_next: bool,
    clock: i64,
    fetch_calls: usize,
    update_calls: usize,
    delete_calls: usize,
}

/// Almacén de reservas en memoria
///
/// Clonarlo comparte el mismo estado interno, de modo que una prueba puede
/// conservar un mango para sembrar datos o inyectar fallos mientras la
/// vista usa otro.
#[derive(Default, Clone)]
pub struct MemStore {
    inner: Arc<Mutex<MemStoreInner>>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore::default()
    }

    /// Siembra reservas directamente, sin pasar por el asistente
    pub fn seed(&self, bookings: Vec<Booking>) {
        self.inner.lock().unwrap().items.extend(bookings);
    }

    /// La siguiente operación sobre el almacén fallará
    pub fn fail_next(&self) {
        self.inner.lock().unwrap().fail_next = true;
    }

    pub fn snapshot(&self) -> Vec<Booking> {
        self.inner.lock().unwrap().items.clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.inner.lock().unwrap().fetch_calls
    }

    pub fn update_calls(&self) -> usize {
        self.inner.lock().unwrap().update_calls
    }

    pub fn delete_calls(&self) -> usize {
        self.inner.lock().unwrap().delete_calls
    }

    fn take_failure(inner: &mut MemStoreInner) -> AppResult<()> {
        if inner.fail_next {
            inner.fail_next = false;
            Err(AppError::Internal("Fallo simulado del almacén".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookingStore for MemStore {
    async fn fetch_bookings(&self, limit: i64) -> AppResult<Vec<Booking>> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetch_calls += 1;
        MemStore::take_failure(&mut inner)?;
        Ok(inner.items.iter().take(limit as usize).cloned().collect())
    }

    async fn insert_booking(&self, nueva: &NewBooking) -> AppResult<Booking> {
        let mut inner = self.inner.lock().unwrap();
        MemStore::take_failure(&mut inner)?;
        inner.clock += 1;
        let booking = Booking::from_new(nueva, Uuid::new_v4().to_string(), inner.clock);
        inner.items.push(booking.clone());
        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> AppResult<UpdateOutcome> {
        let mut inner = self.inner.lock().unwrap();
        inner.update_calls += 1;
        MemStore::take_failure(&mut inner)?;
        inner.clock += 1;
        let clock = inner.clock;
        match inner
            .items
            .iter_mut()
            .find(|b| b.id.as_deref() == Some(id))
        {
            Some(booking) => {
                booking.booking_status = Some(status.as_str().to_string());
                booking.updated_date = clock;
                Ok(UpdateOutcome::Updated)
            }
            None => Ok(UpdateOutcome::Missing),
        }
    }

    async fn delete_booking(&self, id: &str) -> AppResult<DeleteOutcome> {
        let mut inner = self.inner.lock().unwrap();
        inner.delete_calls += 1;
        MemStore::take_failure(&mut inner)?;
        let before = inner.items.len();
        inner.items.retain(|b| b.id.as_deref() != Some(id));
        if inner.items.len() < before {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }
}

/// Reserva almacenada de ejemplo, con id y estado elegidos por la prueba
pub fn stored_booking(id: &str, name: &str, date: &str, status: &str) -> Booking {
    Booking {
        id: Some(id.to_string()),
        customer_name: Some(name.to_string()),
        email: Some(format!("{}@example.com", id)),
        phone: Some("+34 600 000 000".to_string()),
        booking_date: Some(date.to_string()),
        booking_time: Some("8:00 PM".to_string()),
        number_of_guests: Some(GuestCount::Exact(2)),
        seating_type: Some(SeatingType::Indoor.as_str().to_string()),
        special_requests: None,
        booking_status: Some(status.to_string()),
        created_date: 1,
        updated_date: 1,
    }
}

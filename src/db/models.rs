//! Modelos de las colecciones persistidas
//!
//! Los campos de contenido son todos opcionales: las páginas muestran los
//! huecos como N/A y un registro parcial nunca debe tumbar un listado. Los
//! ids son cadenas opacas que asigna el repositorio al insertar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::{BookingStatus, GuestCount, NewBooking};

/// Una reserva almacenada en la colección `bookings`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Fecha en formato YYYY-MM-DD
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
    pub number_of_guests: Option<GuestCount>,
    pub seating_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub booking_status: Option<String>,
    #[serde(default, rename = "_createdDate")]
    pub created_date: i64, // timestamp unix
    #[serde(default, rename = "_updatedDate")]
    pub updated_date: i64, // timestamp unix
}

impl Booking {
    /// Materializa una reserva nueva con el id y los timestamps que asigna
    /// el repositorio
    pub fn from_new(nueva: &NewBooking, id: String, timestamp: i64) -> Booking {
        Booking {
            id: Some(id),
            customer_name: Some(nueva.customer_name.clone()),
            email: Some(nueva.email.clone()),
            phone: Some(nueva.phone.clone()),
            booking_date: Some(nueva.booking_date.clone()),
            booking_time: Some(nueva.booking_time.clone()),
            number_of_guests: Some(nueva.number_of_guests),
            seating_type: Some(nueva.seating_type.as_str().to_string()),
            special_requests: nueva.special_requests.clone(),
            booking_status: Some(BookingStatus::Pending.as_str().to_string()),
            created_date: timestamp,
            updated_date: timestamp,
        }
    }

    /// Estado normalizado: ausente o desconocido cuenta como pendiente
    pub fn status(&self) -> BookingStatus {
        BookingStatus::from_raw(self.booking_status.as_deref())
    }

    /// Fecha para ordenar: ausente o no parseable cuenta como 1970-01-01
    pub fn sort_date(&self) -> NaiveDate {
        self.booking_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or_default()
    }

    /// Nombre para ordenar: ausente cuenta como cadena vacía
    pub fn sort_name(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Chef {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub chef_name: Option<String>,
    pub chef_photo: Option<String>,
    pub short_introduction: Option<String>,
    pub passion_and_story: Option<String>,
    pub specialty: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub chef_note: Option<String>,
    pub dietary_restrictions: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReview {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub customer_name: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<i32>,
    pub review_date: Option<String>,
    pub customer_photo: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReasonToChooseUs {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reason_title: Option<String>,
    pub reason_description: Option<String>,
    pub reason_image: Option<String>,
    pub display_order: Option<i32>,
    pub call_to_action_text: Option<String>,
    pub call_to_action_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeatingTypeInfo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub seating_type_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub max_capacity: Option<i32>,
    pub is_bookable: Option<bool>,
    pub location_details: Option<String>,
}

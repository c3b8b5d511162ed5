//! # Núcleo de reservas
//!
//! Este módulo contiene el vocabulario de dominio de una reserva y sus
//! reglas de validación:
//!
//! - [`BookingStatus`] - Ciclo de vida de la reserva (pending/confirmed/cancelled)
//! - [`SeatingType`] - Tipo de mesa (indoor/outdoor/bar/private)
//! - [`GuestCount`] - Número de comensales (1-10 o el centinela "10+")
//! - [`NewBooking`] - Carga tipada lista para persistir
//! - [`wizard`] - Máquina de estados del formulario de reserva
//! - [`board`] - Vista de administración del listado de reservas

pub mod board;
pub mod wizard;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Franjas horarias reservables: medias horas y horas en punto
/// entre las 7:00 AM y las 9:00 PM (inclusive).
pub const TIME_SLOTS: [&str; 29] = [
    "7:00 AM", "7:30 AM", "8:00 AM", "8:30 AM", "9:00 AM", "9:30 AM",
    "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM",
    "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM",
    "4:00 PM", "4:30 PM", "5:00 PM", "5:30 PM", "6:00 PM", "6:30 PM",
    "7:00 PM", "7:30 PM", "8:00 PM", "8:30 PM", "9:00 PM",
];

/// Comprueba si una hora pertenece a la tabla de franjas reservables
pub fn is_valid_time_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

/// Estado del ciclo de vida de una reserva
///
/// El valor por defecto es `Pending`: cualquier valor desconocido o ausente
/// en un registro almacenado se muestra como pendiente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Normaliza el estado crudo de un registro almacenado.
    ///
    /// Valores desconocidos o ausentes se tratan como `Pending` a efectos
    /// de visualización y filtrado.
    pub fn from_raw(raw: Option<&str>) -> BookingStatus {
        raw.and_then(|s| s.parse().ok()).unwrap_or(BookingStatus::Pending)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!(
                "Estado de reserva inválido '{}', use pending, confirmed o cancelled",
                other
            )),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tipo de mesa ofrecido por el local
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatingType {
    Indoor,
    Outdoor,
    Bar,
    Private,
}

impl SeatingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatingType::Indoor => "indoor",
            SeatingType::Outdoor => "outdoor",
            SeatingType::Bar => "bar",
            SeatingType::Private => "private",
        }
    }
}

impl FromStr for SeatingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indoor" => Ok(SeatingType::Indoor),
            "outdoor" => Ok(SeatingType::Outdoor),
            "bar" => Ok(SeatingType::Bar),
            "private" => Ok(SeatingType::Private),
            other => Err(format!(
                "Tipo de mesa inválido '{}', use indoor, outdoor, bar o private",
                other
            )),
        }
    }
}

impl fmt::Display for SeatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Número de comensales de una reserva
///
/// En el cable viaja como número entero, salvo el centinela `"10+"` que
/// marca una reserva de grupo y se conserva como texto: nunca se convierte
/// a valor numérico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCount {
    Exact(u32),
    MoreThanTen,
}

impl GuestCount {
    /// Parsea el valor tal y como lo envía el formulario ("1".."10" o "10+")
    pub fn parse(raw: &str) -> Result<GuestCount, String> {
        let raw = raw.trim();
        if raw == "10+" {
            return Ok(GuestCount::MoreThanTen);
        }
        match raw.parse::<u32>() {
            Ok(n) if (1..=10).contains(&n) => Ok(GuestCount::Exact(n)),
            _ => Err(format!(
                "Número de comensales inválido '{}', use 1-10 o \"10+\"",
                raw
            )),
        }
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuestCount::Exact(n) => write!(f, "{}", n),
            GuestCount::MoreThanTen => f.write_str("10+"),
        }
    }
}

impl Serialize for GuestCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GuestCount::Exact(n) => serializer.serialize_u32(*n),
            GuestCount::MoreThanTen => serializer.serialize_str("10+"),
        }
    }
}

struct GuestCountVisitor;

impl<'de> Visitor<'de> for GuestCountVisitor {
    type Value = GuestCount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("un número de comensales o la cadena \"10+\"")
    }

    // Los registros almacenados pueden traer el número como i32, i64 o
    // double según cómo los escribiera el driver
    fn visit_i64<E: de::Error>(self, value: i64) -> Result<GuestCount, E> {
        if value < 0 {
            return Err(E::custom("número de comensales negativo"));
        }
        Ok(GuestCount::Exact(value as u32))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<GuestCount, E> {
        Ok(GuestCount::Exact(value as u32))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<GuestCount, E> {
        if value < 0.0 {
            return Err(E::custom("número de comensales negativo"));
        }
        Ok(GuestCount::Exact(value as u32))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<GuestCount, E> {
        if value == "10+" {
            Ok(GuestCount::MoreThanTen)
        } else {
            Err(E::custom(format!(
                "cadena de comensales inválida '{}'",
                value
            )))
        }
    }
}

impl<'de> Deserialize<'de> for GuestCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<GuestCount, D::Error> {
        deserializer.deserialize_any(GuestCountVisitor)
    }
}

/// Carga tipada de una reserva nueva, lista para persistir
///
/// Solo el asistente de reserva ([`wizard`]) produce valores de este tipo,
/// de modo que nunca llega al repositorio una reserva sin los campos
/// obligatorios. El estado inicial es siempre `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    /// Fecha en formato YYYY-MM-DD
    pub booking_date: String,
    /// Una de las franjas de [`TIME_SLOTS`]
    pub booking_time: String,
    pub number_of_guests: GuestCount,
    pub seating_type: SeatingType,
    pub special_requests: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_desconocido_se_muestra_como_pendiente() {
        assert_eq!(BookingStatus::from_raw(None), BookingStatus::Pending);
        assert_eq!(
            BookingStatus::from_raw(Some("archived")),
            BookingStatus::Pending
        );
        assert_eq!(
            BookingStatus::from_raw(Some("CONFIRMED")),
            BookingStatus::Confirmed
        );
    }

    #[test]
    fn parseo_de_estado_ignora_mayusculas() {
        assert_eq!(
            "Cancelled".parse::<BookingStatus>(),
            Ok(BookingStatus::Cancelled)
        );
        assert!("done".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn centinela_de_grupo_no_se_convierte_a_numero() {
        assert_eq!(GuestCount::parse("10+"), Ok(GuestCount::MoreThanTen));
        assert_eq!(GuestCount::MoreThanTen.to_string(), "10+");

        let json = serde_json::to_value(GuestCount::MoreThanTen).unwrap();
        assert_eq!(json, serde_json::json!("10+"));

        let back: GuestCount = serde_json::from_value(json).unwrap();
        assert_eq!(back, GuestCount::MoreThanTen);
    }

    #[test]
    fn comensales_fuera_de_rango_se_rechazan() {
        assert!(GuestCount::parse("0").is_err());
        assert!(GuestCount::parse("11").is_err());
        assert!(GuestCount::parse("dos").is_err());
        assert_eq!(GuestCount::parse("10"), Ok(GuestCount::Exact(10)));
    }

    #[test]
    fn tabla_de_franjas_cubre_de_7am_a_9pm() {
        assert_eq!(TIME_SLOTS.len(), 29);
        assert_eq!(TIME_SLOTS.first(), Some(&"7:00 AM"));
        assert_eq!(TIME_SLOTS.last(), Some(&"9:00 PM"));
        assert!(is_valid_time_slot("12:30 PM"));
        assert!(!is_valid_time_slot("9:30 PM"));
        assert!(!is_valid_time_slot("07:00"));
    }
}

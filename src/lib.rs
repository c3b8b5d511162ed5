//! Biblioteca del servidor de reservas y contenido del café Boho Boho
//!
//! Expone los tres bloques del sistema:
//!
//! - [`reservation`] - Núcleo de reservas: modelo, asistente por pasos y
//!   panel de administración
//! - [`db`] - Repositorio MongoDB y contrato de acceso a datos
//! - [`api`] - Rutas y controladores REST

pub mod api;
pub mod db;
pub mod reservation;

//! # Módulo API
//!
//! Este módulo contiene todas las rutas y controladores de la API REST.
//!
//! ## Módulos principales
//!
//! - [`booking`] - Gestión de reservas (crear, listar, cambiar estado, eliminar)
//! - [`content`] - Listados de contenido del sitio (carta, equipo, reseñas, FAQs)
//! - [`errors`] - Manejo de errores de la aplicación

pub mod booking;
pub mod content;
pub mod errors;
mod middleware;

// Re-exportar tipos comunes para facilitar su uso
pub use errors::{AppError, AppResult, ErrorResponse};

use actix_web::web;

/// Configura todas las rutas de la API
///
/// ## Rutas configuradas
///
/// - `/bookings/*` - Ver [`booking::routes`]
/// - `/chefs`, `/menuitems`, `/customerreviews`, `/faqs`,
///   `/reasonstochooseus`, `/seatingtypes` - Ver [`content::routes`]
///
/// # Parámetros
///
/// - `cfg`: Configuración del servicio Actix Web donde se registran las rutas
///
/// # Ejemplo
///
/// ```no_run
/// use actix_web::App;
/// use boho_reservation::api;
///
/// let app = App::new()
///     .configure(api::init_routes);
/// ```
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    booking::routes(cfg);
    content::routes(cfg);
}

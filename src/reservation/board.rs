//! # Panel de administración de reservas
//!
//! Vista sobre el listado de reservas existentes: carga hasta 100
//! registros, filtra por estado, ordena y muta el estado o elimina.
//!
//! El estado en memoria vive en [`BookingsBoard`], un valor sin E/S que se
//! puede probar de forma aislada; [`AdminView`] lo conecta a un
//! [`BookingStore`] y aplica la política de recuperación: parchear la copia
//! local cuando la mutación remota tiene éxito y recargar el listado
//! autoritativo cuando falla, en lugar de dejar estado local obsoleto.
//!
//! Las cargas llevan un número de secuencia monótono: una respuesta de una
//! carga antigua que llega tarde se descarta en vez de pisar el resultado
//! de la carga más reciente.

use std::str::FromStr;

use super::BookingStatus;
use crate::api::AppResult;
use crate::db::gateway::{BookingStore, DeleteOutcome, UpdateOutcome, BOOKINGS_PAGE_LIMIT};
use crate::db::Booking;

/// Filtro de estado del panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(BookingStatus),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<BookingStatus>().map(StatusFilter::Only)
    }
}

/// Criterio de ordenación del panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Más recientes primero (criterio por defecto del panel)
    DateDesc,
    DateAsc,
    /// Nombre de cliente, orden lexicográfico sensible a mayúsculas
    Name,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::DateDesc
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date-desc" => Ok(SortKey::DateDesc),
            "date-asc" => Ok(SortKey::DateAsc),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "Criterio de ordenación inválido '{}', use date-asc, date-desc o name",
                other
            )),
        }
    }
}

/// Filtra el listado en memoria por estado
///
/// Comparación insensible a mayúsculas sobre `bookingStatus`, con los
/// valores desconocidos normalizados a `pending`. Conserva el orden de
/// entrada.
pub fn filter_bookings<'a>(items: &'a [Booking], filter: StatusFilter) -> Vec<&'a Booking> {
    items
        .iter()
        .filter(|b| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => b.status() == status,
        })
        .collect()
}

/// Ordena el listado según el criterio elegido
///
/// Las fechas ausentes o no parseables cuentan como el origen de tiempos;
/// los nombres ausentes cuentan como cadena vacía. La ordenación es
/// estable.
pub fn sort_bookings(items: &mut [&Booking], key: SortKey) {
    match key {
        SortKey::DateAsc => items.sort_by_key(|b| b.sort_date()),
        SortKey::DateDesc => items.sort_by(|a, b| b.sort_date().cmp(&a.sort_date())),
        SortKey::Name => items.sort_by(|a, b| a.sort_name().cmp(b.sort_name())),
    }
}

/// Estado en memoria del panel: listado + secuencia de cargas
#[derive(Debug, Default)]
pub struct BookingsBoard {
    items: Vec<Booking>,
    last_issued: u64,
}

impl BookingsBoard {
    pub fn new() -> BookingsBoard {
        BookingsBoard::default()
    }

    /// Registra una nueva carga y devuelve su número de secuencia
    pub fn begin_load(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    /// Aplica el resultado de una carga
    ///
    /// Solo la carga emitida más recientemente puede aplicarse; una
    /// respuesta rezagada de una carga anterior se descarta y devuelve
    /// `false`.
    pub fn complete_load(&mut self, seq: u64, items: Vec<Booking>) -> bool {
        if seq != self.last_issued {
            return false;
        }
        self.items = items;
        true
    }

    /// Parchea en local el estado de una reserva
    ///
    /// Si el id no está en el listado no hace nada y devuelve `false`;
    /// la recarga posterior reconciliará.
    pub fn patch_status(&mut self, id: &str, status: BookingStatus) -> bool {
        match self.items.iter_mut().find(|b| b.id.as_deref() == Some(id)) {
            Some(booking) => {
                booking.booking_status = Some(status.as_str().to_string());
                true
            }
            None => false,
        }
    }

    /// Quita una reserva del listado en local
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|b| b.id.as_deref() != Some(id));
        self.items.len() < before
    }

    pub fn items(&self) -> &[Booking] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Listado filtrado y ordenado para mostrar
    pub fn view(&self, filter: StatusFilter, sort: SortKey) -> Vec<&Booking> {
        let mut view = filter_bookings(&self.items, filter);
        sort_bookings(&mut view, sort);
        view
    }
}

/// Panel de administración conectado a un almacén de reservas
///
/// Todas las operaciones que tocan el almacén devuelven `Result` y la capa
/// que lo use debe ramificar sobre él: ningún fallo se traga en silencio.
pub struct AdminView<S> {
    store: S,
    board: BookingsBoard,
    pub filter: StatusFilter,
    pub sort: SortKey,
}

impl<S: BookingStore> AdminView<S> {
    pub fn new(store: S) -> AdminView<S> {
        AdminView {
            store,
            board: BookingsBoard::new(),
            filter: StatusFilter::All,
            sort: SortKey::default(),
        }
    }

    /// Carga el listado autoritativo (hasta 100 registros)
    ///
    /// # Errores
    /// - `Database`: el almacén no respondió; el listado anterior se
    ///   conserva y la operación se puede reintentar
    pub async fn load_all(&mut self) -> AppResult<usize> {
        let seq = self.board.begin_load();
        let items = self.store.fetch_bookings(BOOKINGS_PAGE_LIMIT).await?;
        self.board.complete_load(seq, items);
        Ok(self.board.len())
    }

    /// Cambia el estado de una reserva
    ///
    /// Éxito remoto: se parchea la copia local. Registro desaparecido:
    /// equivalente a éxito, la recarga reconcilia. Fallo remoto: se recarga
    /// el listado autoritativo antes de propagar el error.
    pub async fn set_status(&mut self, id: &str, status: BookingStatus) -> AppResult<()> {
        match self.store.update_booking_status(id, status).await {
            Ok(UpdateOutcome::Updated) => {
                self.board.patch_status(id, status);
                Ok(())
            }
            Ok(UpdateOutcome::Missing) => {
                self.reload_after_divergence("set_status").await;
                Ok(())
            }
            Err(e) => {
                self.reload_after_divergence("set_status").await;
                Err(e)
            }
        }
    }

    /// Elimina una reserva
    ///
    /// Misma política de recuperación que [`set_status`].
    ///
    /// [`set_status`]: AdminView::set_status
    pub async fn remove(&mut self, id: &str) -> AppResult<()> {
        match self.store.delete_booking(id).await {
            Ok(DeleteOutcome::Deleted) => {
                self.board.remove(id);
                Ok(())
            }
            Ok(DeleteOutcome::Missing) => {
                self.reload_after_divergence("remove").await;
                Ok(())
            }
            Err(e) => {
                self.reload_after_divergence("remove").await;
                Err(e)
            }
        }
    }

    /// Recarga tras una mutación fallida o divergente
    ///
    /// Si la propia recarga falla se deja constancia y se conserva el
    /// listado anterior; el siguiente `load_all` explícito reintentará.
    async fn reload_after_divergence(&mut self, operation: &str) {
        if let Err(e) = self.load_all().await {
            tracing::warn!(
                operation = %operation,
                error = %e,
                "No se pudo recargar el listado tras la divergencia"
            );
        }
    }

    /// Listado según el filtro y la ordenación activos
    pub fn view(&self) -> Vec<&Booking> {
        self.board.view(self.filter, self.sort)
    }

    pub fn total(&self) -> usize {
        self.board.len()
    }

    pub fn board(&self) -> &BookingsBoard {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: &str, name: &str, date: &str, status: &str) -> Booking {
        Booking {
            id: Some(id.to_string()),
            customer_name: if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            },
            booking_date: if date.is_empty() {
                None
            } else {
                Some(date.to_string())
            },
            booking_status: if status.is_empty() {
                None
            } else {
                Some(status.to_string())
            },
            ..Booking::default()
        }
    }

    fn nombres(view: &[&Booking]) -> Vec<String> {
        view.iter()
            .map(|b| b.customer_name.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn filtrar_por_confirmadas_conserva_el_orden() {
        let items = vec![
            booking("1", "Ana", "2024-01-10", "pending"),
            booking("2", "Bea", "2024-02-20", "confirmed"),
            booking("3", "Carla", "2024-03-05", "cancelled"),
            booking("4", "Diego", "2024-01-01", "confirmed"),
        ];
        let view = filter_bookings(&items, StatusFilter::Only(BookingStatus::Confirmed));
        assert_eq!(nombres(&view), vec!["Bea", "Diego"]);
    }

    #[test]
    fn el_filtro_normaliza_estados_desconocidos_a_pendiente() {
        let items = vec![
            booking("1", "Ana", "", "PENDING"),
            booking("2", "Bea", "", "archived"),
            booking("3", "Carla", "", ""),
            booking("4", "Diego", "", "confirmed"),
        ];
        let view = filter_bookings(&items, StatusFilter::Only(BookingStatus::Pending));
        assert_eq!(nombres(&view), vec!["Ana", "Bea", "Carla"]);
    }

    #[test]
    fn ordenar_por_fecha_ascendente() {
        let items = vec![
            booking("1", "Ana", "2024-03-05", "pending"),
            booking("2", "Bea", "2024-01-10", "pending"),
            booking("3", "Carla", "2024-02-20", "pending"),
        ];
        let mut view = filter_bookings(&items, StatusFilter::All);
        sort_bookings(&mut view, SortKey::DateAsc);
        assert_eq!(
            view.iter().map(|b| b.booking_date.clone().unwrap()).collect::<Vec<_>>(),
            vec!["2024-01-10", "2024-02-20", "2024-03-05"]
        );
    }

    #[test]
    fn fechas_ausentes_cuentan_como_origen_de_tiempos() {
        let items = vec![
            booking("1", "Ana", "2024-03-05", "pending"),
            booking("2", "Bea", "", "pending"),
            booking("3", "Carla", "sin-fecha", "pending"),
        ];
        let mut view = filter_bookings(&items, StatusFilter::All);
        sort_bookings(&mut view, SortKey::DateAsc);
        assert_eq!(nombres(&view), vec!["Bea", "Carla", "Ana"]);

        sort_bookings(&mut view, SortKey::DateDesc);
        assert_eq!(nombres(&view)[0], "Ana");
    }

    #[test]
    fn ordenar_por_nombre_es_sensible_a_mayusculas() {
        let items = vec![
            booking("1", "ana", "", "pending"),
            booking("2", "Bea", "", "pending"),
            booking("3", "", "", "pending"),
        ];
        let mut view = filter_bookings(&items, StatusFilter::All);
        sort_bookings(&mut view, SortKey::Name);
        // Los nombres ausentes cuentan como cadena vacía y las mayúsculas
        // ordenan antes que las minúsculas
        assert_eq!(nombres(&view), vec!["", "Bea", "ana"]);
    }

    #[test]
    fn una_carga_rezagada_se_descarta() {
        let mut board = BookingsBoard::new();
        let primera = board.begin_load();
        let segunda = board.begin_load();

        assert!(board.complete_load(segunda, vec![booking("1", "Ana", "", "pending")]));
        // La respuesta de la primera carga llega tarde: no pisa a la segunda
        assert!(!board.complete_load(primera, vec![]));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn parchear_un_id_ausente_no_hace_nada() {
        let mut board = BookingsBoard::new();
        let seq = board.begin_load();
        board.complete_load(seq, vec![booking("1", "Ana", "", "pending")]);

        assert!(!board.patch_status("999", BookingStatus::Cancelled));
        assert_eq!(board.items()[0].status(), BookingStatus::Pending);

        assert!(board.patch_status("1", BookingStatus::Confirmed));
        assert_eq!(board.items()[0].status(), BookingStatus::Confirmed);
    }

    #[test]
    fn quitar_una_reserva_del_listado() {
        let mut board = BookingsBoard::new();
        let seq = board.begin_load();
        board.complete_load(
            seq,
            vec![
                booking("1", "Ana", "", "pending"),
                booking("2", "Bea", "", "pending"),
            ],
        );

        assert!(board.remove("1"));
        assert!(!board.remove("1"));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn parseo_de_filtros_y_ordenacion() {
        assert_eq!("All".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "Confirmed".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(BookingStatus::Confirmed))
        );
        assert!("archived".parse::<StatusFilter>().is_err());

        assert_eq!("date-asc".parse::<SortKey>(), Ok(SortKey::DateAsc));
        assert_eq!("NAME".parse::<SortKey>(), Ok(SortKey::Name));
        assert!("price".parse::<SortKey>().is_err());
    }
}

//! # Asistente de reserva
//!
//! Máquina de estados del formulario de reserva en cuatro pasos:
//!
//! ```text
//! DateTime(1) → Seating(2) → Contact(3) → Confirmed(4)
//! ```
//!
//! El flujo es estrictamente lineal: no se salta ni se bifurca. El estado
//! es un valor inmutable y las transiciones se aplican con un reductor puro
//! (`(estado, acción) → estado`), de modo que el asistente se puede probar
//! sin interfaz ni red. Los datos intermedios viven solo en el formulario
//! en memoria: abandonar el flujo antes del paso 4 los descarta.

use chrono::NaiveDate;

use super::{is_valid_time_slot, GuestCount, NewBooking, SeatingType};
use crate::api::{AppError, AppResult};

/// Paso actual del asistente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    DateTime,
    Seating,
    Contact,
    Confirmed,
}

impl Step {
    /// Número de paso mostrado en el indicador de progreso (1-4)
    pub fn number(&self) -> u8 {
        match self {
            Step::DateTime => 1,
            Step::Seating => 2,
            Step::Contact => 3,
            Step::Confirmed => 4,
        }
    }

    fn next(&self) -> Step {
        match self {
            Step::DateTime => Step::Seating,
            Step::Seating => Step::Contact,
            Step::Contact => Step::Confirmed,
            Step::Confirmed => Step::Confirmed,
        }
    }

    fn back(&self) -> Step {
        match self {
            Step::DateTime => Step::DateTime,
            Step::Seating => Step::DateTime,
            Step::Contact => Step::Seating,
            // Paso terminal: no hay vuelta atrás
            Step::Confirmed => Step::Confirmed,
        }
    }
}

/// Campo editable del formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Time,
    Guests,
    Seating,
    Name,
    Email,
    Phone,
    SpecialRequests,
}

/// Datos del formulario tal y como los teclea el cliente
///
/// Todos los valores son texto libre; `guests` se conserva como cadena para
/// que el centinela de grupo `"10+"` nunca se convierta a número.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardForm {
    pub date: String,
    pub time: String,
    pub guests: String,
    pub seating: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: String,
}

/// Acción sobre el asistente
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Edita un campo del formulario
    Set(Field, String),
    /// Avanza al siguiente paso si el paso actual es válido
    Next,
    /// Retrocede un paso sin borrar lo ya tecleado
    Back,
    /// Envía el formulario; solo tiene efecto en el paso 3
    Submit,
}

/// Estado completo del asistente: paso actual + formulario
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    pub step: Step,
    pub form: WizardForm,
}

impl Default for Wizard {
    fn default() -> Self {
        Wizard::new()
    }
}

impl Wizard {
    /// Asistente recién abierto: paso 1 con el formulario vacío
    pub fn new() -> Wizard {
        Wizard {
            step: Step::DateTime,
            form: WizardForm::default(),
        }
    }

    /// Asistente en el paso 1 con un formulario ya relleno
    pub fn with_form(form: WizardForm) -> Wizard {
        Wizard {
            step: Step::DateTime,
            form,
        }
    }

    /// Predicado de validez del paso actual
    ///
    /// Comprueba únicamente que los campos obligatorios del paso no estén
    /// vacíos; la validación tipada (formato de fecha, franja horaria,
    /// rango de comensales) se hace al extraer la carga con [`payload`].
    ///
    /// [`payload`]: Wizard::payload
    pub fn step_valid(&self) -> bool {
        let filled = |s: &str| !s.trim().is_empty();
        match self.step {
            Step::DateTime => {
                filled(&self.form.date) && filled(&self.form.time) && filled(&self.form.guests)
            }
            Step::Seating => filled(&self.form.seating),
            Step::Contact => {
                filled(&self.form.name) && filled(&self.form.email) && filled(&self.form.phone)
            }
            Step::Confirmed => true,
        }
    }

    /// Reductor puro: aplica una acción y devuelve el nuevo estado
    ///
    /// Las acciones no permitidas en el paso actual no hacen nada: un
    /// `Next` con el paso inválido devuelve el estado sin cambios, igual
    /// que un `Back` en el paso 1 o cualquier acción en el paso terminal.
    pub fn apply(self, action: Action) -> Wizard {
        match action {
            Action::Set(field, value) => {
                if self.step == Step::Confirmed {
                    return self;
                }
                let mut form = self.form;
                match field {
                    Field::Date => form.date = value,
                    Field::Time => form.time = value,
                    Field::Guests => form.guests = value,
                    Field::Seating => form.seating = value,
                    Field::Name => form.name = value,
                    Field::Email => form.email = value,
                    Field::Phone => form.phone = value,
                    Field::SpecialRequests => form.special_requests = value,
                }
                Wizard {
                    step: self.step,
                    form,
                }
            }
            Action::Next => {
                if self.step != Step::Confirmed && self.step_valid() {
                    Wizard {
                        step: self.step.next(),
                        form: self.form,
                    }
                } else {
                    self
                }
            }
            Action::Back => Wizard {
                step: self.step.back(),
                form: self.form,
            },
            Action::Submit => {
                if self.step == Step::Contact && self.step_valid() {
                    Wizard {
                        step: Step::Confirmed,
                        form: self.form,
                    }
                } else {
                    self
                }
            }
        }
    }

    /// Campos obligatorios del paso actual que siguen vacíos
    fn missing_fields(&self) -> Vec<&'static str> {
        let empty = |s: &str| s.trim().is_empty();
        let mut missing = Vec::new();
        match self.step {
            Step::DateTime => {
                if empty(&self.form.date) {
                    missing.push("bookingDate");
                }
                if empty(&self.form.time) {
                    missing.push("bookingTime");
                }
                if empty(&self.form.guests) {
                    missing.push("numberOfGuests");
                }
            }
            Step::Seating => {
                if empty(&self.form.seating) {
                    missing.push("seatingType");
                }
            }
            Step::Contact => {
                if empty(&self.form.name) {
                    missing.push("customerName");
                }
                if empty(&self.form.email) {
                    missing.push("email");
                }
                if empty(&self.form.phone) {
                    missing.push("phone");
                }
            }
            Step::Confirmed => {}
        }
        missing
    }

    /// Extrae la carga tipada de una reserva confirmada
    ///
    /// Solo está disponible en el paso terminal; aquí se hace la validación
    /// tipada que el predicado de paso no cubre:
    ///
    /// - la fecha debe parsear como YYYY-MM-DD
    /// - la hora debe pertenecer a la tabla de franjas
    /// - los comensales deben ser 1-10 o el centinela "10+"
    /// - el tipo de mesa debe ser uno de los cuatro ofrecidos
    ///
    /// # Errores
    /// - `Validation` / `ValidationWithField`: formulario incompleto o
    ///   valores fuera de los conjuntos permitidos
    pub fn payload(&self) -> AppResult<NewBooking> {
        if self.step != Step::Confirmed {
            return Err(AppError::Validation(format!(
                "La reserva no está confirmada, el asistente sigue en el paso {}",
                self.step.number()
            )));
        }

        let date = self.form.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::validation_field("bookingDate", "Formato de fecha inválido, use YYYY-MM-DD")
        })?;

        let time = self.form.time.trim();
        if !is_valid_time_slot(time) {
            return Err(AppError::validation_field(
                "bookingTime",
                "La hora no pertenece a las franjas reservables (7:00 AM - 9:00 PM)",
            ));
        }

        let guests = GuestCount::parse(&self.form.guests)
            .map_err(|e| AppError::validation_field("numberOfGuests", &e))?;

        let seating: SeatingType = self
            .form
            .seating
            .parse()
            .map_err(|e: String| AppError::validation_field("seatingType", &e))?;

        let requests = self.form.special_requests.trim();

        Ok(NewBooking {
            customer_name: self.form.name.trim().to_string(),
            email: self.form.email.trim().to_string(),
            phone: self.form.phone.trim().to_string(),
            booking_date: date.to_string(),
            booking_time: time.to_string(),
            number_of_guests: guests,
            seating_type: seating,
            special_requests: if requests.is_empty() {
                None
            } else {
                Some(requests.to_string())
            },
        })
    }

    /// Recorre el flujo completo con un formulario ya relleno
    ///
    /// Reproduce en el servidor el mismo camino que sigue el cliente:
    /// avanza paso a paso y envía en el paso 3. Si el formulario no puede
    /// llegar al paso terminal, el error indica el paso atascado y los
    /// campos que faltan.
    pub fn complete(form: WizardForm) -> AppResult<NewBooking> {
        let wizard = Wizard::with_form(form)
            .apply(Action::Next)
            .apply(Action::Next)
            .apply(Action::Submit);

        if wizard.step != Step::Confirmed {
            let missing = wizard.missing_fields().join(", ");
            return Err(AppError::Validation(format!(
                "Formulario incompleto en el paso {}: faltan {}",
                wizard.step.number(),
                missing
            )));
        }

        wizard.payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formulario_completo() -> WizardForm {
        WizardForm {
            date: "2024-03-05".into(),
            time: "7:30 PM".into(),
            guests: "4".into(),
            seating: "outdoor".into(),
            name: "Lucía Romero".into(),
            email: "lucia@example.com".into(),
            phone: "+34 600 111 222".into(),
            special_requests: "".into(),
        }
    }

    #[test]
    fn next_avanza_solo_con_el_paso_valido() {
        // Paso 1 vacío: Next no hace nada
        let w = Wizard::new().apply(Action::Next);
        assert_eq!(w.step, Step::DateTime);

        // Paso 1 completo: Next avanza
        let w = Wizard::with_form(formulario_completo()).apply(Action::Next);
        assert_eq!(w.step, Step::Seating);

        // Paso 2 sin mesa elegida: Next no hace nada
        let mut form = formulario_completo();
        form.seating.clear();
        let w = Wizard::with_form(form).apply(Action::Next).apply(Action::Next);
        assert_eq!(w.step, Step::Seating);
    }

    #[test]
    fn back_retrocede_sin_borrar_lo_tecleado() {
        let w = Wizard::with_form(formulario_completo())
            .apply(Action::Next)
            .apply(Action::Next)
            .apply(Action::Back);
        assert_eq!(w.step, Step::Seating);
        assert_eq!(w.form, formulario_completo());

        // En el paso 1 no hay vuelta atrás
        let w = Wizard::new().apply(Action::Back);
        assert_eq!(w.step, Step::DateTime);
    }

    #[test]
    fn submit_solo_funciona_en_el_paso_de_contacto() {
        // Submit desde el paso 1 no hace nada aunque el formulario esté completo
        let w = Wizard::with_form(formulario_completo()).apply(Action::Submit);
        assert_eq!(w.step, Step::DateTime);

        let w = Wizard::with_form(formulario_completo())
            .apply(Action::Next)
            .apply(Action::Next)
            .apply(Action::Submit);
        assert_eq!(w.step, Step::Confirmed);
    }

    #[test]
    fn submit_sin_contacto_no_confirma() {
        let mut form = formulario_completo();
        form.phone.clear();
        let w = Wizard::with_form(form)
            .apply(Action::Next)
            .apply(Action::Next)
            .apply(Action::Submit);
        assert_eq!(w.step, Step::Contact);
        assert!(w.payload().is_err());
    }

    #[test]
    fn el_paso_terminal_ignora_ediciones() {
        let confirmado = Wizard::with_form(formulario_completo())
            .apply(Action::Next)
            .apply(Action::Next)
            .apply(Action::Submit);
        let tras_edicion = confirmado
            .clone()
            .apply(Action::Set(Field::Name, "otro".into()))
            .apply(Action::Next)
            .apply(Action::Back);
        assert_eq!(tras_edicion, confirmado);
    }

    #[test]
    fn complete_produce_la_carga_tipada() {
        let nueva = Wizard::complete(formulario_completo()).unwrap();
        assert_eq!(nueva.customer_name, "Lucía Romero");
        assert_eq!(nueva.booking_date, "2024-03-05");
        assert_eq!(nueva.booking_time, "7:30 PM");
        assert_eq!(nueva.number_of_guests, GuestCount::Exact(4));
        assert_eq!(nueva.seating_type, SeatingType::Outdoor);
        assert_eq!(nueva.special_requests, None);
    }

    #[test]
    fn el_centinela_de_grupo_se_acepta_en_el_paso_1() {
        let mut form = formulario_completo();
        form.guests = "10+".into();
        let w = Wizard::with_form(form.clone()).apply(Action::Next);
        assert_eq!(w.step, Step::Seating);

        let nueva = Wizard::complete(form).unwrap();
        assert_eq!(nueva.number_of_guests, GuestCount::MoreThanTen);
    }

    #[test]
    fn complete_rechaza_valores_fuera_de_los_conjuntos() {
        let mut form = formulario_completo();
        form.time = "9:30 PM".into();
        assert!(Wizard::complete(form).is_err());

        let mut form = formulario_completo();
        form.seating = "rooftop".into();
        assert!(Wizard::complete(form).is_err());

        let mut form = formulario_completo();
        form.date = "05/03/2024".into();
        assert!(Wizard::complete(form).is_err());
    }

    #[test]
    fn complete_indica_el_paso_atascado() {
        let mut form = formulario_completo();
        form.email.clear();
        let err = Wizard::complete(form).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("paso 3"), "mensaje inesperado: {}", msg);
        assert!(msg.contains("email"), "mensaje inesperado: {}", msg);
    }
}

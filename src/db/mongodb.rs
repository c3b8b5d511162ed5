use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use std::env;
use uuid::Uuid;

use crate::api::AppError;
use crate::db::gateway::{BookingStore, DeleteOutcome, UpdateOutcome};
use crate::db::models::{
    Booking, Chef, CustomerReview, Faq, MenuItem, ReasonToChooseUs, SeatingTypeInfo,
};
use crate::reservation::{BookingStatus, NewBooking};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone)]
pub struct MongoRepo {
    pub client: Client,
    pub database: Database,
}

impl MongoRepo {
    pub async fn init() -> Result<MongoRepo> {
        let mongo_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let client = Client::with_uri_str(&mongo_uri)
            .await
            .map_err(|e| AppError::Internal(format!("Error conectando a MongoDB: {}", e)))?;

        let database_name = env::var("MONGODB_DATABASE")
            .unwrap_or_else(|_| "boho_reservation".to_string());

        let database = client.database(&database_name);

        // Test connection
        database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(|e| AppError::Internal(format!("Error validando conexión MongoDB: {}", e)))?;

        tracing::info!("Conexión a MongoDB establecida exitosamente");

        Ok(MongoRepo { client, database })
    }

    pub fn bookings(&self) -> Collection<Booking> {
        self.database.collection("bookings")
    }

    pub fn chefs(&self) -> Collection<Chef> {
        self.database.collection("chefs")
    }

    pub fn menu_items(&self) -> Collection<MenuItem> {
        self.database.collection("menuitems")
    }

    pub fn customer_reviews(&self) -> Collection<CustomerReview> {
        self.database.collection("customerreviews")
    }

    pub fn faqs(&self) -> Collection<Faq> {
        self.database.collection("faqs")
    }

    pub fn reasons_to_choose_us(&self) -> Collection<ReasonToChooseUs> {
        self.database.collection("reasonstochooseus")
    }

    pub fn seating_types(&self) -> Collection<SeatingTypeInfo> {
        self.database.collection("seatingtypes")
    }

    // Método para crear índices si es necesario
    pub async fn create_indexes(&self) -> Result<()> {
        use mongodb::IndexModel;

        // Índices para bookings: el panel filtra por estado y ordena por fecha
        let bookings = self.bookings();
        let booking_indexes = vec![
            IndexModel::builder().keys(doc! { "bookingStatus": 1 }).build(),
            IndexModel::builder().keys(doc! { "bookingDate": 1 }).build(),
        ];

        bookings
            .create_indexes(booking_indexes)
            .await
            .map_err(|e| AppError::Internal(format!("Error creando índices bookings: {}", e)))?;

        // Índices para el contenido que las páginas ordenan o filtran
        let faqs = self.faqs();
        faqs.create_indexes(vec![IndexModel::builder()
            .keys(doc! { "sortOrder": 1 })
            .build()])
            .await
            .map_err(|e| AppError::Internal(format!("Error creando índices faqs: {}", e)))?;

        let menu_items = self.menu_items();
        menu_items
            .create_indexes(vec![IndexModel::builder()
                .keys(doc! { "category": 1 })
                .build()])
            .await
            .map_err(|e| AppError::Internal(format!("Error creando índices menuitems: {}", e)))?;

        tracing::info!("Índices MongoDB creados exitosamente");
        Ok(())
    }

    // Función auxiliar para obtener timestamp actual
    pub fn current_timestamp() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[async_trait]
impl BookingStore for MongoRepo {
    async fn fetch_bookings(&self, limit: i64) -> Result<Vec<Booking>> {
        let mut cursor = self
            .bookings()
            .find(doc! {})
            .limit(limit)
            .await
            .map_err(|e| AppError::database("fetch_bookings", e))?;

        let mut results = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| AppError::database("fetch_bookings_cursor", e))?
        {
            let booking = cursor
                .deserialize_current()
                .map_err(|e| AppError::Internal(format!("Error deserializando reserva: {}", e)))?;
            results.push(booking);
        }

        Ok(results)
    }

    async fn insert_booking(&self, nueva: &NewBooking) -> Result<Booking> {
        // El id opaco y los timestamps los asigna el repositorio, nunca el
        // llamador
        let booking = Booking::from_new(
            nueva,
            Uuid::new_v4().to_string(),
            MongoRepo::current_timestamp(),
        );

        self.bookings()
            .insert_one(&booking)
            .await
            .map_err(|e| AppError::database("insert_booking", e))?;

        Ok(booking)
    }

    async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<UpdateOutcome> {
        let result = self
            .bookings()
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "bookingStatus": status.as_str(),
                        "_updatedDate": MongoRepo::current_timestamp()
                    }
                },
            )
            .await
            .map_err(|e| AppError::database("update_booking_status", e))?;

        if result.matched_count == 0 {
            Ok(UpdateOutcome::Missing)
        } else {
            Ok(UpdateOutcome::Updated)
        }
    }

    async fn delete_booking(&self, id: &str) -> Result<DeleteOutcome> {
        let result = self
            .bookings()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::database("delete_booking", e))?;

        if result.deleted_count == 0 {
            Ok(DeleteOutcome::Missing)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}

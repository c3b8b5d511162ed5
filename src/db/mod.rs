// src/db/mod.rs
pub mod gateway;
pub mod models;
pub mod mongodb;

pub use gateway::{BookingStore, DeleteOutcome, UpdateOutcome, BOOKINGS_PAGE_LIMIT};
pub use models::{Booking, Chef, CustomerReview, Faq, MenuItem, ReasonToChooseUs, SeatingTypeInfo};
pub use mongodb::MongoRepo;

//! Core module containing fundamental traits and types for the crate

pub mod entity;
pub mod error;
pub mod events;
pub mod service;

pub use entity::Entity;
pub use error::{DealershipError, DealershipResult, ErrorResponse, FieldError};
pub use events::{DomainEvent, EventBus, OrderEvent, VehicleEvent};
pub use service::{DataService, DataServiceExt};

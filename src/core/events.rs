//! Domain event bus for lifecycle notifications
//!
//! Every committed vehicle transition and order mutation is published on an
//! [`EventBus`] built on `tokio::sync::broadcast`. Consumers (notification
//! workers, dashboards, audit logs) subscribe without the lifecycle manager
//! knowing about them.
//!
//! ```text
//! VehicleLifecycleManager ──┐
//!                           ├──▶ EventBus::publish() ──▶ broadcast channel ──▶ subscribers
//! OrderService ─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DomainEvent::Vehicle(VehicleEvent::Reserved {
//!     vehicle_id,
//!     dealer_id,
//!     reserved_by: "Autosalone Rossi".to_string(),
//! }));
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("Received: {:?}", envelope.event);
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events emitted by the vehicle lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum VehicleEvent {
    Created {
        vehicle_id: Uuid,
        model: String,
        virtual_stock: bool,
    },
    Updated {
        vehicle_id: Uuid,
    },
    Deleted {
        vehicle_id: Uuid,
    },
    Reserved {
        vehicle_id: Uuid,
        dealer_id: Uuid,
        reserved_by: String,
    },
    ReservationCancelled {
        vehicle_id: Uuid,
    },
    Ordered {
        vehicle_id: Uuid,
        order_id: Uuid,
    },
    Duplicated {
        source_id: Uuid,
        vehicle_id: Uuid,
    },
}

/// Events emitted by the order workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderEvent {
    Created {
        order_id: Uuid,
        vehicle_id: Uuid,
        dealer_id: Uuid,
    },
    Updated {
        order_id: Uuid,
    },
    OdlGenerated {
        order_id: Uuid,
    },
}

/// Top-level event wrapping vehicle and order events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainEvent {
    Vehicle(VehicleEvent),
    Order(OrderEvent),
}

impl DomainEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            DomainEvent::Vehicle(_) => "vehicle",
            DomainEvent::Order(_) => "order",
        }
    }

    /// Get the id of the vehicle or order this event relates to
    pub fn subject_id(&self) -> Uuid {
        match self {
            DomainEvent::Vehicle(e) => match e {
                VehicleEvent::Created { vehicle_id, .. }
                | VehicleEvent::Updated { vehicle_id }
                | VehicleEvent::Deleted { vehicle_id }
                | VehicleEvent::Reserved { vehicle_id, .. }
                | VehicleEvent::ReservationCancelled { vehicle_id }
                | VehicleEvent::Ordered { vehicle_id, .. }
                | VehicleEvent::Duplicated { vehicle_id, .. } => *vehicle_id,
            },
            DomainEvent::Order(e) => match e {
                OrderEvent::Created { order_id, .. }
                | OrderEvent::Updated { order_id }
                | OrderEvent::OdlGenerated { order_id } => *order_id,
            },
        }
    }

    pub fn action(&self) -> &str {
        match self {
            DomainEvent::Vehicle(e) => match e {
                VehicleEvent::Created { .. } => "created",
                VehicleEvent::Updated { .. } => "updated",
                VehicleEvent::Deleted { .. } => "deleted",
                VehicleEvent::Reserved { .. } => "reserved",
                VehicleEvent::ReservationCancelled { .. } => "reservation_cancelled",
                VehicleEvent::Ordered { .. } => "ordered",
                VehicleEvent::Duplicated { .. } => "duplicated",
            },
            DomainEvent::Order(e) => match e {
                OrderEvent::Created { .. } => "created",
                OrderEvent::Updated { .. } => "updated",
                OrderEvent::OdlGenerated { .. } => "odl_generated",
            },
        }
    }
}

/// Envelope wrapping a domain event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: DomainEvent,
}

impl EventEnvelope {
    pub fn new(event: DomainEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone and shareable across tasks. Slow receivers get a `Lagged`
/// error once `capacity` events are buffered.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. With no subscribers the event is dropped.
    /// Returns the number of receivers that will receive the event.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

//! # starvnt-gateway
//!
//! HTTP gateway behind the StarVnt event-planning site: booking requests,
//! budget estimates, saved draft events and the Aura+ chat assistant.
//!
//! A booking is validated locally before anything leaves the process. The
//! notification is then handed to a single configured channel (an email
//! relay or an email vendor API). If the channel cannot be reached at all
//! the booking is still confirmed, flagged `simulated`; if the channel
//! answers with an error, its message is returned to the customer as is.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── BookingService ── BookingFormController (service/)
//!     │       └── DeliveryService ── Relay | EmailApi channel
//!     ├── ChatService ── ChatRegistry ── Live | Offline session
//!     │
//!     └── Domain (domain/): validation, estimator, saved events
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

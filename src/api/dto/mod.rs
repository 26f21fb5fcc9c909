//! Data Transfer Objects for REST request/response serialization.
//!
//! Amounts are whole rupees; formatted strings are provided alongside for
//! display.

pub mod booking_dto;
pub mod budget_dto;
pub mod chat_dto;
pub mod event_dto;

pub use booking_dto::*;
pub use budget_dto::*;
pub use chat_dto::*;
pub use event_dto::*;

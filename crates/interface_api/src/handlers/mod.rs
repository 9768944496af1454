//! Request handlers, one module per form plus health and admin

pub mod health;
pub mod bookings;
pub mod calculator;
pub mod partners;
pub mod careers;
pub mod admin;

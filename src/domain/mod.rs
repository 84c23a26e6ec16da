// Domain layer: booking types, page routes and the ports the form talks through.

pub mod auth;
pub mod layout;
pub mod model;
pub mod ports;
pub mod schedule;
pub mod slot;

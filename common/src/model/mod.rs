//! Domain models for the banking API

pub mod customer;

//! Road trip fuel planner server.
//!
//! A web application that answers: "driving between these two places,
//! where should I buy fuel to spend the least?"

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod mapquest;
pub mod planner;
pub mod retry;
pub mod store;
pub mod web;

#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod validation;
pub mod model;
pub mod draw;
pub mod db;
pub mod ops;
pub mod queries;
pub mod invite;
pub mod routing;
pub mod config;
pub mod ai;
pub mod cli;

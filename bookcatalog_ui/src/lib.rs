pub mod api;
pub mod backend;
pub mod controller;
pub mod error;
pub mod form;
pub mod render;
pub mod settings;

#[cfg(any(feature = "client", test))]
pub mod client;

#[cfg(any(feature = "server", test))]
pub mod app_config;
#[cfg(any(feature = "server", test))]
mod handlers;
#[cfg(any(feature = "server", test))]
mod pages;
#[cfg(feature = "server")]
pub mod telemetry;

#![doc(test(attr(deny(warnings))))]

//! Projectivity Core holds the project creation wizard: field validation,
//! step navigation, previews and submission to the project GraphQL API.

pub mod config;
pub mod domain;
pub mod errors;
pub mod graphql;
pub mod routing;
pub mod session;
pub mod submission;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Projectivity Core tracing initialized.");
    });
}

use std::sync::Arc;

use crate::services::{providers::GenerativeProvider, ReportBuilder};

/// Shared application state
///
/// Read-only provider handles initialized at startup; no cross-request
/// mutable state exists.
#[derive(Clone)]
pub struct AppState {
    pub report_builder: Arc<ReportBuilder>,
    pub generative: Arc<dyn GenerativeProvider>,
}

impl AppState {
    pub fn new(report_builder: Arc<ReportBuilder>, generative: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            report_builder,
            generative,
        }
    }
}

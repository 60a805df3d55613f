//! Service metadata handler

use serde::Serialize;

use crate::extract::Json;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
    pub endpoints: ServiceEndpoints,
}

#[derive(Serialize)]
pub struct ServiceEndpoints {
    pub companies: &'static str,
    pub products: &'static str,
    pub load_data: &'static str,
}

/// Root endpoint with API information
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "VentureDesk Company Data API",
        version: venturedesk_common::VERSION,
        docs: "/docs",
        endpoints: ServiceEndpoints {
            companies: "/companies",
            products: "/products",
            load_data: "/load-data",
        },
    })
}

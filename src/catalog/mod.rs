// ==========================================
// Abrazaderas - catalog boundary
// ==========================================
// gateway: trait the storage side implements
// memory: map-backed gateway
// request_product: measure request -> product materialization helpers
// ==========================================

pub mod gateway;
pub mod memory;
pub mod request_product;

pub use gateway::{
    CatalogGateway, ClampSpecRecord, ImportedClamp, UpsertOutcome, CLAMP_CATEGORY_NAME,
};
pub use memory::MemoryCatalog;
pub use request_product::{
    build_base_sku, build_request_product_payload, build_spec_record, build_unique_sku,
    facturacion_price, ClampMeasureRequest, RequestProductAttributes, RequestProductPayload,
};

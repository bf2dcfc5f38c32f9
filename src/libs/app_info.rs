//! Build-time application metadata (name, version and `[package.metadata]`).

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub fn name() -> &'static str {
    APP_METADATA_NAME
}

pub fn version() -> &'static str {
    APP_METADATA_VERSION
}

pub fn display_name() -> &'static str {
    APP_METADATA_DISPLAY_NAME
}

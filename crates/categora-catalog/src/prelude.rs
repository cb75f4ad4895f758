pub use categora_types::prelude::*;
pub use categora_types::store_adapter::StoreAdapter;

// vim: ts=4

use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

// Single static counter for all elements
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Generate an element id of the form `prefix-<counter>-<random suffix>`.
///
/// The counter keeps ids ordered within a session and the random suffix keeps them
/// unique across sessions that load the same template.
pub fn generate_id(prefix: &str) -> String {
    let counter = NEXT_ELEMENT_ID.fetch_add(1, Ordering::SeqCst);
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{counter}-{}", &uuid[..8])
}

pub fn generate_template_id() -> String {
    Uuid::new_v4().to_string()
}

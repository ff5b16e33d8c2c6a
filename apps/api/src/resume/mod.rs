// Resume documents: one per user, edited section by section.
// Handlers take the owner from `AuthUser`; the store never sees a client-chosen user id.

pub mod handlers;
pub mod memory;
pub mod store;
pub mod templates;

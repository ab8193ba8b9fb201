pub mod http;
pub mod traits;

// Hosted backend implementations
pub mod supabase_auth;
pub mod supabase_store;

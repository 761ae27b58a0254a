// Adapters layer: HTTP implementations of the domain ports.

pub mod gemini;
pub mod supabase;

pub use gemini::GeminiExtractor;
pub use supabase::SupabaseCatalog;

pub mod auth;
pub mod completion_llm;
pub mod db;
pub mod supabase;

pub use auth::SupabaseAuthAdapter;
pub use completion_llm::OpenAiCompletionAdapter;
pub use db::DbAdapter;
pub use supabase::SupabaseClient;

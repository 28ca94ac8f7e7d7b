pub mod compliance;
pub mod health;
pub mod suggestions;

pub use compliance::check_compliance;
pub use health::health;
pub use suggestions::get_suggestions;

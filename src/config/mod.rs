pub mod types;
pub mod resources;
pub mod settings;
pub mod validator;
pub mod resolved;

pub use types::*;
pub use resources::*;
pub use settings::*;
pub use validator::*;
pub use resolved::*;

pub mod mock_host;
pub mod traits;
pub mod types;
pub mod world;

pub use mock_host::MockHost;
pub use traits::*;
pub use types::*;
pub use world::HostWorld;

pub mod loader;
pub mod model;

pub use loader::{CONFIG_FILE_NAME, FileConfig, load_file_config};
pub use model::{BaselineMode, CheckConfig, FeatureGroup, ReleaseType};

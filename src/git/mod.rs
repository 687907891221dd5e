pub mod baseline;

pub use baseline::BaselineResolver;

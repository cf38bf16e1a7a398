pub mod registry;
pub mod traits;

pub use registry::AlgorithmRegistry;
pub use traits::{AlgorithmCatalogue, StageDescriptor};

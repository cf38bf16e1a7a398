pub mod configuration_space;
pub mod parameter;
pub mod stage;

pub use configuration_space::{ConfigurationSpace, ConfigurationSpaceBuilder};
pub use parameter::{ParameterDescriptor, ParameterDomain};
pub use stage::{StageParameters, StageSpec, SubExecutionSlot};

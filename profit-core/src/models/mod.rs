mod input_field;
mod simulation_inputs;

pub use input_field::{InputField, InputGroup};
pub use simulation_inputs::{ResetMode, SimulationInputs};

/// Inbound adapters - Sources that drive the application core
mod action_inputs;

pub use action_inputs::{EnvInputs, LayeredInputs, MapInputs};

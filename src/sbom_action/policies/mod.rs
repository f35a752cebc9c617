pub mod capability_table;
pub mod input_aliases;

pub use capability_table::GatedFlag;
pub use input_aliases::InputField;

pub mod bindings;
pub mod controls;

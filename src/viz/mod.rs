pub mod logo;
pub mod reactive;
pub mod showcase;

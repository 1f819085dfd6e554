pub mod describe;
pub mod scaffold;

pub mod estimate;
pub mod health;
pub mod reference;

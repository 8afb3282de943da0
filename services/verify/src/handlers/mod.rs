pub mod health;
pub mod verify;

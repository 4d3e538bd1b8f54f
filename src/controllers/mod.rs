pub mod health;
pub mod meditation;
pub mod voice;

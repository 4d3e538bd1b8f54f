pub mod meditation;
pub mod speech;

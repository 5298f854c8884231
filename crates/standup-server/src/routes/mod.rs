pub mod health;
pub mod standup;

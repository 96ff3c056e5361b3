pub(crate) mod copilot;
pub(crate) mod health;

pub mod download;
pub mod extract;
pub mod health;
pub mod industries;
pub mod results;
pub mod status;

pub mod commits;
pub mod common;
pub mod issues;
pub mod repos;

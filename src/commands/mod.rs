pub mod add;
pub mod config;
pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod invite;
pub mod month;
pub mod share;

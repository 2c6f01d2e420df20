pub mod calculator;
pub mod logic;
pub mod time_parser;
pub mod workflow;

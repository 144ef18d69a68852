pub mod calendar;
pub mod city;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod output;
pub mod prompt;
pub mod record;
pub mod report;
pub mod stats;

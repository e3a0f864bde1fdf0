pub mod events;
pub mod options;
pub mod run;

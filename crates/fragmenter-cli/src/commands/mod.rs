pub mod bonds;
pub mod run;

pub mod commit;
pub mod merge;
pub mod run;
pub mod tag;

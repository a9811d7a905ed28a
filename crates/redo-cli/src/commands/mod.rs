pub mod add;
pub mod delete;
pub mod done;
pub mod list;
pub mod migrate;
pub mod preview;

pub mod done;
pub mod next;
pub mod parse;
pub mod plan;
pub mod preview;

pub mod catalog;
pub mod markup;
pub mod progress;
pub mod round;

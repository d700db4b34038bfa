pub use read_interval::{ReadInterval, ReadIntervalOp};

mod read_interval;

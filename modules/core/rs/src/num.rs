use std::fmt::{Debug, Display};

/// Idx values are primitive integers usable as genomic positions.
/// CheckedAdd backs overflow-guarded interval ends, Display lets positions
/// appear in error messages.
pub trait PrimInt: ::num::PrimInt + ::num::CheckedAdd + Debug + Display + Default {}

impl<T: ::num::PrimInt + ::num::CheckedAdd + Debug + Display + Default> PrimInt for T {}

mod dual;
pub use self::dual::{Dual, Real};

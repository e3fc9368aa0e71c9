pub mod assignment;
pub mod constraints;
pub mod dump;
pub mod expr;
pub mod gate;
pub mod lookup;
pub mod params;
pub mod selectors;
pub mod session;
pub mod variable;

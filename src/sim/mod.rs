pub(crate) mod body;
pub(crate) mod error;
pub(crate) mod initial_parameters;
pub(crate) mod system;
pub(crate) mod trail;
pub(crate) mod units;

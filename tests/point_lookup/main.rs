#[path = "../test_helpers.rs"]
mod test_helpers;

mod plans;
mod properties;

pub mod page;
pub mod profile;
pub mod top;
pub mod utils;

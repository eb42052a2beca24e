pub mod fs;
pub mod testing;
pub mod text;

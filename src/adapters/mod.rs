pub mod fs;
pub mod oracle;
pub mod process;

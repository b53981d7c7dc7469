// Here's the list of the FTP commands implemented
pub mod cdup;
pub mod cwd;
pub mod handlers;
pub mod list;
pub mod mkd;
pub mod noop;
pub mod pwd;
pub mod quit;
pub mod rmd;
pub mod syst;

pub mod ftpcommand;

// The utils and common functions are here
pub mod utils;

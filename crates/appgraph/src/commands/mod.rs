//! Commands that act on the registry directory rather than through the
//! query facade.

pub mod init;

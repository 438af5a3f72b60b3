pub mod init;
pub mod serve;
pub mod user;
pub mod version;

pub use init::Init;
pub use serve::Serve;
pub use user::User;
pub use version::Version;

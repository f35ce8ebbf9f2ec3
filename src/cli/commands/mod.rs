//! One module per subcommand, each exposing `execute`.

pub mod add;
pub mod delete;
pub mod edit;
pub mod find;
pub mod get;
pub mod init;
pub mod list;

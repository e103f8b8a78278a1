//! Domain records served by the BFF.
//!
//! Every record implements [`ResourceSchema`](platform_kit::ResourceSchema) so
//! the shared resource client can read and write it. Field names follow the
//! BFF's camelCase wire format.

pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::Post;
pub use user::{Address, Company, Geo, User};

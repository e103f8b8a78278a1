//! # Feature Modules
//!
//! Each module is a dependency bundle, a factory, a feature handle and a root
//! view. The shell sees only the handle (`Box<dyn Feature>`). Everything the
//! module talks to arrives through its bundle or its factory.
//!
//! | Module | Capability | Broadcast |
//! |--------|------------|-----------|
//! | [`feed`] | [`FeedApi`](crate::clients::FeedApi) | publishes `selfPostsCount` |
//! | [`friends`] | [`FriendsApi`](crate::clients::FriendsApi) | none |
//! | [`profile`] | [`ProfileApi`](crate::clients::ProfileApi) | subscribes to `selfPostsCount` |

pub mod feed;
pub mod friends;
pub mod profile;

pub use feed::{FeedDependencies, FeedFactory, FeedView};
pub use friends::{FriendsDependencies, FriendsFactory, FriendsView};
pub use profile::{ProfileDependencies, ProfileFactory, ProfileView};

use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//! Application layer - session state, bootstrap gating and command handlers.
//!
//! - `session_store` - the process-wide session holder fed by the
//!   identity provider subscription
//! - `bootstrapper` - one-time application startup gated on the first
//!   session observation
//! - `accounts` / `posts` - passthrough command handlers over the ports
//! - `routes` - the static route table

pub mod accounts;
pub mod bootstrapper;
pub mod posts;
pub mod routes;
pub mod session_store;

pub use accounts::{
    LoginUserCommand, LoginUserHandler, RegisterUserCommand, RegisterUserHandler,
};
pub use bootstrapper::Bootstrapper;
pub use posts::{
    AddCommentCommand, AddCommentHandler, DeletePostCommand, DeletePostHandler,
    ToggleLikeCommand, ToggleLikeHandler, UpdatePostCommand, UpdatePostHandler,
};
pub use routes::{route_for, Route, ROUTES};
pub use session_store::{SessionChanges, SessionStore, SubscriptionHandle};

//! Commenter session, local account and SSO handlers.

mod complete_sso;
mod login_commenter;
mod new_session;
mod register_commenter;
mod start_sso;

pub use complete_sso::{CompleteSsoCommand, CompleteSsoHandler, CompleteSsoResult};
pub use login_commenter::{LoginCommenterCommand, LoginCommenterHandler, LoginCommenterResult};
pub use new_session::NewCommenterSessionHandler;
pub use register_commenter::{RegisterCommenterCommand, RegisterCommenterHandler};
pub use start_sso::{StartSsoCommand, StartSsoHandler, StartSsoResult};

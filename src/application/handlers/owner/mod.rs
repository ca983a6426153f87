//! Owner account handlers.

mod confirm_owner;
mod delete_owner;
mod get_owner;
mod login_owner;
mod register_owner;
mod reset_password;
mod verify_domain_ownership;

pub use confirm_owner::{ConfirmOwnerCommand, ConfirmOwnerHandler};
pub use delete_owner::{DeleteOwnerCommand, DeleteOwnerHandler};
pub use get_owner::{GetOwnerHandler, GetOwnerQuery};
pub use login_owner::{LoginOwnerCommand, LoginOwnerHandler, LoginOwnerResult};
pub use register_owner::{RegisterOwnerCommand, RegisterOwnerHandler, RegisterOwnerResult};
pub use reset_password::{
    RequestPasswordResetCommand, RequestPasswordResetHandler, ResetPasswordCommand,
    ResetPasswordHandler,
};
pub use verify_domain_ownership::{VerifyDomainOwnershipHandler, VerifyDomainOwnershipQuery};

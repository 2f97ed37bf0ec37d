mod admin;

pub use admin::{admin_token, AdminGuardFactory, AdminGuardService, AdminKey, ADMIN_TOKEN_HEADER};

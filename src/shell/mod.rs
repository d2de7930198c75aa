// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the spreadsheet client and the mail relay.
// - Wire them into the use case handlers and expose the HTTP router.

pub mod auth;
pub mod config;
pub mod http;
pub mod state;

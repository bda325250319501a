// Composition root for the admin console.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the remote store implementation.
// - Wire one collection controller per entity kind and the device search controller.
// - Expose the HTTP router to the binary.

pub mod config;
pub mod http;
pub mod state;

//! Delivery of the rendered message to Microsoft Teams.

mod teams;

pub use teams::TeamsWebhookClient;

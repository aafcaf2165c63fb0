mod api_types;
mod github_actions_backend;

pub use github_actions_backend::{DEFAULT_API_BASE_URL, GitHubActionsBackend};

pub mod provider;
pub mod virustotal;

pub use provider::ReputationProvider;
pub use virustotal::VirusTotalClient;

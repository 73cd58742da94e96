pub mod review_client;

pub use review_client::{decode_analysis, ReviewBackend, ReviewClient, ReviewRequest};

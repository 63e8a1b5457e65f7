use sha2::{Digest, Sha256};
use tokio::time::Instant;

// Cached summary with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub summary: String,
    pub created_at: Instant,
}

// Create a cache key (hash of model id + abstract text)
pub fn make_cache_key(model: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model);
    hasher.update(text);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_hash_to_the_same_key() {
        assert_eq!(
            make_cache_key("facebook/bart-large-cnn", "some abstract"),
            make_cache_key("facebook/bart-large-cnn", "some abstract")
        );
    }

    #[test]
    fn key_varies_with_model_and_text() {
        let base = make_cache_key("facebook/bart-large-cnn", "some abstract");
        assert_ne!(base, make_cache_key("google/pegasus-xsum", "some abstract"));
        assert_ne!(base, make_cache_key("facebook/bart-large-cnn", "another abstract"));
    }
}

//! Deterministic embedders for the vector store.
//!
//! Neural model loading is outside this workspace; the hashing embedder gives
//! stable, L2-normalized vectors so the vector path can be built and exercised
//! end to end.

use anyhow::{anyhow, Result};
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use docq_core::traits::Embedder;

/// Feature-hashing bag-of-words embedder.
///
/// Each lower-cased alphanumeric token is hashed into one of `dim` buckets
/// with a signed weight, then the vector is L2-normalized. Texts sharing
/// tokens therefore have positive cosine similarity.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Result<Self> {
        if dim == 0 { return Err(anyhow!("embedding dimension must be > 0")); }
        Ok(Self { dim })
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let lowered = text.to_lowercase();
        for token in lowered.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            v[idx] += sign * (1.0 + ((h >> 32) as u32) as f32 / u32::MAX as f32);
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 1e-6 { for x in &mut v { *x /= norm; } }
        v
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

pub fn get_default_embedder(dim: usize) -> Result<Box<dyn Embedder>> {
    tracing::debug!(dim, "using hashing embedder");
    Ok(Box::new(HashingEmbedder::new(dim)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

    #[test]
    fn shapes_norm_and_determinism() {
        let e = HashingEmbedder::new(64).expect("embedder");
        let embs = e.embed_batch(&["hello world".to_string(), "hello world".to_string()]).expect("embed");
        assert_eq!(embs[0].len(), 64);
        let norm: f32 = embs[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");
        for (a, b) in embs[0].iter().zip(embs[1].iter()) { assert!((a - b).abs() <= 1e-6); }
    }

    #[test]
    fn shared_tokens_are_closer() {
        let e = HashingEmbedder::new(256).expect("embedder");
        let q = e.embed_text("login token").expect("q");
        let near = e.embed_text("Login with a token").expect("near");
        let far = e.embed_text("charts and dashboards").expect("far");
        assert!(cosine(&q, &near) > cosine(&q, &far));
    }

    #[test]
    fn empty_text_is_zero_vector() {
        let e = HashingEmbedder::new(8).expect("embedder");
        assert!(e.embed_text("  ").expect("embed").iter().all(|x| *x == 0.0));
        assert!(HashingEmbedder::new(0).is_err());
    }
}

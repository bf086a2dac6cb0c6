//! Many-key lookups against endpoints that accept a bounded list per call.
//!
//! Keys are trimmed, blanks dropped and duplicates removed (first occurrence
//! wins), then split into chunks that are fetched one call per chunk. Chunk
//! results are merged into a single map. Any failed chunk fails the whole
//! lookup and earlier results are thrown away.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use futures::StreamExt;
use futures::stream;

/// Largest number of keys the batch endpoints accept in one request.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Trim every key, drop the ones left empty, and dedupe preserving the
/// order of first occurrence.
pub fn normalize_keys<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for key in keys {
        let key = key.as_ref().trim();
        if key.is_empty() || !seen.insert(key.to_string()) {
            continue;
        }
        out.push(key.to_string());
    }
    out
}

/// Split `items` into consecutive chunks of at most `size` elements.
///
/// A `size` of zero puts everything into a single chunk.
pub fn chunked<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return vec![items.to_vec()];
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchResolver {
    chunk_size: usize,
    concurrency: usize,
}

impl Default for BatchResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl BatchResolver {
    /// A resolver that fetches chunks strictly one after another.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` chunks in flight at once.
    ///
    /// Results are merged as they complete, so the map is the same as in
    /// sequential mode. The first failure still aborts the lookup and drops
    /// whatever is in flight. Values below 2 keep sequential dispatch.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolve `keys` to values, calling `fetch` once per chunk.
    ///
    /// `fetch` returns `(key, value)` pairs for the keys it found; missing
    /// keys are simply absent from the result. Pairs whose key was not part
    /// of the chunk that was sent are discarded.
    pub async fn resolve<I, S, F, Fut, E>(
        &self,
        keys: I,
        mut fetch: F,
    ) -> Result<HashMap<String, String>, E>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(Vec<String>) -> Fut,
        Fut: Future<Output = Result<Vec<(String, String)>, E>>,
    {
        let keys = normalize_keys(keys);
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let chunks = chunked(&keys, self.chunk_size);
        let total = chunks.len();
        log::debug!(
            "Resolving {} keys in {} chunk(s) of up to {}",
            keys.len(),
            total,
            self.chunk_size
        );

        let mut resolved = HashMap::new();

        if self.concurrency <= 1 {
            for (i, chunk) in chunks.into_iter().enumerate() {
                log::debug!("Fetching chunk {}/{} ({} keys)", i + 1, total, chunk.len());
                let members: HashSet<String> = chunk.iter().cloned().collect();
                let pairs = fetch(chunk).await?;
                merge(&mut resolved, &members, pairs);
            }
        } else {
            let mut in_flight = stream::iter(chunks.into_iter().enumerate())
                .map(|(i, chunk)| {
                    log::debug!("Fetching chunk {}/{} ({} keys)", i + 1, total, chunk.len());
                    let members: HashSet<String> = chunk.iter().cloned().collect();
                    let pending = fetch(chunk);
                    async move { pending.await.map(|pairs| (members, pairs)) }
                })
                .buffer_unordered(self.concurrency);

            while let Some(result) = in_flight.next().await {
                let (members, pairs) = result?;
                merge(&mut resolved, &members, pairs);
            }
        }

        Ok(resolved)
    }
}

fn merge(
    resolved: &mut HashMap<String, String>,
    members: &HashSet<String>,
    pairs: Vec<(String, String)>,
) {
    for (key, value) in pairs {
        if !members.contains(&key) {
            log::warn!("Ignoring batch result for unrequested key {:?}", key);
            continue;
        }
        resolved.insert(key, value);
    }
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;

/// Read-through caching for catalog lookups.
///
/// Returns the cached value for `$key` when present. Otherwise awaits `$block`,
/// queues the result for a background write with `$ttl` seconds to live, and
/// returns it. A failing cache read is logged and treated as a miss, so Redis
/// being down slows lookups without failing them.
///
/// # Example
/// ```rust,ignore
/// let movie: Movie = cached!(self.cache, CacheKey::MovieDetails(id.clone()), ttl, async move {
///     self.fetch_movie(&id).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(cached)) => Ok(cached),
            miss => {
                if let Err(e) = miss {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                }
                match $block.await {
                    Ok(value) => {
                        $cache.set_in_background(&key, &value, $ttl);
                        Ok(value)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }};
}

//! Registry loading.
//!
//! Turns URLs into validated values: index documents become
//! [`RegistryIndex`]es and relative file lists become their raw contents.
//! Transport and parse failures are mapped to typed errors naming the URL.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use crate::error::{BorrowrError, Result};
use crate::registry::fetch::{join_url, RegistryTransport};
use crate::registry::index::RegistryIndex;

/// File name of a repository's top-level index.
pub const INDEX_FILE: &str = ".borrowmeta";

/// Upper bound on file requests in flight for one [`RegistryLoader::fetch_files`] call.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

/// Loads indexes and files through a transport.
#[derive(Clone, Copy)]
pub struct RegistryLoader<'a> {
    transport: &'a dyn RegistryTransport,
}

impl<'a> RegistryLoader<'a> {
    /// Create a loader over a transport.
    pub fn new(transport: &'a dyn RegistryTransport) -> Self {
        Self { transport }
    }

    /// Load a remote's index document from `url`.
    pub fn load_index(&self, url: &str) -> Result<RegistryIndex> {
        let content = self.get(url)?;
        RegistryIndex::parse(&content).map_err(|e| BorrowrError::InvalidRegistryIndex {
            url: url.to_string(),
            message: format!("{:#}", e),
        })
    }

    /// Load the top-level index of a repository whose raw base is `repository_base`.
    pub fn load_top_level_index(&self, repository_base: &str) -> Result<RegistryIndex> {
        let url = join_url(repository_base, INDEX_FILE);
        let content = self.get(&url)?;
        RegistryIndex::parse_top_level(&content, repository_base).map_err(|e| {
            BorrowrError::InvalidRegistryIndex {
                url,
                message: format!("{:#}", e),
            }
        })
    }

    /// Fetch the raw content of `paths` relative to `base_url`.
    ///
    /// At most [`MAX_CONCURRENT_FETCHES`] requests are in flight at once;
    /// the result is index-aligned with `paths`. Any failure fails the whole
    /// call and stops workers from picking up further paths.
    pub fn fetch_files(&self, base_url: &str, paths: &[String]) -> Result<Vec<String>> {
        let transport = self.transport;
        let next = AtomicUsize::new(0);
        let failed = AtomicBool::new(false);
        let workers = paths.len().min(MAX_CONCURRENT_FETCHES);
        let (next, failed) = (&next, &failed);

        let batches: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(move || {
                        let mut done = Vec::new();
                        while !failed.load(Ordering::Relaxed) {
                            let slot = next.fetch_add(1, Ordering::Relaxed);
                            let Some(path) = paths.get(slot) else {
                                break;
                            };
                            let url = join_url(base_url, path);
                            let body = transport.get_text(&url);
                            if body.is_err() {
                                failed.store(true, Ordering::Relaxed);
                            }
                            done.push((slot, url, body));
                        }
                        done
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join()).collect()
        });

        let mut slots: Vec<Option<String>> = vec![None; paths.len()];
        let mut first_failure: Option<(usize, String, anyhow::Error)> = None;
        for batch in batches {
            let batch = batch.map_err(|_| BorrowrError::RegistryFetch {
                url: base_url.to_string(),
                message: "download worker panicked".to_string(),
            })?;
            for (slot, url, body) in batch {
                match body {
                    Ok(body) => slots[slot] = Some(body),
                    Err(e) => {
                        if first_failure.as_ref().map_or(true, |(s, _, _)| slot < *s) {
                            first_failure = Some((slot, url, e));
                        }
                    }
                }
            }
        }

        if let Some((_, url, e)) = first_failure {
            return Err(BorrowrError::RegistryFetch {
                url: base_url.to_string(),
                message: format!("could not retrieve {}: {:#}", url, e),
            });
        }

        slots
            .into_iter()
            .zip(paths)
            .map(|(body, path)| {
                body.ok_or_else(|| BorrowrError::RegistryFetch {
                    url: base_url.to_string(),
                    message: format!("no content for {}", path),
                })
            })
            .collect()
    }

    fn get(&self, url: &str) -> Result<String> {
        self.transport
            .get_text(url)
            .map_err(|e| BorrowrError::RegistryFetch {
                url: url.to_string(),
                message: format!("{:#}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::fetch::MockTransport;
    use std::time::Duration;

    /// Serves every URL after a short delay and records peak concurrency.
    #[derive(Default)]
    struct SlowTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        served: AtomicUsize,
    }

    impl RegistryTransport for SlowTransport {
        fn get_text(&self, url: &str) -> anyhow::Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(15));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.served.fetch_add(1, Ordering::SeqCst);
            Ok(url.rsplit('/').next().unwrap_or_default().to_string())
        }
    }

    const BASE: &str = "https://raw.githubusercontent.com/acme/tool/main";

    #[test]
    fn loads_top_level_index_from_meta_file() {
        let transport = MockTransport::new().with(
            &format!("{}/.borrowmeta", BASE),
            r#"{"version": "1.0.0", "registry": {"init": {"files": ["cli/init.ts"]}}}"#,
        );
        let loader = RegistryLoader::new(&transport);

        let index = loader.load_top_level_index(BASE).unwrap();

        assert!(index.contains("init"));
        assert_eq!(index.base_url, BASE);
    }

    #[test]
    fn load_index_maps_transport_failure() {
        let transport = MockTransport::new();
        let loader = RegistryLoader::new(&transport);

        let err = loader.load_index("https://x.dev/index.json").unwrap_err();

        match err {
            BorrowrError::RegistryFetch { url, .. } => assert_eq!(url, "https://x.dev/index.json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_index_maps_validation_failure() {
        let transport =
            MockTransport::new().with("https://x.dev/index.json", r#"{"version": "nope"}"#);
        let loader = RegistryLoader::new(&transport);

        let err = loader.load_index("https://x.dev/index.json").unwrap_err();

        assert!(matches!(err, BorrowrError::InvalidRegistryIndex { .. }));
    }

    #[test]
    fn fetch_files_preserves_order() {
        let transport = MockTransport::new()
            .with("https://x.dev/r/a.ts", "A")
            .with("https://x.dev/r/b.ts", "B")
            .with("https://x.dev/r/c.ts", "C");
        let loader = RegistryLoader::new(&transport);

        let files = vec!["c.ts".to_string(), "a.ts".to_string(), "b.ts".to_string()];
        let contents = loader.fetch_files("https://x.dev/r", &files).unwrap();

        assert_eq!(contents, vec!["C", "A", "B"]);
    }

    #[test]
    fn fetch_files_fails_as_a_whole() {
        let transport = MockTransport::new().with("https://x.dev/r/a.ts", "A");
        let loader = RegistryLoader::new(&transport);

        let files = vec!["a.ts".to_string(), "gone.ts".to_string()];
        let err = loader.fetch_files("https://x.dev/r", &files).unwrap_err();

        match err {
            BorrowrError::RegistryFetch { url, message } => {
                assert_eq!(url, "https://x.dev/r");
                assert!(message.contains("gone.ts"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fetch_files_caps_requests_in_flight() {
        let transport = SlowTransport::default();
        let loader = RegistryLoader::new(&transport);

        let files: Vec<String> = (0..50).map(|i| format!("f{i}.ts")).collect();
        let contents = loader.fetch_files("https://x.dev/r", &files).unwrap();

        assert_eq!(contents, files);
        assert_eq!(transport.served.load(Ordering::SeqCst), 50);
        let peak = transport.peak.load(Ordering::SeqCst);
        assert!(peak >= 1 && peak <= MAX_CONCURRENT_FETCHES, "peak was {peak}");
    }

    #[test]
    fn fetch_files_reports_earliest_failure() {
        let transport = MockTransport::new().with("https://x.dev/r/c.ts", "C");
        let loader = RegistryLoader::new(&transport);

        let files = vec!["a.ts".to_string(), "b.ts".to_string(), "c.ts".to_string()];
        let err = loader.fetch_files("https://x.dev/r", &files).unwrap_err();

        match err {
            BorrowrError::RegistryFetch { message, .. } => assert!(message.contains("a.ts")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

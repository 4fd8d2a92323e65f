use std::sync::Arc;

use tracing::debug;

use crate::brute::BruteForceMatcher;
use crate::engine::TrajectoryMatcher;
use crate::gabriel::GabrielMatcher;
use crate::types::MatchError;

/// Name → strategy lookup, built once at start-up.
///
/// Lookup is case-insensitive and lenient: a request resolves to the first
/// registered matcher whose name contains it or is contained in it, so
/// `"Brute"`, `"brute-force"` and `"gab"` all resolve. Containment runs
/// both ways, so a request such as `"xbrutex"` resolves to `brute` too.
///
/// ```rust
/// use matcher::MatcherRegistry;
///
/// let registry = MatcherRegistry::with_defaults();
/// assert_eq!(registry.resolve("Brute-Force").unwrap().name(), "brute");
/// assert_eq!(registry.available(), vec!["brute", "gabriel"]);
/// assert!(registry.resolve("dijkstra").is_err());
/// ```
#[derive(Clone, Default)]
pub struct MatcherRegistry {
    matchers: Vec<Arc<dyn TrajectoryMatcher>>,
}

impl std::fmt::Debug for MatcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherRegistry")
            .field("matchers", &self.available())
            .finish()
    }
}

impl MatcherRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// `brute` then `gabriel`, both sequential.
    pub fn with_defaults() -> Self {
        Self::with_parallel(false)
    }

    /// `brute` then `gabriel`, with rayon enabled inside both when
    /// `use_parallel` is set.
    pub fn with_parallel(use_parallel: bool) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(
            BruteForceMatcher::new().with_parallel(use_parallel),
        ));
        registry.register(Arc::new(GabrielMatcher::new().with_parallel(use_parallel)));
        registry
    }

    /// Append a strategy. Earlier registrations win on ambiguous lookups.
    pub fn register(&mut self, matcher: Arc<dyn TrajectoryMatcher>) {
        self.matchers.push(matcher);
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn TrajectoryMatcher>, MatchError> {
        let wanted = name.trim().to_lowercase();
        let found = if wanted.is_empty() {
            None
        } else {
            self.matchers.iter().find(|m| {
                let declared = m.name().to_lowercase();
                declared.contains(&wanted) || wanted.contains(&declared)
            })
        };

        match found {
            Some(matcher) => {
                debug!(requested = name, resolved = matcher.name(), "matcher_resolved");
                Ok(Arc::clone(matcher))
            }
            None => Err(MatchError::NoSuchAlgorithm {
                name: name.to_string(),
                available: self.available(),
            }),
        }
    }

    /// Declared names in registration order.
    pub fn available(&self) -> Vec<String> {
        self.matchers.iter().map(|m| m.name().to_string()).collect()
    }
}

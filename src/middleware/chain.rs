//! Interceptor chain
//!
//! A chain is an ordered list built explicitly with [`InterceptorChain::with`];
//! the first interceptor added runs first. Route assembly concatenates the
//! handler-group chain with the route chain, so group-scope interceptors all
//! finish before any route-scope interceptor starts.
//!
//! Per request the chain moves `Pending -> Running(0..n) -> Terminated |
//! Dispatched`. It never resumes after terminating and never re-enters.

use std::{fmt, sync::Arc};

use tracing::{debug, trace};

use super::params::RequestParams;
use crate::error::{AppError, AppResult};

/// A request-pipeline step run before the handler.
///
/// Returning `Ok` continues with the next step; returning `Err` terminates
/// the chain and the error becomes the response.
pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn intercept(&self, params: &mut RequestParams) -> AppResult<()>;
}

/// How a chain run ended
#[derive(Debug)]
pub enum ChainOutcome {
    /// Every interceptor passed; the handler may run
    Dispatched,
    /// An interceptor short-circuited with this error
    Terminated(AppError),
}

impl ChainOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

/// Ordered sequence of interceptors
#[derive(Clone, Default)]
pub struct InterceptorChain {
    steps: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor; it runs after everything already in the chain
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.steps.push(Arc::new(interceptor));
        self
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.steps.push(interceptor);
    }

    /// This chain followed by `next`
    pub fn then(&self, next: &InterceptorChain) -> InterceptorChain {
        let mut steps = Vec::with_capacity(self.steps.len() + next.steps.len());
        steps.extend(self.steps.iter().cloned());
        steps.extend(next.steps.iter().cloned());
        InterceptorChain { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Interceptor names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every interceptor in order, stopping at the first rejection
    pub fn run(&self, params: &mut RequestParams) -> ChainOutcome {
        for (index, step) in self.steps.iter().enumerate() {
            trace!(step = index, interceptor = step.name(), "Running interceptor");

            if let Err(rejection) = step.intercept(params) {
                debug!(
                    step = index,
                    interceptor = step.name(),
                    status = rejection.status_code().as_u16(),
                    "Interceptor terminated chain"
                );
                return ChainOutcome::Terminated(rejection);
            }
        }

        ChainOutcome::Dispatched
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use std::sync::Mutex;

    struct Record {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        reject: bool,
    }

    impl Interceptor for Record {
        fn name(&self) -> &'static str {
            self.name
        }

        fn intercept(&self, _params: &mut RequestParams) -> AppResult<()> {
            self.log.lock().unwrap().push(self.name);
            if self.reject {
                Err(AppError::validation(format!("{} rejected", self.name)))
            } else {
                Ok(())
            }
        }
    }

    fn record(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Record {
        Record {
            name,
            log: Arc::clone(log),
            reject: false,
        }
    }

    #[test]
    fn test_runs_in_declaration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with(record("first", &log))
            .with(record("second", &log))
            .with(record("third", &log));

        let outcome = chain.run(&mut RequestParams::read(Map::new()));
        assert!(outcome.is_dispatched());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_group_scope_runs_before_route_scope() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let group = InterceptorChain::new()
            .with(record("group-a", &log))
            .with(record("group-b", &log));
        let route = InterceptorChain::new()
            .with(record("route-a", &log))
            .with(record("route-b", &log));

        let chain = group.then(&route);
        assert_eq!(chain.names(), vec!["group-a", "group-b", "route-a", "route-b"]);

        chain.run(&mut RequestParams::read(Map::new()));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["group-a", "group-b", "route-a", "route-b"]
        );
    }

    #[test]
    fn test_rejection_stops_the_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with(record("first", &log))
            .with(Record {
                name: "gate",
                log: Arc::clone(&log),
                reject: true,
            })
            .with(record("never", &log));

        match chain.run(&mut RequestParams::read(Map::new())) {
            ChainOutcome::Terminated(err) => assert_eq!(err.to_string(), "gate rejected"),
            ChainOutcome::Dispatched => panic!("chain should have terminated"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["first", "gate"]);
    }

    #[test]
    fn test_later_steps_observe_earlier_mutations() {
        struct Writer;
        impl Interceptor for Writer {
            fn name(&self) -> &'static str {
                "writer"
            }
            fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
                params.set("beatmapid", json!(75));
                Ok(())
            }
        }

        struct Reader;
        impl Interceptor for Reader {
            fn name(&self) -> &'static str {
                "reader"
            }
            fn intercept(&self, params: &mut RequestParams) -> AppResult<()> {
                match params.get("beatmapid") {
                    Some(v) if v.is_u64() => Ok(()),
                    _ => Err(AppError::validation("not coerced")),
                }
            }
        }

        let chain = InterceptorChain::new().with(Writer).with(Reader);
        let mut params = RequestParams::read(Map::new());
        assert!(chain.run(&mut params).is_dispatched());
    }

    #[test]
    fn test_empty_chain_dispatches() {
        let chain = InterceptorChain::new();
        assert!(chain.is_empty());
        assert!(chain.run(&mut RequestParams::read(Map::new())).is_dispatched());
    }
}

use crate::entities::ResolvedLocation;
use std::time::Duration;

/// A service that resolves free-text addresses to coordinates.
///
/// Implementations handle their own failures: transport errors,
/// timeouts and malformed responses are reported as `None`.
pub trait GeoCodingGateway {
    fn resolve_address(&self, address: &str, timeout: Duration) -> Option<ResolvedLocation>;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address(&self, address: &str, timeout: Duration) -> Option<ResolvedLocation> {
        (**self).resolve_address(address, timeout)
    }
}

impl<G> GeoCodingGateway for Box<G>
where
    G: GeoCodingGateway + ?Sized,
{
    fn resolve_address(&self, address: &str, timeout: Duration) -> Option<ResolvedLocation> {
        (**self).resolve_address(address, timeout)
    }
}

/// Asks the secondary gateway only if the primary one has no result.
#[derive(Debug, Clone)]
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    pub const fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P, S> GeoCodingGateway for Fallback<P, S>
where
    P: GeoCodingGateway,
    S: GeoCodingGateway,
{
    fn resolve_address(&self, address: &str, timeout: Duration) -> Option<ResolvedLocation> {
        self.primary
            .resolve_address(address, timeout)
            .or_else(|| {
                log::debug!("Primary geocoder has no result for '{address}': try fallback");
                self.secondary.resolve_address(address, timeout)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MapPoint;
    use std::cell::RefCell;

    struct Unresolvable;

    impl GeoCodingGateway for Unresolvable {
        fn resolve_address(&self, _: &str, _: Duration) -> Option<ResolvedLocation> {
            None
        }
    }

    struct Recording {
        name: &'static str,
        result: Option<ResolvedLocation>,
        calls: RefCell<Vec<String>>,
    }

    impl Recording {
        fn new(name: &'static str, result: Option<ResolvedLocation>) -> Self {
            Self {
                name,
                result,
                calls: RefCell::new(vec![]),
            }
        }
    }

    impl GeoCodingGateway for Recording {
        fn resolve_address(&self, address: &str, _: Duration) -> Option<ResolvedLocation> {
            self.calls
                .borrow_mut()
                .push(format!("{}:{address}", self.name));
            self.result.clone()
        }
    }

    fn location(address: &str) -> ResolvedLocation {
        ResolvedLocation {
            pos: MapPoint::from_lat_lng_deg(1.0, 2.0),
            address: address.into(),
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(1);

    #[test]
    fn primary_hit_skips_secondary() {
        let primary = Recording::new("a", Some(location("primary")));
        let secondary = Recording::new("b", Some(location("secondary")));
        let gw = Fallback::new(&primary, &secondary);
        assert_eq!(Some(location("primary")), gw.resolve_address("x", TIMEOUT));
        assert_eq!(vec!["a:x".to_string()], *primary.calls.borrow());
        assert!(secondary.calls.borrow().is_empty());
    }

    #[test]
    fn primary_miss_falls_back_once() {
        let primary = Recording::new("a", None);
        let secondary = Recording::new("b", Some(location("secondary")));
        let gw = Fallback::new(&primary, &secondary);
        assert_eq!(Some(location("secondary")), gw.resolve_address("x", TIMEOUT));
        assert_eq!(1, primary.calls.borrow().len());
        assert_eq!(1, secondary.calls.borrow().len());
    }

    #[test]
    fn both_miss() {
        let gw = Fallback::new(Unresolvable, Box::new(Unresolvable));
        assert_eq!(None, gw.resolve_address("x", TIMEOUT));
    }
}

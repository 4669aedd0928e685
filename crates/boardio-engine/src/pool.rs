//! Resource pool: the consumable set of still-available descriptors and the
//! append-only record of matched requests.

use std::collections::{HashMap, VecDeque};

use boardio_model::{infer_shape, IoSignal, Resource};

use crate::error::{EngineError, Result};

/// Holds a board's available resource descriptors and hands each out at most
/// once.
///
/// Descriptors are indexed by name; within one name, registration order is
/// preserved and the first descriptor whose number matches wins. Since a key
/// match requires name equality, the index observes the same
/// first-registered-wins contract as a linear scan over the full list.
#[derive(Debug, Default)]
pub struct ResourcePool {
    available: HashMap<String, VecDeque<Resource>>,
    matched: Vec<(Resource, IoSignal)>,
}

impl ResourcePool {
    pub fn new(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut pool = Self::default();
        pool.extend(resources);
        pool
    }

    /// Append descriptors to the available set. Callable any time before
    /// finalization; `(name, number)` uniqueness is not enforced.
    pub fn extend(&mut self, resources: impl IntoIterator<Item = Resource>) {
        for resource in resources {
            self.available
                .entry(resource.name.clone())
                .or_default()
                .push_back(resource);
        }
    }

    /// Consume the first available descriptor matching `(name, number)` and
    /// allocate its signal.
    ///
    /// Shape inference runs before the descriptor is removed, so a malformed
    /// descriptor fails the request without shrinking the pool.
    pub fn request(&mut self, name: &str, number: Option<u32>) -> Result<IoSignal> {
        let not_found = || EngineError::ResourceNotFound {
            name: name.to_string(),
            number,
        };

        let queue = self.available.get_mut(name).ok_or_else(not_found)?;
        let index = queue
            .iter()
            .position(|r| r.matches(name, number))
            .ok_or_else(not_found)?;

        let shape = infer_shape(&queue[index])?;
        let resource = queue.remove(index).expect("matched index in range");
        if queue.is_empty() {
            self.available.remove(name);
        }

        let signal = IoSignal::allocate(&resource.name, &shape, resource.platform_info().cloned());
        self.matched.push((resource, signal.clone()));
        Ok(signal)
    }

    /// Find the signal of an already-matched resource. Read-only and
    /// idempotent; returns the first matched entry whose key fits.
    pub fn lookup(&self, name: &str, number: Option<u32>) -> Result<&IoSignal> {
        self.matched
            .iter()
            .find_map(|(r, s)| r.matches(name, number).then_some(s))
            .ok_or_else(|| EngineError::ResourceNotFound {
                name: name.to_string(),
                number,
            })
    }

    /// Matched `(descriptor, signal)` pairs, in request order.
    pub fn matched(&self) -> &[(Resource, IoSignal)] {
        &self.matched
    }

    /// Number of descriptors still available.
    pub fn available_len(&self) -> usize {
        self.available.values().map(VecDeque::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardio_model::{IoStandard, Pins, Subsignal};

    fn led(number: u32, pin: &str) -> Resource {
        Resource::new("led", Some(number), vec![Pins::new(pin).into()])
    }

    #[test]
    fn request_consumes_first_registered_match() {
        let mut pool = ResourcePool::new(vec![
            Resource::new("clk", None, vec![Pins::new("X1").into()]),
            Resource::new("clk", None, vec![Pins::new("X2").into()]),
        ]);

        let first = pool.request("clk", None).unwrap();
        let second = pool.request("clk", None).unwrap();
        let pin_of = |r: &Resource| r.top_pins().unwrap().identifiers[0].clone();
        assert_eq!(pin_of(&pool.matched()[0].0), "X1");
        assert_eq!(pin_of(&pool.matched()[1].0), "X2");
        assert_eq!(first.name(), "clk");
        assert_eq!(second.name(), "clk");

        let err = pool.request("clk", None).unwrap_err();
        assert!(matches!(err, EngineError::ResourceNotFound { .. }));
    }

    #[test]
    fn request_by_number_skips_non_matching() {
        let mut pool = ResourcePool::new(vec![led(0, "A1"), led(1, "A2")]);
        pool.request("led", Some(1)).unwrap();
        assert_eq!(pool.available_len(), 1);
        // led 0 is still available
        pool.request("led", Some(0)).unwrap();
        assert!(pool.request("led", None).is_err());
    }

    #[test]
    fn conservation_across_requests_and_extension() {
        let mut pool = ResourcePool::new(vec![led(0, "A1"), led(1, "A2")]);
        assert_eq!(pool.available_len() + pool.matched().len(), 2);

        pool.request("led", None).unwrap();
        assert_eq!(pool.available_len() + pool.matched().len(), 2);

        pool.extend(vec![led(2, "A3")]);
        assert_eq!(pool.available_len() + pool.matched().len(), 3);

        pool.request("led", None).unwrap();
        pool.request("led", None).unwrap();
        assert_eq!(pool.available_len(), 0);
        assert_eq!(pool.matched().len(), 3);
    }

    #[test]
    fn failed_request_leaves_pool_untouched() {
        // Malformed: no pin list and no subsignals.
        let mut pool = ResourcePool::new(vec![Resource::new(
            "bare",
            None,
            vec![IoStandard::new("LVCMOS33").into()],
        )]);
        assert!(pool.request("bare", None).is_err());
        assert_eq!(pool.available_len(), 1);
        assert!(pool.matched().is_empty());
    }

    #[test]
    fn lookup_is_idempotent_and_does_not_consume() {
        let mut pool = ResourcePool::new(vec![led(0, "A1")]);
        let requested = pool.request("led", Some(0)).unwrap();

        let a = pool.lookup("led", None).unwrap().clone();
        let b = pool.lookup("led", Some(0)).unwrap().clone();
        assert_eq!(a, b);
        assert_eq!(a, requested);
        assert!(matches!(
            pool.lookup("led", Some(9)).unwrap_err(),
            EngineError::ResourceNotFound { .. }
        ));
    }

    #[test]
    fn composite_request_allocates_record() {
        let mut pool = ResourcePool::new(vec![Resource::new(
            "serial",
            Some(0),
            vec![
                Subsignal::new("tx", vec![Pins::new("D10").into()]).into(),
                Subsignal::new("rx", vec![Pins::new("A9").into()]).into(),
            ],
        )]);
        let sig = pool.request("serial", None).unwrap();
        let IoSignal::Record(rec) = sig else {
            panic!("expected record signal");
        };
        assert_eq!(rec.fields.len(), 2);
        assert_eq!(rec.fields[0].0, "tx");
    }
}

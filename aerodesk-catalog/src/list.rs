use aerodesk_core::FlightRecord;

type Link = Option<Box<Node>>;

struct Node {
    flight: FlightRecord,
    next: Link,
}

/// Singly-linked list of flights, newest first.
///
/// Prepending is O(1); everything else walks from the head.
#[derive(Default)]
pub(crate) struct FlightList {
    head: Link,
    len: usize,
}

impl FlightList {
    pub(crate) fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Build a list whose iteration order equals `flights` order.
    pub(crate) fn from_ordered(flights: Vec<FlightRecord>) -> Self {
        let mut list = Self::new();
        for flight in flights.into_iter().rev() {
            list.push_front(flight);
        }
        list
    }

    pub(crate) fn push_front(&mut self, flight: FlightRecord) {
        let node = Box::new(Node {
            flight,
            next: self.head.take(),
        });
        self.head = Some(node);
        self.len += 1;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// First flight matching `pred`, mutably.
    pub(crate) fn find_mut<P>(&mut self, mut pred: P) -> Option<&mut FlightRecord>
    where
        P: FnMut(&FlightRecord) -> bool,
    {
        let mut link = self.head.as_deref_mut();
        while let Some(node) = link {
            if pred(&node.flight) {
                return Some(&mut node.flight);
            }
            link = node.next.as_deref_mut();
        }
        None
    }
}

// Unlink iteratively; the default recursive drop overflows on long lists.
impl Drop for FlightList {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a FlightRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.flight
        })
    }
}

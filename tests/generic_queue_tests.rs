//! Generic tests for the queue over every storage backend
//!
//! Each helper is written once against `BstPriorityQueue<_, K, S>` and then
//! instantiated for the slotmap arena and the `Vec` arena.

use bst_priority_queue::storage::{NodeKey, NodeStorage, SlotIndex, SlotMapStorage, VecStorage};
use bst_priority_queue::{BstPriorityQueue, Heap, KeyNode, MergeableHeap, Priority};

type Queue<T, K, S> = BstPriorityQueue<T, K, S>;

fn drain<T, K, S>(queue: &mut Queue<T, K, S>) -> Vec<T>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    std::iter::from_fn(|| queue.dequeue()).collect()
}

fn snapshot<T: Clone, K, S>(queue: &Queue<T, K, S>) -> Vec<(Priority, T)>
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<T, K>, Key = K>,
{
    queue.iter().map(|(p, v)| (p, v.clone())).collect()
}

/// Test that an empty queue behaves correctly
fn test_empty_queue<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<String, K>, Key = K>,
{
    let mut queue: Queue<String, K, S> = Queue::default();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.peek(), None);
    assert_eq!(queue.dequeue(), None);
    assert_eq!(Heap::pop(&mut queue), None);
    assert_eq!(queue.iter().count(), 0);
    assert_eq!(queue.to_string(), "");
    assert!(queue.verify_structure().is_ok());
}

/// Test the documented tie-breaking example
fn test_fifo_example<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<&'static str, K>, Key = K>,
{
    let mut queue: Queue<&'static str, K, S> = Queue::default();
    queue.enqueue("A", 2);
    queue.enqueue("B", 1);
    queue.enqueue("C", 2);
    queue.enqueue("D", 1);

    assert_eq!(drain(&mut queue), vec!["B", "D", "A", "C"]);
}

/// Test that peek never changes the queue
fn test_peek_then_dequeue<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<i32, K>, Key = K>,
{
    let mut queue: Queue<i32, K, S> = Queue::default();
    for (value, priority) in [(10, 5), (20, 1), (30, 9), (40, 1), (50, 3)] {
        queue.enqueue(value, priority);
    }

    while !queue.is_empty() {
        let len = queue.len();
        let peeked = queue.peek().copied();
        assert_eq!(queue.len(), len);
        assert_eq!(queue.dequeue(), peeked);
        assert_eq!(queue.len(), len - 1);
    }
    assert_eq!(queue.peek(), None);
}

/// Test that traversal and rendering agree with dequeue order
fn test_traversal_matches_render_and_dequeue<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<String, K>, Key = K>,
{
    let mut queue: Queue<String, K, S> = Queue::default();
    let entries = [
        ("Gwen", 3),
        ("Ben", 1),
        ("Jen", 2),
        ("Sven", 2),
        ("Ken", 7),
        ("Len", -4),
    ];
    for (name, priority) in entries {
        queue.enqueue(name.to_string(), priority);
    }

    let traversal = snapshot(&queue);
    assert_eq!(traversal.len(), queue.len());
    assert!(traversal.windows(2).all(|w| w[0].0 <= w[1].0));

    assert_eq!(
        queue.to_string(),
        "1 value: Len\n2 value: Ben\n3 value: Jen\n3 value: Sven\n4 value: Gwen\n5 value: Ken\n"
    );

    let dequeued: Vec<_> = std::iter::from_fn(|| queue.dequeue_with_priority()).collect();
    assert_eq!(dequeued, traversal);
}

/// Test that traversal can be restarted and leaves the queue untouched
fn test_traversal_restart<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<u32, K>, Key = K>,
{
    let mut queue: Queue<u32, K, S> = Queue::default();
    for i in 0..20u32 {
        queue.enqueue(i, (i as Priority * 7) % 5);
    }

    let first: Vec<_> = queue.iter().collect();
    let second: Vec<_> = queue.iter().collect();
    assert_eq!(first, second);

    let mut partial = queue.iter();
    partial.next();
    partial.next();
    assert_eq!(queue.iter().count(), 20);
    assert_eq!(partial.count(), 18);
    assert_eq!(queue.len(), 20);
}

/// Test clear, twice, then reuse
fn test_clear<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<i32, K>, Key = K>,
{
    let mut queue: Queue<i32, K, S> = Queue::default();
    for i in 0..100 {
        queue.enqueue(i, i % 13);
    }

    queue.clear();
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.tier_count(), 0);
    assert_eq!(queue.dequeue(), None);
    assert_eq!(queue.peek(), None);

    queue.clear();
    assert!(queue.is_empty());
    assert!(queue.verify_structure().is_ok());

    queue.enqueue(1, 1);
    assert_eq!(queue.dequeue(), Some(1));
}

/// Test that a copy is deep: the original can change without affecting it
fn test_deep_copy<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<String, K>, Key = K>,
{
    let mut a: Queue<String, K, S> = Queue::default();
    for (i, priority) in [5, 3, 8, 3, 1, 9, 5].into_iter().enumerate() {
        a.enqueue(format!("v{i}"), priority);
    }

    let mut b: Queue<String, K, S> = Queue::default();
    b.enqueue("stale".to_string(), 0);
    b.assign_from(&a);

    assert_eq!(a, b);
    assert_eq!(a.height(), b.height());
    assert_eq!(a.root_priority(), b.root_priority());
    let before = snapshot(&b);

    a.dequeue();
    a.enqueue("new".to_string(), 4);
    assert_ne!(a, b);
    assert_eq!(b.len(), 7);
    assert_eq!(snapshot(&b), before);

    let c = b.clone();
    assert_eq!(b, c);
    assert!(c.verify_structure().is_ok());
}

/// Test that re-enqueueing a traversal yields a stable queue
fn test_round_trip<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<i32, K>, Key = K>,
{
    let mut source: Queue<i32, K, S> = Queue::default();
    for (value, priority) in [(1, 40), (2, 20), (3, 60), (4, 20), (5, 10), (6, 50)] {
        source.enqueue(value, priority);
    }

    let once: Queue<i32, K, S> = source.iter().map(|(p, v)| (p, *v)).collect();
    assert_eq!(snapshot(&once), snapshot(&source));
    assert_eq!(once.to_string(), source.to_string());

    let twice: Queue<i32, K, S> = once.iter().map(|(p, v)| (p, *v)).collect();
    assert_eq!(once, twice);

    // Ascending insertion already matches traversal order.
    let ascending: Queue<i32, K, S> = [(1, 10), (2, 20), (2, 21), (3, 30)].into_iter().collect();
    let copy: Queue<i32, K, S> = ascending.iter().map(|(p, v)| (p, *v)).collect();
    assert_eq!(ascending, copy);
}

/// Test the Heap/MergeableHeap trait surface
fn test_trait_surface<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<&'static str, K>, Key = K>,
{
    let mut a: Queue<&'static str, K, S> = Heap::new();
    a.push(3, "a3");
    a.push(1, "a1");
    let mut b: Queue<&'static str, K, S> = Heap::new();
    b.push(1, "b1");
    b.push(2, "b2");

    a.merge(b);
    assert_eq!(Heap::len(&a), 4);
    assert_eq!(Heap::peek(&a), Some((&1, &"a1")));
    assert_eq!(Heap::pop(&mut a), Some((1, "a1")));
    assert_eq!(Heap::pop(&mut a), Some((1, "b1")));
    assert_eq!(Heap::pop(&mut a), Some((2, "b2")));
    assert_eq!(Heap::pop(&mut a), Some((3, "a3")));
    assert!(Heap::is_empty(&a));
}

/// Test that the structure stays valid through interleaved operations
fn test_interleaved_structure<K, S>()
where
    K: Copy + Eq,
    S: NodeStorage<KeyNode<usize, K>, Key = K>,
{
    let mut queue: Queue<usize, K, S> = Queue::default();
    let mut expected_len = 0;

    for round in 0..50usize {
        let priority = ((round * 37) % 11) as Priority - 5;
        queue.enqueue(round, priority);
        expected_len += 1;
        if round % 3 == 2 {
            assert!(queue.dequeue().is_some());
            expected_len -= 1;
        }
        assert_eq!(queue.len(), expected_len);
        assert!(queue.verify_structure().is_ok(), "round {round}");
    }
}

macro_rules! backend_tests {
    ($module:ident, $key:ty, $storage:ident) => {
        mod $module {
            use super::*;

            #[test]
            fn empty_queue() {
                test_empty_queue::<$key, $storage<KeyNode<String, $key>>>();
            }

            #[test]
            fn fifo_example() {
                test_fifo_example::<$key, $storage<KeyNode<&'static str, $key>>>();
            }

            #[test]
            fn peek_then_dequeue() {
                test_peek_then_dequeue::<$key, $storage<KeyNode<i32, $key>>>();
            }

            #[test]
            fn traversal_matches_render_and_dequeue() {
                test_traversal_matches_render_and_dequeue::<$key, $storage<KeyNode<String, $key>>>();
            }

            #[test]
            fn traversal_restart() {
                test_traversal_restart::<$key, $storage<KeyNode<u32, $key>>>();
            }

            #[test]
            fn clear() {
                test_clear::<$key, $storage<KeyNode<i32, $key>>>();
            }

            #[test]
            fn deep_copy() {
                test_deep_copy::<$key, $storage<KeyNode<String, $key>>>();
            }

            #[test]
            fn round_trip() {
                test_round_trip::<$key, $storage<KeyNode<i32, $key>>>();
            }

            #[test]
            fn trait_surface() {
                test_trait_surface::<$key, $storage<KeyNode<&'static str, $key>>>();
            }

            #[test]
            fn interleaved_structure() {
                test_interleaved_structure::<$key, $storage<KeyNode<usize, $key>>>();
            }
        }
    };
}

backend_tests!(slotmap_backend, NodeKey, SlotMapStorage);
backend_tests!(vec_backend, SlotIndex, VecStorage);

#[test]
fn test_queues_on_different_backends_compare_equal() {
    let pairs = [(4, 'd'), (2, 'b'), (6, 'f'), (2, 'x')];
    let slot: BstPriorityQueue<char> = pairs.into_iter().collect();
    let vec: Queue<char, SlotIndex, VecStorage<KeyNode<char, SlotIndex>>> =
        pairs.into_iter().collect();

    assert!(slot == vec);
    assert!(vec == slot);
}
